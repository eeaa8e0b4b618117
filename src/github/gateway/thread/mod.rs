//! Octocrab implementation of the thread gateway.
//!
//! Requests go through Octocrab's raw `_get_with_headers` so the `Accept`
//! header can select a body rendering and the `X-RateLimit-*` headers of each
//! response stay readable.

use std::time::Duration;

use async_trait::async_trait;
use http::header::HeaderMap;
use http::Uri;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::github::error::FetchError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator, ThreadNumber};
use crate::github::models::{
    ApiComment, ApiThread, CommentPage, Rendering, Thread, ThreadKind,
};
use crate::github::pagination::PageRequest;
use crate::github::rate_limit::RateLimitInfo;

use super::ThreadGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{map_http_error, map_octocrab_error};
use super::http_utils::{extract_github_message, rendering_headers};

/// Default bound on a single GitHub request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

struct RawResponse {
    headers: HeaderMap,
    body: String,
}

/// Octocrab-backed gateway bound to one repository.
pub struct OctocrabThreadGateway {
    client: Octocrab,
    locator: RepositoryLocator,
    request_timeout: Duration,
}

impl OctocrabThreadGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab, locator: RepositoryLocator) -> Self {
        Self {
            client,
            locator,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Builds an Octocrab client for the given token and repository locator.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` when the base URI cannot be parsed or
    /// `FetchError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: RepositoryLocator,
    ) -> Result<Self, FetchError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab, locator))
    }

    /// Bounds every request made by this gateway.
    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Repository this gateway reads from.
    #[must_use]
    pub const fn locator(&self) -> &RepositoryLocator {
        &self.locator
    }

    async fn send(
        &self,
        operation: &str,
        path: &str,
        headers: Option<HeaderMap>,
    ) -> Result<RawResponse, FetchError> {
        let uri: Uri = path
            .parse::<Uri>()
            .map_err(|error| FetchError::InvalidUrl(error.to_string()))?;
        trace!(%uri, operation, "requesting GitHub resource");

        let request = async {
            let response = self
                .client
                ._get_with_headers(uri, headers)
                .await
                .map_err(|error| map_octocrab_error(operation, &error))?;

            let status = response.status();
            let response_headers = response.headers().clone();
            let body = self.client.body_to_string(response).await;

            if !status.is_success() {
                let message = body.ok().as_deref().and_then(extract_github_message);
                return Err(map_http_error(
                    operation,
                    status,
                    message,
                    Some(RateLimitInfo::from_headers(&response_headers)),
                ));
            }

            let decoded = body.map_err(|error| FetchError::Api {
                message: format!("{operation} response decode failed: {error}"),
            })?;
            Ok(RawResponse {
                headers: response_headers,
                body: decoded,
            })
        };

        tokio::time::timeout(self.request_timeout, request)
            .await
            .map_err(|_| FetchError::Timeout {
                operation: operation.to_owned(),
                seconds: self.request_timeout.as_secs(),
            })?
    }

    async fn thread(
        &self,
        operation: &str,
        path: &str,
        kind: ThreadKind,
    ) -> Result<Thread, FetchError> {
        let response = self.send(operation, path, None).await?;
        let api: ApiThread = deserialise(operation, &response.body)?;
        Ok(api.into_thread(kind))
    }
}

fn deserialise<T: DeserializeOwned>(operation: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|error| FetchError::Api {
        message: format!("{operation} response deserialisation failed: {error}"),
    })
}

#[async_trait]
impl ThreadGateway for OctocrabThreadGateway {
    async fn list_comments(
        &self,
        number: ThreadNumber,
        page: PageRequest,
        rendering: Rendering,
    ) -> Result<CommentPage, FetchError> {
        let operation = "issue comments";
        let path = self.locator.comments_path(number, page);
        let response = self
            .send(operation, &path, Some(rendering_headers(rendering)))
            .await?;

        let items: Vec<ApiComment> = deserialise(operation, &response.body)?;
        Ok(CommentPage {
            items: items
                .into_iter()
                .map(|item| item.into_comment(rendering))
                .collect(),
            rate_limit: RateLimitInfo::from_headers(&response.headers),
        })
    }

    async fn issue(&self, number: ThreadNumber) -> Result<Thread, FetchError> {
        let path = self.locator.issue_path(number);
        self.thread("issue", &path, ThreadKind::Issue).await
    }

    async fn pull_request(&self, number: ThreadNumber) -> Result<Thread, FetchError> {
        let path = self.locator.pull_request_path(number);
        self.thread("pull request", &path, ThreadKind::Pull).await
    }
}
