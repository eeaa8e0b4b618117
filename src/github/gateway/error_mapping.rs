//! Error mapping helpers for the Octocrab thread gateway.

use http::StatusCode;

use crate::github::error::FetchError;
use crate::github::rate_limit::RateLimitInfo;

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks whether a failed response is GitHub's rate limit rejection, based
/// on the HTTP status and the message / documentation URL content.
pub(super) fn is_rate_limit_error(
    status: StatusCode,
    message: &str,
    documentation_url: Option<&str>,
) -> bool {
    let is_rate_limit_status = matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = message.to_lowercase().contains("rate limit")
        || documentation_url.is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> FetchError {
    if let octocrab::Error::GitHub { source, .. } = error {
        if is_rate_limit_error(
            source.status_code,
            &source.message,
            source.documentation_url.as_deref(),
        ) {
            return FetchError::RateLimitExceeded {
                rate_limit: None,
                message: format!("{operation} failed: {}", source.message),
            };
        }
        return map_http_error(
            operation,
            source.status_code,
            Some(source.message.clone()),
            None,
        );
    }

    if is_network_error(error) {
        return FetchError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    FetchError::Api {
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps a non-success response.
///
/// `rate_limit` carries the response's rate limit headers when they were
/// available.
pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
    rate_limit: Option<RateLimitInfo>,
) -> FetchError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());

    if is_rate_limit_error(status, &message, None) {
        let described = match &rate_limit {
            Some(info) => format!(
                "{operation} failed: {message} (resets at {reset})",
                reset = info.reset_at()
            ),
            None => format!("{operation} failed: {message}"),
        };
        return FetchError::RateLimitExceeded {
            rate_limit,
            message: described,
        };
    }

    if is_auth_failure(status) {
        return FetchError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        };
    }

    if status == StatusCode::NOT_FOUND {
        return FetchError::NotFound {
            message: format!("{operation}: {message}"),
        };
    }

    FetchError::Api {
        message: format!("{operation} failed with status {status}: {message}"),
    }
}
