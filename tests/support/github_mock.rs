//! Wiremock helpers for serving a repository's threads and comments.

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// API path prefix of the mocked `owner/repo` repository.
pub const REPOSITORY_PATH: &str = "/api/v3/repos/owner/repo";

/// Matches requests whose `Accept` header mentions a rendering.
pub struct AcceptContains(pub &'static str);

impl Match for AcceptContains {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get_all("accept")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| value.contains(self.0))
    }
}

/// Serves `body` for `GET <repository>/<resource>`.
pub async fn serve_thread(server: &MockServer, resource: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{REPOSITORY_PATH}/{resource}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serves one page of comments for `issue`, optionally limited to one
/// rendering, and an empty second page.
pub async fn serve_comments(
    server: &MockServer,
    issue: u64,
    rendering: Option<&'static str>,
    comments: Value,
) {
    let comments_path = format!("{REPOSITORY_PATH}/issues/{issue}/comments");
    let any_rendering = Mock::given(method("GET"))
        .and(path(comments_path.clone()))
        .and(query_param("page", "1"));
    let first_page = match rendering {
        Some(media) => any_rendering.and(AcceptContains(media)),
        None => any_rendering,
    };
    first_page
        .respond_with(ResponseTemplate::new(200).set_body_json(comments))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(comments_path))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(Vec::new())))
        .mount(server)
        .await;
}
