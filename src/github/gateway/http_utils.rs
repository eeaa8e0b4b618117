//! Shared HTTP utilities for the thread gateway.

use http::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::github::models::Rendering;

/// Request headers selecting the body rendering of comment payloads.
pub(super) fn rendering_headers(rendering: Rendering) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(rendering.media_type()));
    headers
}

pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
