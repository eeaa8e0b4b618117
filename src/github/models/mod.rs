//! Data models for issues, pull requests and their comments.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into the public domain types.

use serde::Deserialize;

use super::rate_limit::RateLimitInfo;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Whether a thread is an issue or a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadKind {
    /// A plain issue.
    Issue,
    /// A pull request.
    Pull,
}

impl ThreadKind {
    /// Human-readable name used in context banners.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Issue => "Issue",
            Self::Pull => "Pull Request",
        }
    }
}

/// Read-only snapshot of an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    /// Issue or pull request number.
    pub number: u64,
    /// Title; empty when GitHub returned none.
    pub title: String,
    /// Markdown body, absent when the author left it empty.
    pub body: Option<String>,
    /// Issue or pull request.
    pub kind: ThreadKind,
}

/// Account type of a comment author, decided once at deserialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorKind {
    /// A person (`User` account type).
    Human,
    /// A GitHub App or bot account.
    Bot,
    /// Organisations, mannequins, deleted accounts and anything unknown.
    Other,
}

impl AuthorKind {
    /// Maps GitHub's `user.type` field.
    #[must_use]
    pub fn from_account_type(account_type: &str) -> Self {
        match account_type {
            "User" => Self::Human,
            "Bot" => Self::Bot,
            _ => Self::Other,
        }
    }
}

/// Author of a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAuthor {
    /// Login name; `ghost` when the account no longer exists.
    pub login: String,
    /// Account type.
    pub kind: AuthorKind,
}

/// Issue comment in one rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment identifier.
    pub id: u64,
    /// Comment author.
    pub author: CommentAuthor,
    /// Comment body in the requested rendering.
    pub body: Option<String>,
}

impl Comment {
    /// Returns true when the body contains `needle` verbatim.
    #[must_use]
    pub fn body_contains(&self, needle: &str) -> bool {
        self.body.as_deref().is_some_and(|body| body.contains(needle))
    }
}

/// Body representation requested from GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
    /// The markdown exactly as written, including HTML comments.
    Raw,
    /// Plain text, served as `body_text`.
    Text,
    /// Rendered HTML, served as `body_html`.
    Html,
    /// Markdown, text and HTML together; the markdown `body` is kept.
    #[default]
    Full,
}

impl Rendering {
    /// The `Accept` media type that selects this rendering.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Raw => "application/vnd.github.raw+json",
            Self::Text => "application/vnd.github.text+json",
            Self::Html => "application/vnd.github.html+json",
            Self::Full => "application/vnd.github.full+json",
        }
    }
}

/// One page of issue comments plus the rate limit reported with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentPage {
    /// Comments on this page, oldest first.
    pub items: Vec<Comment>,
    /// Rate limit headers of the response.
    pub rate_limit: RateLimitInfo,
}

/// Issue or pull request payload; both endpoints share these fields.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiThread {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) id: u64,
    pub(super) body: Option<String>,
    pub(super) body_text: Option<String>,
    pub(super) body_html: Option<String>,
    pub(super) user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
    #[serde(rename = "type")]
    pub(super) account_type: Option<String>,
}

impl ApiThread {
    pub(super) fn into_thread(self, kind: ThreadKind) -> Thread {
        Thread {
            number: self.number,
            title: self.title.unwrap_or_default(),
            body: self.body,
            kind,
        }
    }
}

impl From<ApiUser> for CommentAuthor {
    fn from(value: ApiUser) -> Self {
        Self {
            login: value.login.unwrap_or_else(|| GHOST_LOGIN.to_owned()),
            kind: value
                .account_type
                .as_deref()
                .map_or(AuthorKind::Other, AuthorKind::from_account_type),
        }
    }
}

impl ApiComment {
    /// Converts the payload, taking the body field that `rendering` fills.
    pub(super) fn into_comment(self, rendering: Rendering) -> Comment {
        let author = self.user.map_or_else(
            || CommentAuthor {
                login: GHOST_LOGIN.to_owned(),
                kind: AuthorKind::Other,
            },
            CommentAuthor::from,
        );
        let body = match rendering {
            Rendering::Raw | Rendering::Full => self.body,
            Rendering::Text => self.body_text,
            Rendering::Html => self.body_html,
        };
        Comment {
            id: self.id,
            author,
            body,
        }
    }
}

const GHOST_LOGIN: &str = "ghost";

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ApiComment, ApiThread, AuthorKind, Rendering, ThreadKind};

    #[rstest]
    #[case::user("User", AuthorKind::Human)]
    #[case::bot("Bot", AuthorKind::Bot)]
    #[case::organization("Organization", AuthorKind::Other)]
    #[case::lowercase_is_not_a_user("user", AuthorKind::Other)]
    fn classifies_account_types(#[case] account_type: &str, #[case] expected: AuthorKind) {
        assert_eq!(AuthorKind::from_account_type(account_type), expected);
    }

    #[rstest]
    fn api_comment_converts_into_comment() {
        let api: ApiComment = serde_json::from_value(json!({
            "id": 7,
            "body": "Looks good",
            "user": { "login": "ubiquibot[bot]", "type": "Bot" }
        }))
        .expect("ApiComment should deserialise");

        let comment = api.into_comment(Rendering::Full);
        assert_eq!(comment.id, 7);
        assert_eq!(comment.author.login, "ubiquibot[bot]");
        assert_eq!(comment.author.kind, AuthorKind::Bot);
        assert_eq!(comment.body.as_deref(), Some("Looks good"));
    }

    #[rstest]
    #[case::null_user(json!({ "id": 1, "body": null, "user": null }))]
    #[case::absent_user(json!({ "id": 1 }))]
    fn missing_author_becomes_ghost(#[case] value: serde_json::Value) {
        let api: ApiComment = serde_json::from_value(value).expect("should deserialise");

        let comment = api.into_comment(Rendering::Raw);
        assert_eq!(comment.author.login, "ghost");
        assert_eq!(comment.author.kind, AuthorKind::Other);
        assert!(!comment.body_contains("anything"));
    }

    #[rstest]
    #[case::raw(Rendering::Raw, Some("**hi** <!-- note -->"))]
    #[case::full(Rendering::Full, Some("**hi** <!-- note -->"))]
    #[case::text(Rendering::Text, Some("hi"))]
    #[case::html(Rendering::Html, Some("<p><strong>hi</strong></p>"))]
    fn body_follows_rendering(#[case] rendering: Rendering, #[case] expected: Option<&str>) {
        let api: ApiComment = serde_json::from_value(json!({
            "id": 3,
            "body": "**hi** <!-- note -->",
            "body_text": "hi",
            "body_html": "<p><strong>hi</strong></p>",
            "user": { "login": "alice", "type": "User" }
        }))
        .expect("ApiComment should deserialise");

        assert_eq!(api.into_comment(rendering).body.as_deref(), expected);
    }

    #[rstest]
    fn text_rendering_without_body_text_has_no_body() {
        let api: ApiComment = serde_json::from_value(json!({
            "id": 4,
            "body": "markdown only",
            "user": { "login": "alice", "type": "User" }
        }))
        .expect("ApiComment should deserialise");

        assert!(api.into_comment(Rendering::Text).body.is_none());
    }

    #[rstest]
    fn api_thread_keeps_absent_body() {
        let api: ApiThread = serde_json::from_value(json!({
            "number": 12,
            "title": "Broken build",
            "body": null,
            "state": "open"
        }))
        .expect("ApiThread should deserialise");

        let thread = api.into_thread(ThreadKind::Pull);
        assert_eq!(thread.number, 12);
        assert_eq!(thread.title, "Broken build");
        assert!(thread.body.is_none());
        assert_eq!(thread.kind, ThreadKind::Pull);
    }

    #[rstest]
    fn raw_rendering_uses_raw_media_type() {
        assert_eq!(
            Rendering::Raw.media_type(),
            "application/vnd.github.raw+json"
        );
        assert_eq!(Rendering::default(), Rendering::Full);
    }
}
