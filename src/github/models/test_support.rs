//! Test helpers for constructing comments, threads and their JSON payloads.
//!
//! # Examples
//!
//! ```
//! use threadlink::github::models::AuthorKind;
//! use threadlink::github::models::test_support::{bot_comment, human_comment};
//!
//! let comment = human_comment(1, "alice", "Thanks!");
//! assert_eq!(comment.author.kind, AuthorKind::Human);
//!
//! let answer = bot_comment(2, "ubiquibot[bot]", "Here is an answer");
//! assert_eq!(answer.author.kind, AuthorKind::Bot);
//! ```

use serde_json::{Value, json};

use super::{AuthorKind, Comment, CommentAuthor, Thread, ThreadKind};

/// Comment written by a person.
#[must_use]
pub fn human_comment(id: u64, login: &str, body: &str) -> Comment {
    comment(id, login, AuthorKind::Human, body)
}

/// Comment written by a bot account.
#[must_use]
pub fn bot_comment(id: u64, login: &str, body: &str) -> Comment {
    comment(id, login, AuthorKind::Bot, body)
}

/// Comment with an explicit author kind.
#[must_use]
pub fn comment(id: u64, login: &str, kind: AuthorKind, body: &str) -> Comment {
    Comment {
        id,
        author: CommentAuthor {
            login: login.to_owned(),
            kind,
        },
        body: Some(body.to_owned()),
    }
}

/// Thread snapshot with a body.
#[must_use]
pub fn thread(number: u64, kind: ThreadKind, title: &str, body: Option<&str>) -> Thread {
    Thread {
        number,
        title: title.to_owned(),
        body: body.map(ToOwned::to_owned),
        kind,
    }
}

/// GitHub JSON payload for an issue comment.
///
/// `account_type` is GitHub's `user.type` value such as `User` or `Bot`.
#[must_use]
pub fn comment_json(id: u64, login: &str, account_type: &str, body: &str) -> Value {
    json!({
        "id": id,
        "body": body,
        "user": { "login": login, "type": account_type }
    })
}

/// GitHub JSON payload for an issue or pull request.
#[must_use]
pub fn thread_json(number: u64, title: &str, body: Option<&str>) -> Value {
    json!({
        "number": number,
        "title": title,
        "body": body,
        "state": "open",
        "user": { "login": "octocat", "type": "User" }
    })
}
