//! Output records of the context pipeline.

use serde::Serialize;

use crate::github::locator::ThreadNumber;
use crate::github::models::{Comment, Thread};

/// Author recorded on synthesised thread banners.
pub const SYSTEM_AUTHOR: &str = "system";

/// Hidden marker that lets an automated answer through the human-only filter.
///
/// It is an HTML comment: present in the markdown `body` of the raw and full
/// renderings, stripped from the text and HTML ones.
pub const ANSWER_MARKER: &str = "<!--- { 'UbiquityAI': 'answer' } --->";

const BANNER_RULE: &str = "===============";

/// Flattened `{author, body}` unit handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamlinedRecord {
    /// Login of the comment author, or [`SYSTEM_AUTHOR`] for banners.
    #[serde(rename = "login")]
    pub author: String,
    /// Comment body, or the banner text.
    pub body: String,
}

impl StreamlinedRecord {
    /// Banner introducing a referenced thread: a rule line naming its kind,
    /// number and title, followed by the thread body.
    #[must_use]
    pub fn banner(thread: &Thread) -> Self {
        let body = thread.body.as_deref().unwrap_or_default();
        Self {
            author: SYSTEM_AUTHOR.to_owned(),
            body: format!(
                "{BANNER_RULE} {kind} #{number}: {title} {BANNER_RULE}\n{body}",
                kind = thread.kind.label(),
                number = thread.number,
                title = thread.title,
            ),
        }
    }
}

impl From<Comment> for StreamlinedRecord {
    fn from(value: Comment) -> Self {
        Self {
            author: value.author.login,
            body: value.body.unwrap_or_default(),
        }
    }
}

/// Records gathered from the threads a root thread links to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkedContext {
    /// Banners and comments of referenced issues, in mention order.
    #[serde(rename = "linkedIssues")]
    pub linked_issues: Vec<StreamlinedRecord>,
    /// Banners and comments of referenced pull requests, in mention order.
    #[serde(rename = "linkedPrs")]
    pub linked_pulls: Vec<StreamlinedRecord>,
}

impl LinkedContext {
    /// Returns true when neither list holds a record.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.linked_issues.is_empty() && self.linked_pulls.is_empty()
    }
}

/// Successful result of a context build.
///
/// A missing root thread and an empty root body are expected inputs rather
/// than failures; each carries a diagnostic message instead of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextOutcome {
    /// The root issue could not be fetched.
    RootNotFound {
        /// Requested root number.
        number: ThreadNumber,
    },
    /// The root issue has no body to scan.
    EmptyBody {
        /// Root number.
        number: ThreadNumber,
    },
    /// Context gathered from the references in the root body.
    Linked(LinkedContext),
}

impl ContextOutcome {
    /// Human-readable message for the outcomes that carry no records.
    #[must_use]
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::RootNotFound { number } => {
                Some(format!("Failed to fetch using issueNumber: {number}"))
            }
            Self::EmptyBody { number } => Some(format!("No body found for issue: {number}")),
            Self::Linked(_) => None,
        }
    }

    /// The gathered context, if any.
    #[must_use]
    pub fn into_linked(self) -> Option<LinkedContext> {
        match self {
            Self::Linked(context) => Some(context),
            Self::RootNotFound { .. } | Self::EmptyBody { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ContextOutcome, LinkedContext, StreamlinedRecord};
    use crate::github::locator::ThreadNumber;
    use crate::github::models::ThreadKind;
    use crate::github::models::test_support::{bot_comment, thread};

    #[rstest]
    #[case::pull(
        ThreadKind::Pull,
        "=============== Pull Request #7: Fix login ===============\nCloses #3"
    )]
    #[case::issue(
        ThreadKind::Issue,
        "=============== Issue #7: Fix login ===============\nCloses #3"
    )]
    fn banner_names_kind_number_and_title(#[case] kind: ThreadKind, #[case] expected: &str) {
        let record = StreamlinedRecord::banner(&thread(7, kind, "Fix login", Some("Closes #3")));
        assert_eq!(record.author, "system");
        assert_eq!(record.body, expected);
    }

    #[rstest]
    fn banner_for_bodyless_thread_ends_after_rule() {
        let record = StreamlinedRecord::banner(&thread(2, ThreadKind::Issue, "Empty", None));
        assert_eq!(record.body, "=============== Issue #2: Empty ===============\n");
    }

    #[rstest]
    fn comment_becomes_record() {
        let record = StreamlinedRecord::from(bot_comment(1, "helper[bot]", "Answer"));
        assert_eq!(record.author, "helper[bot]");
        assert_eq!(record.body, "Answer");
    }

    #[rstest]
    fn linked_context_serialises_with_consumer_field_names() {
        let context = LinkedContext {
            linked_issues: vec![StreamlinedRecord {
                author: "alice".to_owned(),
                body: "hi".to_owned(),
            }],
            linked_pulls: Vec::new(),
        };

        let value = serde_json::to_value(&context).expect("context should serialise");
        assert_eq!(
            value,
            json!({
                "linkedIssues": [{ "login": "alice", "body": "hi" }],
                "linkedPrs": []
            })
        );
    }

    #[rstest]
    fn diagnostics_name_the_root_issue() {
        let number = ThreadNumber::new(42).expect("positive number");
        assert_eq!(
            ContextOutcome::RootNotFound { number }.diagnostic().as_deref(),
            Some("Failed to fetch using issueNumber: 42")
        );
        assert_eq!(
            ContextOutcome::EmptyBody { number }.diagnostic().as_deref(),
            Some("No body found for issue: 42")
        );
        assert_eq!(
            ContextOutcome::Linked(LinkedContext::default()).diagnostic(),
            None
        );
    }
}
