//! Discovery of issue and pull request references in free text.
//!
//! Two mention shapes are recognised, scanned left to right:
//!
//! - `#123`, always recorded as an issue reference. GitHub resolves bare
//!   numbers to either kind, and the issues endpoint serves both.
//! - `https://<host>/<owner>/<repo>/(issues|pull)/123`, classified by the
//!   literal path segment. The host is matched case-insensitively; the owner
//!   and repository are not checked against the current repository.
//!
//! Repeated mentions are kept in order. [`References::deduplicated`] drops
//! them when a caller wants one fetch per thread.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::github::locator::ThreadNumber;
use crate::github::models::ThreadKind;

/// Host matched by [`extract_references`].
pub const DEFAULT_HOST: &str = "github.com";

#[expect(
    clippy::expect_used,
    reason = "the default pattern is built from a constant host"
)]
static DEFAULT_EXTRACTOR: LazyLock<ReferenceExtractor> = LazyLock::new(|| {
    ReferenceExtractor::for_host(DEFAULT_HOST).expect("default reference pattern should compile")
});

/// A mention of another thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Referenced issue or pull request number.
    pub number: ThreadNumber,
    /// How the mention classified the target.
    pub kind: ThreadKind,
}

/// References found in one body, partitioned by kind in mention order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    /// Issue references, including every bare `#N` mention.
    pub issues: Vec<ThreadNumber>,
    /// Pull request references from `/pull/N` URLs.
    pub pulls: Vec<ThreadNumber>,
}

impl References {
    /// Returns true when no reference was found.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.issues.is_empty() && self.pulls.is_empty()
    }

    /// Total number of references across both kinds.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.issues.len() + self.pulls.len()
    }

    /// Issue reference numbers as plain integers.
    #[must_use]
    pub fn issue_numbers(&self) -> Vec<u64> {
        self.issues.iter().map(|number| number.get()).collect()
    }

    /// Pull request reference numbers as plain integers.
    #[must_use]
    pub fn pull_numbers(&self) -> Vec<u64> {
        self.pulls.iter().map(|number| number.get()).collect()
    }

    /// Keeps only the first mention of each number within each kind.
    #[must_use]
    pub fn deduplicated(self) -> Self {
        Self {
            issues: first_occurrences(self.issues),
            pulls: first_occurrences(self.pulls),
        }
    }

    fn push(&mut self, reference: Reference) {
        match reference.kind {
            ThreadKind::Issue => self.issues.push(reference.number),
            ThreadKind::Pull => self.pulls.push(reference.number),
        }
    }
}

fn first_occurrences(numbers: Vec<ThreadNumber>) -> Vec<ThreadNumber> {
    let mut seen = HashSet::new();
    numbers
        .into_iter()
        .filter(|number| seen.insert(*number))
        .collect()
}

/// Scans bodies for thread references on one web host.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    pattern: Regex,
}

impl ReferenceExtractor {
    /// Builds an extractor recognising URLs on `host`.
    ///
    /// # Errors
    ///
    /// Returns the regex error when the pattern cannot be compiled.
    pub fn for_host(host: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(
            r"#(?P<short>\d+)|https://(?i:{host})/[^/\s]+/[^/\s]+/(?P<segment>issues|pull)/(?P<number>\d+)",
            host = regex::escape(host)
        ))?;
        Ok(Self { pattern })
    }

    /// Every reference in `body`, in mention order.
    pub fn references<'a>(&'a self, body: &'a str) -> impl Iterator<Item = Reference> + 'a {
        self.pattern
            .captures_iter(body)
            .filter_map(|captures| {
                let (digits, kind) = if let Some(short) = captures.name("short") {
                    (short.as_str(), ThreadKind::Issue)
                } else {
                    let segment = captures.name("segment")?;
                    let digits = captures.name("number")?;
                    let kind = if segment.as_str() == "pull" {
                        ThreadKind::Pull
                    } else {
                        ThreadKind::Issue
                    };
                    (digits.as_str(), kind)
                };

                let parsed = digits
                    .parse::<u64>()
                    .ok()
                    .and_then(|value| ThreadNumber::new(value).ok());
                if parsed.is_none() {
                    debug!(mention = digits, "ignoring reference with invalid number");
                }
                parsed.map(|number| Reference { number, kind })
            })
    }

    /// Partitions the references in `body` into issues and pull requests.
    #[must_use]
    pub fn extract(&self, body: &str) -> References {
        let mut references = References::default();
        for reference in self.references(body) {
            references.push(reference);
        }
        references
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

/// Extracts references to `github.com` threads from `body`.
///
/// # Example
///
/// ```
/// use threadlink::context::extract_references;
///
/// let references = extract_references("see #12 and https://github.com/o/r/pull/7");
/// assert_eq!(references.issue_numbers(), vec![12]);
/// assert_eq!(references.pull_numbers(), vec![7]);
/// ```
#[must_use]
pub fn extract_references(body: &str) -> References {
    DEFAULT_EXTRACTOR.extract(body)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{ReferenceExtractor, References, extract_references};

    #[rstest]
    fn bare_mentions_are_issue_references() {
        let references = extract_references("see #12 and #45");
        assert_eq!(references.issue_numbers(), vec![12, 45]);
        assert!(references.pulls.is_empty());
    }

    #[rstest]
    fn url_mentions_are_classified_by_path_segment() {
        let references = extract_references(
            "https://github.com/o/r/pull/7 fixes https://github.com/o/r/issues/9",
        );
        assert_eq!(references.pull_numbers(), vec![7]);
        assert_eq!(references.issue_numbers(), vec![9]);
    }

    #[rstest]
    #[case::plain_prose("nothing to see here")]
    #[case::empty("")]
    #[case::hash_without_digits("# Heading and #hashtag")]
    #[case::other_host("https://gitlab.com/o/r/issues/3")]
    #[case::pulls_collection("https://github.com/o/r/pulls/3")]
    #[case::plain_http("http://github.com/o/r/issues/3")]
    fn bodies_without_mentions_yield_nothing(#[case] body: &str) {
        let references = extract_references(body);
        assert!(references.is_empty(), "unexpected references {references:?}");
    }

    #[rstest]
    fn repeated_mentions_are_kept() {
        let references = extract_references("#3, again #3 and https://github.com/o/r/issues/3");
        assert_eq!(references.issue_numbers(), vec![3, 3, 3]);
        assert_eq!(references.len(), 3);
    }

    #[rstest]
    fn deduplication_keeps_first_occurrence_per_kind() {
        let references = extract_references(
            "#3 #5 #3 https://github.com/o/r/pull/3 https://github.com/o/r/pull/3",
        )
        .deduplicated();
        assert_eq!(references.issue_numbers(), vec![3, 5]);
        assert_eq!(references.pull_numbers(), vec![3]);
    }

    #[rstest]
    fn host_matching_is_case_insensitive() {
        let references = extract_references("https://GitHub.COM/o/r/pull/11");
        assert_eq!(references.pull_numbers(), vec![11]);
    }

    #[rstest]
    fn markdown_link_yields_both_mentions() {
        let references = extract_references("[#25](https://github.com/o/r/issues/25)");
        assert_eq!(references.issue_numbers(), vec![25, 25]);
    }

    #[rstest]
    fn zero_and_oversized_numbers_are_skipped() {
        let references = extract_references("#0 #99999999999999999999999 #8");
        assert_eq!(references.issue_numbers(), vec![8]);
    }

    #[rstest]
    fn cross_repository_urls_are_parsed() {
        let references = extract_references("upstream: https://github.com/other/project/issues/77");
        assert_eq!(references.issue_numbers(), vec![77]);
    }

    #[rstest]
    fn enterprise_extractor_matches_its_host_only() {
        let extractor =
            ReferenceExtractor::for_host("ghe.example.com").expect("pattern should compile");
        let references = extractor.extract(
            "https://ghe.example.com/o/r/pull/4 https://github.com/o/r/pull/5 #6",
        );
        assert_eq!(references.pull_numbers(), vec![4]);
        assert_eq!(references.issue_numbers(), vec![6]);
    }

    #[rstest]
    fn extraction_is_repeatable() {
        let body = "#1 https://github.com/o/r/pull/2 #3 https://github.com/o/r/issues/4";
        let first = extract_references(body);
        let second = extract_references(body);
        assert_eq!(first, second);
        assert_eq!(
            first,
            References {
                issues: extract_references("#1 #3 #4").issues,
                pulls: extract_references("https://github.com/o/r/pull/2").pulls,
            }
        );
    }
}
