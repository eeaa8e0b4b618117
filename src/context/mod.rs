//! Linked context collection for a root issue.
//!
//! The root issue body is scanned for `#N` mentions and issue or pull request
//! URLs. Each referenced thread is fetched, introduced by a banner record and
//! followed by the comments worth keeping: those written by people and those
//! an automated agent explicitly marked as answers with [`ANSWER_MARKER`].
//!
//! # Example
//!
//! ```
//! use threadlink::context::extract_references;
//!
//! let references = extract_references("See #12 and https://github.com/o/r/pull/4");
//! assert_eq!(references.issue_numbers(), vec![12]);
//! assert_eq!(references.pull_numbers(), vec![4]);
//! ```

pub mod aggregator;
pub mod error;
pub mod fetcher;
pub mod lookup;
pub mod record;
pub mod references;

pub use aggregator::{AggregationOptions, DEFAULT_MAX_CONCURRENCY, LinkedContextBuilder};
pub use error::AggregationError;
pub use fetcher::CommentFetcher;
pub use lookup::ThreadLookup;
pub use record::{ANSWER_MARKER, ContextOutcome, LinkedContext, SYSTEM_AUTHOR, StreamlinedRecord};
pub use references::{Reference, ReferenceExtractor, References, extract_references};
