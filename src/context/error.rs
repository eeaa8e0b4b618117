//! Errors that abort a context build.

use thiserror::Error;

/// Failure of the enrichment phase or of the overall time bound.
///
/// No partial context is returned alongside either variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// Enriching a referenced thread failed.
    #[error("Error getting linked issues or prs: {message}")]
    AggregationFailed {
        /// What went wrong.
        message: String,
    },

    /// The whole build exceeded its time bound.
    #[error("collecting linked context timed out after {seconds}s")]
    TimedOut {
        /// Configured bound in seconds.
        seconds: u64,
    },
}
