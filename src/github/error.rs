//! Error types exposed by the GitHub fetch layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while parsing input or communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The provided URL could not be parsed.
    #[error("repository URL is invalid: {0}")]
    InvalidUrl(String),

    /// The repository path is incomplete.
    #[error("repository URL must match /owner/repo")]
    MissingPathSegments,

    /// The thread number is not a valid integer.
    #[error("issue or pull request number must be a positive integer")]
    InvalidThreadNumber,

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// The requested issue, pull request or comment list does not exist.
    #[error("not found: {message}")]
    NotFound {
        /// Which resource was missing.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A single request did not complete within the configured bound.
    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        /// The request that timed out.
        operation: String,
        /// Configured bound in seconds.
        seconds: u64,
    },

    /// Rate limit exceeded: the API returned 403/429 with a rate limit message.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info read from the response headers.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// Invalid pagination parameters.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },
}
