//! Gateways for loading issues, pull requests and comments through Octocrab.
//!
//! The [`ThreadGateway`] trait is the seam between the context pipeline and
//! GitHub: the pipeline is written against the trait so tests can substitute
//! a mock, while [`OctocrabThreadGateway`] performs the real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;
mod thread;

pub use thread::OctocrabThreadGateway;

use async_trait::async_trait;

use crate::github::error::FetchError;
use crate::github::locator::ThreadNumber;
use crate::github::models::{CommentPage, Rendering, Thread};
use crate::github::pagination::PageRequest;

/// Gateway that can load threads and their comments from one repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreadGateway: Send + Sync {
    /// Fetch one page of issue comments in the requested rendering.
    async fn list_comments(
        &self,
        number: ThreadNumber,
        page: PageRequest,
        rendering: Rendering,
    ) -> Result<CommentPage, FetchError>;

    /// Fetch an issue by number.
    async fn issue(&self, number: ThreadNumber) -> Result<Thread, FetchError>;

    /// Fetch a pull request by number.
    async fn pull_request(&self, number: ThreadNumber) -> Result<Thread, FetchError>;
}
