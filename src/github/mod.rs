//! GitHub access for thread context collection.
//!
//! This module wraps Octocrab to load issues, pull requests and paginated
//! issue comments for one repository, reads the rate limit headers GitHub
//! returns with every response, and paces requests so a shared token never
//! runs past its budget. Errors are mapped into [`FetchError`] variants so
//! callers never see Octocrab internals.

pub mod error;
pub mod gateway;
pub mod governor;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use error::FetchError;
pub use gateway::{OctocrabThreadGateway, ThreadGateway};
pub use governor::RateGovernor;
pub use locator::{
    PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner, ThreadNumber,
};
pub use models::{
    AuthorKind, Comment, CommentAuthor, CommentPage, Rendering, Thread, ThreadKind,
};
pub use pagination::PageRequest;
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::MockThreadGateway;
