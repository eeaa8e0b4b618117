//! Threadlink library crate collecting the context an issue links to.
//!
//! The library wraps Octocrab to load a root issue, find the issues and pull
//! requests its body references, and gather the banners and comments of each
//! referenced thread while pacing requests against GitHub's rate limit.

pub mod config;
pub mod context;
pub mod github;

pub use config::ThreadlinkConfig;
pub use context::{
    AggregationError, AggregationOptions, ContextOutcome, LinkedContext, LinkedContextBuilder,
    StreamlinedRecord, extract_references,
};
pub use github::{
    FetchError, OctocrabThreadGateway, PersonalAccessToken, RateGovernor, RepositoryLocator,
    ThreadGateway, ThreadNumber,
};
