//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.threadlink.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `THREADLINK_ISSUE`, `THREADLINK_TOKEN`, or
//!    legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--issue`/`-i`, `--token`/`-t`, and so on
//!
//! # Configuration File
//!
//! ```toml
//! owner = "ubiquity"
//! repo = "pay.ubq.fi"
//! issue = 42
//! token = "ghp_example"
//! host = "github.com"
//! dedupe_references = false
//! max_concurrency = 4
//! request_timeout_seconds = 30
//! aggregation_timeout_seconds = 600
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::context::aggregator::{AggregationOptions, DEFAULT_MAX_CONCURRENCY};
use crate::context::references::{DEFAULT_HOST, ReferenceExtractor};
use crate::github::error::FetchError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator, ThreadNumber};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_AGGREGATION_TIMEOUT_SECONDS: u64 = 600;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `THREADLINK_OWNER` or `--owner`: Repository owner
/// - `THREADLINK_REPO` or `--repo`: Repository name
/// - `THREADLINK_ISSUE` or `--issue`: Root issue number
/// - `THREADLINK_TOKEN`, `GITHUB_TOKEN`, or `--token`: Authentication token
/// - `THREADLINK_HOST` or `--host`: Web host used in reference URLs
/// - `THREADLINK_API_BASE` or `--api-base`: API base override
///
/// # Example
///
/// ```no_run
/// use threadlink::ThreadlinkConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = ThreadlinkConfig::load().expect("failed to load configuration");
/// let issue = config.require_issue().expect("issue number required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "THREADLINK",
    discovery(
        dotfile_name = ".threadlink.toml",
        config_file_name = "threadlink.toml",
        app_name = "threadlink"
    )
)]
pub struct ThreadlinkConfig {
    /// Repository owner (e.g., "octocat").
    ///
    /// Can be provided via:
    /// - CLI: `--owner <OWNER>` or `-o <OWNER>`
    /// - Environment: `THREADLINK_OWNER`
    /// - Config file: `owner = "..."`
    #[ortho_config(cli_short = 'o')]
    pub owner: Option<String>,

    /// Repository name (e.g., "hello-world").
    ///
    /// Can be provided via:
    /// - CLI: `--repo <REPO>` or `-r <REPO>`
    /// - Environment: `THREADLINK_REPO`
    /// - Config file: `repo = "..."`
    #[ortho_config(cli_short = 'r')]
    pub repo: Option<String>,

    /// Root issue whose body is scanned for references.
    ///
    /// Can be provided via:
    /// - CLI: `--issue <NUMBER>` or `-i <NUMBER>`
    /// - Environment: `THREADLINK_ISSUE`
    /// - Config file: `issue = 42`
    #[ortho_config(cli_short = 'i')]
    pub issue: Option<u64>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `THREADLINK_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Web host of the repository, matched in reference URLs.
    ///
    /// Hosts other than `github.com` are treated as GitHub Enterprise and
    /// served from `https://<host>/api/v3` unless `api_base` says otherwise.
    #[ortho_config()]
    pub host: Option<String>,

    /// API base URL override, for proxies and test servers.
    #[ortho_config()]
    pub api_base: Option<String>,

    /// Fetch each referenced thread once even when mentioned repeatedly.
    ///
    /// Can be provided via:
    /// - CLI: `--dedupe-references`
    /// - Config file: `dedupe_references = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so `THREADLINK_DEDUPE_REFERENCES` is not supported.
    #[ortho_config()]
    pub dedupe_references: bool,

    /// Referenced threads enriched concurrently. Defaults to 4.
    #[ortho_config()]
    pub max_concurrency: usize,

    /// Bound on each GitHub request, in seconds. Defaults to 30.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Bound on a whole context build, in seconds. Defaults to 600.
    #[ortho_config()]
    pub aggregation_timeout_seconds: u64,
}

impl Default for ThreadlinkConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            issue: None,
            token: None,
            host: None,
            api_base: None,
            dedupe_references: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            aggregation_timeout_seconds: DEFAULT_AGGREGATION_TIMEOUT_SECONDS,
        }
    }
}

impl ThreadlinkConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingToken`] when no token source provides a
    /// non-empty value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, FetchError> {
        let token = self
            .token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(FetchError::MissingToken)?;
        PersonalAccessToken::new(token)
    }

    /// Returns the root issue number or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when no issue is configured and
    /// [`FetchError::InvalidThreadNumber`] when it is zero.
    pub fn require_issue(&self) -> Result<ThreadNumber, FetchError> {
        let issue = self.issue.ok_or_else(|| FetchError::Configuration {
            message: "issue number is required (use --issue or -i)".to_owned(),
        })?;
        ThreadNumber::new(issue)
    }

    /// Web host used for reference URLs and API base derivation.
    #[must_use]
    pub fn web_host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Builds the locator for the configured repository.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when owner or repo is missing,
    /// and the locator's parse errors for malformed hosts or API bases.
    pub fn repository_locator(&self) -> Result<RepositoryLocator, FetchError> {
        let (owner, repo) = self.require_repository_info()?;
        let host = self.web_host();
        let locator = if host.eq_ignore_ascii_case(DEFAULT_HOST) {
            RepositoryLocator::from_owner_repo(owner, repo)?
        } else {
            RepositoryLocator::parse(&format!("https://{host}/{owner}/{repo}"))?
        };

        match self.api_base.as_deref() {
            Some(api_base) => locator.with_api_base(api_base),
            None => Ok(locator),
        }
    }

    /// Returns owner and repo if both are configured.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when owner or repo is missing.
    pub fn require_repository_info(&self) -> Result<(&str, &str), FetchError> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Ok((owner.as_str(), repo.as_str())),
            (None, _) => Err(FetchError::Configuration {
                message: "repository owner is required (use --owner or -o)".to_owned(),
            }),
            (_, None) => Err(FetchError::Configuration {
                message: "repository name is required (use --repo or -r)".to_owned(),
            }),
        }
    }

    /// Extractor recognising reference URLs on the configured host.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when no pattern can be built for
    /// the host.
    pub fn reference_extractor(&self) -> Result<ReferenceExtractor, FetchError> {
        ReferenceExtractor::for_host(self.web_host()).map_err(|error| FetchError::Configuration {
            message: format!("cannot match references on host {}: {error}", self.web_host()),
        })
    }

    /// Checks that the tuning values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Configuration`] when the concurrency or either
    /// timeout is zero.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.max_concurrency == 0 {
            return Err(FetchError::Configuration {
                message: "max_concurrency must be at least 1".to_owned(),
            });
        }
        if self.request_timeout_seconds == 0 {
            return Err(FetchError::Configuration {
                message: "request_timeout_seconds must be at least 1".to_owned(),
            });
        }
        if self.aggregation_timeout_seconds == 0 {
            return Err(FetchError::Configuration {
                message: "aggregation_timeout_seconds must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Bound applied to each GitHub request.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Build options derived from the tuning fields.
    #[must_use]
    pub const fn aggregation_options(&self) -> AggregationOptions {
        AggregationOptions {
            dedupe_references: self.dedupe_references,
            max_concurrency: self.max_concurrency,
            timeout: Some(Duration::from_secs(self.aggregation_timeout_seconds)),
        }
    }
}

#[cfg(test)]
mod tests;
