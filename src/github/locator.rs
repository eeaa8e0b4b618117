//! Repository identity, thread numbers and the access token.

use url::Url;

use super::error::FetchError;
use super::pagination::PageRequest;

const GITHUB_HOST: &str = "github.com";
const GITHUB_API: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, FetchError> {
        if value.is_empty() {
            return Err(FetchError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, FetchError> {
        if value.is_empty() {
            return Err(FetchError::MissingPathSegments);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Issue or pull request number; always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThreadNumber(u64);

impl ThreadNumber {
    /// Wraps a thread number.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidThreadNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, FetchError> {
        if value == 0 {
            return Err(FetchError::InvalidThreadNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ThreadNumber {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, FetchError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(FetchError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("PersonalAccessToken(***)")
    }
}

/// Derives the GitHub API base URL from a web host.
///
/// `github.com` maps to the public API; any other host is treated as GitHub
/// Enterprise and served from `/api/v3` on the same authority.
fn derive_api_base(scheme: &str, host: &str, port: Option<u16>) -> Result<Url, FetchError> {
    if host.eq_ignore_ascii_case(GITHUB_HOST) {
        return Url::parse(GITHUB_API).map_err(|error| FetchError::InvalidUrl(error.to_string()));
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{scheme}://{authority}"))
        .map_err(|error| FetchError::InvalidUrl(error.to_string()))?;

    api_url
        .set_port(port)
        .map_err(|()| FetchError::InvalidUrl("invalid port".to_owned()))?;
    api_url.set_path("api/v3");
    Ok(api_url)
}

/// Repository whose threads are fetched, with its web host and API base.
///
/// # Example
///
/// ```
/// use threadlink::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/octo/repo")
///     .expect("should parse repository URL");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "repo");
/// assert_eq!(locator.web_host(), "github.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    web_host: String,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator for a repository hosted on `github.com`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::MissingPathSegments` when owner or repo is empty.
    pub fn from_owner_repo(owner: &str, repo: &str) -> Result<Self, FetchError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let api_base =
            Url::parse(GITHUB_API).map_err(|error| FetchError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base,
            web_host: GITHUB_HOST.to_owned(),
            owner: validated_owner,
            repository,
        })
    }

    /// Parses a repository URL in the form `https://<host>/<owner>/<repo>`.
    ///
    /// Trailing path segments (such as `/issues/12`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` when parsing fails or
    /// `MissingPathSegments` when the URL path has no owner and repository.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let parsed =
            Url::parse(input).map_err(|error| FetchError::InvalidUrl(error.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl("URL must include a host".to_owned()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or(FetchError::MissingPathSegments)?;
        let owner_segment = segments.next().ok_or(FetchError::MissingPathSegments)?;
        let repository_segment = segments.next().ok_or(FetchError::MissingPathSegments)?;

        let owner = RepositoryOwner::new(owner_segment)?;
        let repository = RepositoryName::new(repository_segment)?;
        let api_base = derive_api_base(parsed.scheme(), host, parsed.port())?;

        Ok(Self {
            api_base,
            web_host: host.to_ascii_lowercase(),
            owner,
            repository,
        })
    }

    /// Replaces the derived API base, for proxies or test servers.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` when `api_base` cannot be parsed.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, FetchError> {
        self.api_base =
            Url::parse(api_base).map_err(|error| FetchError::InvalidUrl(error.to_string()))?;
        Ok(self)
    }

    /// API base URL derived from the repository host.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Host that web URLs to this repository's threads use.
    #[must_use]
    pub const fn web_host(&self) -> &str {
        self.web_host.as_str()
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    pub(crate) fn issue_path(&self, number: ThreadNumber) -> String {
        format!(
            "/repos/{}/{}/issues/{number}",
            self.owner.as_str(),
            self.repository.as_str(),
        )
    }

    pub(crate) fn pull_request_path(&self, number: ThreadNumber) -> String {
        format!(
            "/repos/{}/{}/pulls/{number}",
            self.owner.as_str(),
            self.repository.as_str(),
        )
    }

    pub(crate) fn comments_path(&self, number: ThreadNumber, page: PageRequest) -> String {
        format!(
            "/repos/{}/{}/issues/{number}/comments?{}",
            self.owner.as_str(),
            self.repository.as_str(),
            page.query()
        )
    }
}
