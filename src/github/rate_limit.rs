//! Rate limit information from GitHub API responses.
//!
//! GitHub reports the remaining request budget on every response through the
//! `X-RateLimit-*` headers. [`RateLimitInfo`] captures those values so the
//! [`RateGovernor`](super::governor::RateGovernor) can decide whether the
//! next request has to wait for the window to reset.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use http::header::HeaderMap;

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// Rate limit information extracted from GitHub API response headers.
///
/// Missing or unparsable headers are read as zero, so a response without
/// rate limit headers looks exhausted with a reset in the past and therefore
/// never causes a wait.
///
/// # Example
///
/// ```
/// use threadlink::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(5000, 4999, 1700000000);
/// assert!(!info.is_exhausted());
/// assert_eq!(info.remaining(), 4999);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    limit: u32,
    /// Remaining requests in the current window.
    remaining: u32,
    /// Unix timestamp (seconds) when the rate limit resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit info instance.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Reads the `X-RateLimit-*` headers of a response.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let limit = numeric_header(headers, LIMIT_HEADER).unwrap_or(0);
        let remaining = numeric_header(headers, REMAINING_HEADER).unwrap_or(0);
        let reset_at = numeric_header(headers, RESET_HEADER).unwrap_or(0);
        Self::new(limit, remaining, reset_at)
    }

    /// Returns the maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the Unix timestamp when the rate limit resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true if the rate limit has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Time left until the window resets, measured from `now`.
    ///
    /// Returns [`Duration::ZERO`] when the reset has already passed or lies
    /// beyond what the system clock can represent.
    #[must_use]
    pub fn time_until_reset(&self, now: SystemTime) -> Duration {
        UNIX_EPOCH
            .checked_add(Duration::from_secs(self.reset_at))
            .and_then(|reset| reset.duration_since(now).ok())
            .unwrap_or(Duration::ZERO)
    }
}

fn numeric_header<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use http::header::{HeaderMap, HeaderValue};
    use rstest::rstest;

    use super::RateLimitInfo;

    #[rstest]
    fn reads_rate_limit_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", HeaderValue::from_static("5000"));
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        let info = RateLimitInfo::from_headers(&headers);

        assert_eq!(info, RateLimitInfo::new(5000, 0, 1_700_000_000));
        assert!(info.is_exhausted());
    }

    #[rstest]
    fn missing_headers_read_as_zero() {
        let info = RateLimitInfo::from_headers(&HeaderMap::new());

        assert_eq!(info, RateLimitInfo::default());
        assert_eq!(
            info.time_until_reset(UNIX_EPOCH + Duration::from_secs(10)),
            Duration::ZERO
        );
    }

    #[rstest]
    fn garbage_header_values_read_as_zero() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("lots"));

        assert_eq!(RateLimitInfo::from_headers(&headers).remaining(), 0);
    }

    #[rstest]
    #[case::reset_in_future(1_000, 995, Duration::from_secs(5))]
    #[case::reset_now(1_000, 1_000, Duration::ZERO)]
    #[case::reset_in_past(1_000, 1_200, Duration::ZERO)]
    #[case::reset_beyond_clock_range(u64::MAX, 1_000, Duration::ZERO)]
    fn time_until_reset_is_clamped_at_zero(
        #[case] reset_at: u64,
        #[case] now_secs: u64,
        #[case] expected: Duration,
    ) {
        let info = RateLimitInfo::new(5000, 0, reset_at);
        let now = UNIX_EPOCH + Duration::from_secs(now_secs);

        assert_eq!(info.time_until_reset(now), expected);
    }

    #[rstest]
    fn oversized_reset_header_means_no_wait() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        headers.insert(
            "x-ratelimit-reset",
            HeaderValue::from_static("18446744073709551615"),
        );

        let info = RateLimitInfo::from_headers(&headers);

        assert_eq!(info.reset_at(), u64::MAX);
        assert_eq!(info.time_until_reset(SystemTime::now()), Duration::ZERO);
    }
}
