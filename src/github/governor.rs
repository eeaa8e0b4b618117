//! Cooperative pacing of GitHub requests against a shared rate budget.
//!
//! Every gateway built for the same personal access token shares one
//! [`RateGovernor`]. When a response reports an exhausted budget the flow
//! that observed it sleeps until the reset time and records that deadline, so
//! other flows spending the same budget hold their next request until the
//! window reopens. The deadline lock is never held across a sleep.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use std::time::SystemTime;

use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use super::locator::PersonalAccessToken;
use super::rate_limit::RateLimitInfo;

/// Governors by token value. Entries live for the rest of the process.
static GOVERNORS: LazyLock<Mutex<HashMap<String, Arc<RateGovernor>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Suspends request flows while the shared rate budget is exhausted.
#[derive(Debug, Default)]
pub struct RateGovernor {
    paused_until: Mutex<Option<Instant>>,
}

impl RateGovernor {
    /// Creates a governor that is not shared with any other credential.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            paused_until: Mutex::new(None),
        }
    }

    /// Returns the process-wide governor for `token`.
    ///
    /// Repeated calls with the same token return the same instance, which is
    /// kept until the process exits.
    #[must_use]
    pub fn for_credential(token: &PersonalAccessToken) -> Arc<Self> {
        let mut governors = GOVERNORS.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(governors.entry(token.value().to_owned()).or_default())
    }

    /// Waits until any pause recorded by another flow has elapsed.
    pub async fn await_clearance(&self) {
        let Some(deadline) = self.pause_deadline() else {
            return;
        };
        if deadline > Instant::now() {
            debug!("rate limit pause in effect; holding request");
            sleep_until(deadline).await;
        }
    }

    /// Suspends the calling flow until the window resets when `info` shows no
    /// remaining requests, then returns the remaining count.
    pub async fn pace(&self, info: &RateLimitInfo) -> u32 {
        self.pace_at(info, SystemTime::now()).await
    }

    pub(crate) async fn pace_at(&self, info: &RateLimitInfo, now: SystemTime) -> u32 {
        if !info.is_exhausted() {
            return info.remaining();
        }

        let wait = info.time_until_reset(now);
        if wait.is_zero() {
            debug!(reset_at = info.reset_at(), "rate limit window already reset");
            return info.remaining();
        }

        let Some(deadline) = Instant::now().checked_add(wait) else {
            warn!(reset_at = info.reset_at(), "rate limit reset is out of range");
            return info.remaining();
        };

        info!(
            wait_ms = wait.as_millis(),
            reset_at = info.reset_at(),
            "no remaining requests; waiting for rate limit reset"
        );
        self.extend_pause(deadline);
        sleep_until(deadline).await;
        info.remaining()
    }

    fn extend_pause(&self, deadline: Instant) {
        let mut paused = self
            .paused_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if paused.is_none_or(|current| current < deadline) {
            *paused = Some(deadline);
        }
    }

    fn pause_deadline(&self) -> Option<Instant> {
        *self
            .paused_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
