//! Tolerant lookup of single issues and pull requests.

use tracing::debug;

use crate::github::gateway::ThreadGateway;
use crate::github::governor::RateGovernor;
use crate::github::locator::ThreadNumber;
use crate::github::models::{Thread, ThreadKind};

/// Fetches thread snapshots, reporting failures as absence.
pub struct ThreadLookup<'client, Gateway>
where
    Gateway: ThreadGateway,
{
    gateway: &'client Gateway,
    governor: &'client RateGovernor,
}

impl<'client, Gateway> ThreadLookup<'client, Gateway>
where
    Gateway: ThreadGateway,
{
    /// Creates a lookup over `gateway`, holding requests during rate limit
    /// pauses recorded on `governor`.
    #[must_use]
    pub const fn new(gateway: &'client Gateway, governor: &'client RateGovernor) -> Self {
        Self { gateway, governor }
    }

    /// Fetches issue or pull request `number`.
    ///
    /// `None` means the fetch failed or the thread does not exist; the cause
    /// is logged at debug level.
    pub async fn get_thread(&self, number: ThreadNumber, kind: ThreadKind) -> Option<Thread> {
        self.governor.await_clearance().await;

        let result = match kind {
            ThreadKind::Issue => self.gateway.issue(number).await,
            ThreadKind::Pull => self.gateway.pull_request(number).await,
        };

        match result {
            Ok(thread) => Some(thread),
            Err(error) => {
                debug!(
                    number = number.get(),
                    kind = kind.label(),
                    %error,
                    "fetching thread failed"
                );
                None
            }
        }
    }
}
