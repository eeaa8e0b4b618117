//! Complete, ordered comment history of a thread.

use tracing::debug;

use crate::github::gateway::ThreadGateway;
use crate::github::governor::RateGovernor;
use crate::github::locator::ThreadNumber;
use crate::github::models::{Comment, Rendering};
use crate::github::pagination::PageRequest;

/// Walks the comment pages of a thread through a gateway.
///
/// Each page request waits for any rate limit pause first and feeds the
/// response's rate limit headers to the governor afterwards.
pub struct CommentFetcher<'client, Gateway>
where
    Gateway: ThreadGateway,
{
    gateway: &'client Gateway,
    governor: &'client RateGovernor,
}

impl<'client, Gateway> CommentFetcher<'client, Gateway>
where
    Gateway: ThreadGateway,
{
    /// Creates a fetcher over `gateway`, paced by `governor`.
    #[must_use]
    pub const fn new(gateway: &'client Gateway, governor: &'client RateGovernor) -> Self {
        Self { gateway, governor }
    }

    /// Fetches every comment of `number`, oldest first.
    ///
    /// Pages of 100 are requested until an empty page comes back. A failed
    /// request ends pagination and the comments gathered so far are
    /// returned, so a short result may be incomplete.
    pub async fn fetch_all_comments(
        &self,
        number: ThreadNumber,
        rendering: Rendering,
    ) -> Vec<Comment> {
        let mut comments = Vec::new();
        let mut page = PageRequest::first();

        loop {
            self.governor.await_clearance().await;

            let fetched = match self.gateway.list_comments(number, page, rendering).await {
                Ok(fetched) => fetched,
                Err(error) => {
                    debug!(
                        number = number.get(),
                        page = page.page(),
                        ?rendering,
                        %error,
                        "comment pagination stopped early"
                    );
                    break;
                }
            };

            self.governor.pace(&fetched.rate_limit).await;

            if fetched.items.is_empty() {
                break;
            }
            comments.extend(fetched.items);
            page = page.next();
        }

        comments
    }
}
