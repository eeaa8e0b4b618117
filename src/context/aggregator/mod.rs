//! Building the linked context of a root issue.
//!
//! A build walks `root lookup → body check → reference extraction →
//! enrichment`. Missing roots, empty bodies and bodies without references end
//! the walk early with an explicit [`ContextOutcome`]. During enrichment each
//! referenced thread is looked up, introduced by a banner record and followed
//! by its qualifying comments; any failure there aborts the whole build.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::error::AggregationError;
use super::fetcher::CommentFetcher;
use super::lookup::ThreadLookup;
use super::record::{ANSWER_MARKER, ContextOutcome, LinkedContext, StreamlinedRecord};
use super::references::ReferenceExtractor;
use crate::github::gateway::ThreadGateway;
use crate::github::governor::RateGovernor;
use crate::github::locator::ThreadNumber;
use crate::github::models::{AuthorKind, Comment, Rendering, ThreadKind};

/// Default number of referenced threads enriched at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Tuning for a context build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Fetch each referenced thread once even when it is mentioned repeatedly.
    pub dedupe_references: bool,
    /// Referenced threads enriched concurrently; zero is treated as one.
    pub max_concurrency: usize,
    /// Bound on the whole build; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            dedupe_references: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout: None,
        }
    }
}

/// Collects the context of the threads a root issue links to.
pub struct LinkedContextBuilder<'client, Gateway>
where
    Gateway: ThreadGateway,
{
    gateway: &'client Gateway,
    governor: Arc<RateGovernor>,
    extractor: ReferenceExtractor,
    options: AggregationOptions,
}

impl<'client, Gateway> LinkedContextBuilder<'client, Gateway>
where
    Gateway: ThreadGateway,
{
    /// Create a builder using the provided gateway and rate governor.
    #[must_use]
    pub fn new(gateway: &'client Gateway, governor: Arc<RateGovernor>) -> Self {
        Self {
            gateway,
            governor,
            extractor: ReferenceExtractor::default(),
            options: AggregationOptions::default(),
        }
    }

    /// Recognise reference URLs with `extractor` instead of `github.com`.
    #[must_use]
    pub fn with_extractor(mut self, extractor: ReferenceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Replace the build options.
    #[must_use]
    pub const fn with_options(mut self, options: AggregationOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the linked context of issue `root`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::AggregationFailed`] when enriching a
    /// referenced thread fails and [`AggregationError::TimedOut`] when the
    /// configured bound elapses. Neither carries partial results.
    pub async fn build(&self, root: ThreadNumber) -> Result<ContextOutcome, AggregationError> {
        let Some(bound) = self.options.timeout else {
            return self.build_unbounded(root).await;
        };

        tokio::time::timeout(bound, self.build_unbounded(root))
            .await
            .map_err(|_| AggregationError::TimedOut {
                seconds: bound.as_secs(),
            })?
    }

    async fn build_unbounded(
        &self,
        root: ThreadNumber,
    ) -> Result<ContextOutcome, AggregationError> {
        let lookup = ThreadLookup::new(self.gateway, &self.governor);
        let Some(root_thread) = lookup.get_thread(root, ThreadKind::Issue).await else {
            info!(root = root.get(), "root issue could not be fetched");
            return Ok(ContextOutcome::RootNotFound { number: root });
        };

        let Some(body) = root_thread.body.as_deref().filter(|body| !body.is_empty()) else {
            info!(root = root.get(), "root issue has no body");
            return Ok(ContextOutcome::EmptyBody { number: root });
        };

        let mut references = self.extractor.extract(body);
        if self.options.dedupe_references {
            references = references.deduplicated();
        }
        if references.is_empty() {
            info!(root = root.get(), "no linked issues or pull requests found");
            return Ok(ContextOutcome::Linked(LinkedContext::default()));
        }
        debug!(
            root = root.get(),
            issues = references.issues.len(),
            pulls = references.pulls.len(),
            "enriching references"
        );

        let linked_pulls = self.enrich_all(&references.pulls, ThreadKind::Pull).await?;
        let linked_issues = self
            .enrich_all(&references.issues, ThreadKind::Issue)
            .await?;

        Ok(ContextOutcome::Linked(LinkedContext {
            linked_issues,
            linked_pulls,
        }))
    }

    /// Enriches `numbers` concurrently and concatenates the records in
    /// mention order.
    async fn enrich_all(
        &self,
        numbers: &[ThreadNumber],
        kind: ThreadKind,
    ) -> Result<Vec<StreamlinedRecord>, AggregationError> {
        let batches: Vec<Vec<StreamlinedRecord>> = stream::iter(numbers.iter().copied())
            .map(|number| self.enrich(number, kind))
            .buffered(self.options.max_concurrency.max(1))
            .try_collect()
            .await
            .inspect_err(|error| info!(%error, "enrichment aborted"))?;

        Ok(batches.into_iter().flatten().collect())
    }

    async fn enrich(
        &self,
        number: ThreadNumber,
        kind: ThreadKind,
    ) -> Result<Vec<StreamlinedRecord>, AggregationError> {
        let lookup = ThreadLookup::new(self.gateway, &self.governor);
        let Some(thread) = lookup.get_thread(number, kind).await else {
            return Ok(Vec::new());
        };

        let fetcher = CommentFetcher::new(self.gateway, &self.governor);
        let (rendered, raw) = tokio::join!(
            fetcher.fetch_all_comments(number, Rendering::Full),
            fetcher.fetch_all_comments(number, Rendering::Raw),
        );

        let mut records = Vec::with_capacity(rendered.len() + 1);
        records.push(StreamlinedRecord::banner(&thread));
        for (position, comment) in rendered.into_iter().enumerate() {
            if qualifies(&comment, raw.get(position), number, kind)? {
                records.push(comment.into());
            }
        }
        Ok(records)
    }
}

/// A rendered comment qualifies when a person wrote it or when its raw
/// counterpart at the same position carries [`ANSWER_MARKER`].
fn qualifies(
    comment: &Comment,
    raw: Option<&Comment>,
    number: ThreadNumber,
    kind: ThreadKind,
) -> Result<bool, AggregationError> {
    if comment.author.kind == AuthorKind::Human {
        return Ok(true);
    }

    let raw_comment = raw.ok_or_else(|| AggregationError::AggregationFailed {
        message: format!(
            "{label} #{number}: raw rendering of comment {id} is missing",
            label = kind.label(),
            id = comment.id,
        ),
    })?;
    Ok(raw_comment.body_contains(ANSWER_MARKER))
}
