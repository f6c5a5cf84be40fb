//! Export pipeline: fetch, map, bucket.
//!
//! The run is fail-fast. The first error from any stage aborts it and
//! already-mapped issues are discarded, so callers never see a partial
//! result.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::domain::errors::DomainResult;
use crate::domain::models::{MappedIssue, ProjectBuckets, SourceIssue};
use crate::domain::ports::IssueTracker;

use super::issue_fetcher::fetch_all_issues;
use super::issue_mapper::IssueMapper;

/// Receives progress notifications while the pipeline runs.
///
/// All methods default to no-ops.
pub trait ProgressSink: Send + Sync {
    /// Called once, after the full issue list is known.
    fn fetched(&self, _total: usize) {}

    /// Called when an issue starts being examined.
    fn examining(&self, _issue: &SourceIssue) {}

    /// Called when an issue has been mapped to `project_key`.
    fn mapped(&self, _project_key: &str) {}
}

/// Sink that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Runs the fetch and map stages against an [`IssueTracker`].
pub struct MigrationService {
    tracker: Arc<dyn IssueTracker>,
    mapper: IssueMapper,
    group: String,
    per_page: u32,
    concurrency: usize,
    progress: Arc<dyn ProgressSink>,
}

impl MigrationService {
    pub fn new(
        tracker: Arc<dyn IssueTracker>,
        mapper: IssueMapper,
        group: impl Into<String>,
        per_page: u32,
    ) -> Self {
        Self {
            tracker,
            mapper,
            group: group.into(),
            per_page,
            concurrency: 1,
            progress: Arc::new(NoProgress),
        }
    }

    /// Map up to `concurrency` issues at once. Output order is unchanged.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Fetch every issue of the group and map it into its project bucket.
    ///
    /// Issues are processed oldest first. With a concurrency above one,
    /// results are buffered and reassembled in that same order, so the
    /// buckets are identical to a sequential run.
    pub async fn run(&self) -> DomainResult<ProjectBuckets> {
        let tracker = self.tracker.as_ref();
        let issues = fetch_all_issues(tracker, &self.group, self.per_page).await?;
        self.progress.fetched(issues.len());

        let mapped: Vec<(String, MappedIssue)> = stream::iter(issues.iter())
            .map(|issue| self.map_one(tracker, issue))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let mut buckets = ProjectBuckets::new();
        for (key, issue) in mapped {
            buckets.push(key, issue);
        }

        tracing::info!(
            projects = buckets.project_count(),
            issues = buckets.issue_count(),
            "all issues mapped"
        );
        Ok(buckets)
    }

    async fn map_one(
        &self,
        tracker: &dyn IssueTracker,
        issue: &SourceIssue,
    ) -> DomainResult<(String, MappedIssue)> {
        tracing::info!(iid = issue.iid, project_id = issue.project_id, "Examining '{}'", issue.title);
        self.progress.examining(issue);

        let (key, mapped) = self.mapper.map_issue(tracker, issue).await?;
        self.progress.mapped(&key);
        Ok((key, mapped))
    }
}
