//! Issue tracker port.
//!
//! The export pipeline reads from the source tracker exclusively through
//! this trait. The GitLab adapter implements it over HTTP; tests use the
//! in-memory tracker.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{SourceDiscussion, SourceIssue};

/// Read-only access to the issues of a source tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// List one page of the issues belonging to `group`.
    ///
    /// Pages are numbered from 1. An empty page marks the end of the
    /// listing.
    async fn list_group_issues(
        &self,
        group: &str,
        page: u32,
        per_page: u32,
    ) -> DomainResult<Vec<SourceIssue>>;

    /// Namespaced path (`namespace/repo`) of the project with the given id.
    async fn project_path(&self, project_id: u64) -> DomainResult<String>;

    /// All discussion threads of an issue, in tracker order.
    async fn issue_discussions(
        &self,
        project_id: u64,
        issue_iid: u64,
    ) -> DomainResult<Vec<SourceDiscussion>>;
}
