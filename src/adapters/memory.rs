//! In-memory issue tracker for testing.
//!
//! Serves issues in pages, records every call, and can be told to fail
//! specific operations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{SourceDiscussion, SourceIssue, SourceNote};
use crate::domain::ports::IssueTracker;

/// A call made against the tracker, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    ListGroupIssues { group: String, page: u32, per_page: u32 },
    ProjectPath(u64),
    IssueDiscussions { project_id: u64, issue_iid: u64 },
}

/// Issue tracker backed by in-memory data.
#[derive(Debug, Default)]
pub struct InMemoryIssueTracker {
    /// Issues in "server" order (newest first, like GitLab).
    issues: Vec<SourceIssue>,
    project_paths: HashMap<u64, String>,
    discussions: HashMap<(u64, u64), Vec<SourceDiscussion>>,
    /// Operation names that return a remote error.
    failing: Vec<String>,
    calls: Mutex<Vec<TrackerCall>>,
}

impl InMemoryIssueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue at the end of the server-order listing.
    #[must_use]
    pub fn with_issue(mut self, issue: SourceIssue) -> Self {
        self.issues.push(issue);
        self
    }

    #[must_use]
    pub fn with_project(mut self, project_id: u64, path: impl Into<String>) -> Self {
        self.project_paths.insert(project_id, path.into());
        self
    }

    /// Add a discussion thread made of `(body, system)` notes.
    #[must_use]
    pub fn with_discussion(mut self, project_id: u64, issue_iid: u64, notes: &[(&str, bool)]) -> Self {
        let discussion = SourceDiscussion {
            notes: notes
                .iter()
                .map(|(body, system)| SourceNote {
                    body: (*body).to_string(),
                    system: *system,
                })
                .collect(),
        };
        self.discussions
            .entry((project_id, issue_iid))
            .or_default()
            .push(discussion);
        self
    }

    /// Make `operation` (`list_group_issues`, `get_project` or
    /// `list_issue_discussions`) fail.
    #[must_use]
    pub fn failing(mut self, operation: &str) -> Self {
        self.failing.push(operation.to_string());
        self
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: TrackerCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check(&self, operation: &str) -> DomainResult<()> {
        if self.failing.iter().any(|op| op == operation) {
            return Err(DomainError::remote(operation, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn list_group_issues(
        &self,
        group: &str,
        page: u32,
        per_page: u32,
    ) -> DomainResult<Vec<SourceIssue>> {
        self.record(TrackerCall::ListGroupIssues {
            group: group.to_string(),
            page,
            per_page,
        });
        self.check("list_group_issues")?;

        let size = per_page.max(1) as usize;
        let start = (page.max(1) as usize - 1) * size;
        Ok(self.issues.iter().skip(start).take(size).cloned().collect())
    }

    async fn project_path(&self, project_id: u64) -> DomainResult<String> {
        self.record(TrackerCall::ProjectPath(project_id));
        self.check("get_project")?;

        self.project_paths
            .get(&project_id)
            .cloned()
            .ok_or_else(|| DomainError::remote("get_project", format!("returned 404 Not Found: project {project_id}")))
    }

    async fn issue_discussions(
        &self,
        project_id: u64,
        issue_iid: u64,
    ) -> DomainResult<Vec<SourceDiscussion>> {
        self.record(TrackerCall::IssueDiscussions { project_id, issue_iid });
        self.check("list_issue_discussions")?;

        Ok(self
            .discussions
            .get(&(project_id, issue_iid))
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(iid: u64) -> SourceIssue {
        SourceIssue {
            id: iid,
            iid,
            project_id: 1,
            title: format!("Issue {iid}"),
            description: String::new(),
            state: "opened".to_string(),
            labels: vec![],
            web_url: format!("https://gitlab.com/g/r/-/issues/{iid}"),
        }
    }

    #[tokio::test]
    async fn test_pages_are_sliced_by_per_page() {
        let tracker = InMemoryIssueTracker::new()
            .with_issue(issue(3))
            .with_issue(issue(2))
            .with_issue(issue(1));

        let first = tracker.list_group_issues("g", 1, 2).await.unwrap();
        let second = tracker.list_group_issues("g", 2, 2).await.unwrap();
        let third = tracker.list_group_issues("g", 3, 2).await.unwrap();

        assert_eq!(first.iter().map(|i| i.iid).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(second.iter().map(|i| i.iid).collect::<Vec<_>>(), vec![1]);
        assert!(third.is_empty());
        assert_eq!(tracker.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let tracker = InMemoryIssueTracker::new().failing("get_project");
        let err = tracker.project_path(1).await.unwrap_err();
        assert!(err.to_string().contains("injected failure"));
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let tracker = InMemoryIssueTracker::new();
        assert!(tracker.project_path(99).await.is_err());
    }
}
