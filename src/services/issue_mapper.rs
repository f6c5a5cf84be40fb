//! Maps GitLab issues onto Jira issues.
//!
//! Project resolution is ordered and first-match-wins: mapped labels are
//! checked before the parent repository, which costs a remote call. Type,
//! status and labels come from the [`MappingRules`] table; comments come
//! from the issue's discussions plus a trailer pointing back at GitLab.

use std::collections::HashMap;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Config, JiraComment, MappedIssue, MappingRules, SourceDiscussion, SourceIssue,
};
use crate::domain::ports::IssueTracker;

/// Stateless mapper from source issues to Jira issues.
#[derive(Debug, Clone)]
pub struct IssueMapper {
    rules: MappingRules,
    label_to_project: HashMap<String, String>,
    repo_to_project: HashMap<String, String>,
}

impl IssueMapper {
    pub fn new(
        rules: MappingRules,
        label_to_project: HashMap<String, String>,
        repo_to_project: HashMap<String, String>,
    ) -> Self {
        Self {
            rules,
            label_to_project,
            repo_to_project,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.rules.clone(),
            config.label_to_project.clone(),
            config.repo_to_project.clone(),
        )
    }

    pub fn rules(&self) -> &MappingRules {
        &self.rules
    }

    /// Project key of the first label, in label order, present in the
    /// label table.
    ///
    /// The scan stops at that label. If it is mapped to an empty key the
    /// issue has no label match, even when a later label is mapped.
    pub fn project_for_labels(&self, labels: &[String]) -> Option<&str> {
        labels
            .iter()
            .find_map(|label| self.label_to_project.get(label))
            .map(String::as_str)
            .filter(|key| !key.is_empty())
    }

    /// Project key for a `namespace/repo` path.
    pub fn project_for_repo(&self, path: &str) -> Option<&str> {
        self.repo_to_project
            .get(path)
            .map(String::as_str)
            .filter(|key| !key.is_empty())
    }

    /// Resolve the Jira project key of an issue.
    ///
    /// The parent repository is only fetched when no label matches. An
    /// issue matching neither table is a configuration error.
    pub async fn resolve_project(
        &self,
        tracker: &dyn IssueTracker,
        issue: &SourceIssue,
    ) -> DomainResult<String> {
        if let Some(key) = self.project_for_labels(&issue.labels) {
            tracing::debug!(iid = issue.iid, project = key, "project resolved by label");
            return Ok(key.to_string());
        }

        let repo_path = tracker.project_path(issue.project_id).await?;
        if let Some(key) = self.project_for_repo(&repo_path) {
            tracing::debug!(iid = issue.iid, repo = %repo_path, project = key, "project resolved by repository");
            return Ok(key.to_string());
        }

        Err(DomainError::UnassignableIssue {
            title: issue.title.clone(),
            web_url: issue.web_url.clone(),
            repo_path: Some(repo_path),
        })
    }

    /// Flatten discussions into comments, dropping system notes, and append
    /// the trailer. The trailer is always the last comment.
    pub fn comments(&self, discussions: &[SourceDiscussion], web_url: &str) -> Vec<JiraComment> {
        discussions
            .iter()
            .flat_map(|d| d.notes.iter())
            .filter(|note| !note.system)
            .map(|note| JiraComment::new(note.body.clone()))
            .chain(std::iter::once(JiraComment::new(self.rules.trailer(web_url))))
            .collect()
    }

    /// Build the Jira issue once the project key and discussions are known.
    pub fn build(
        &self,
        project_key: &str,
        issue: &SourceIssue,
        discussions: &[SourceDiscussion],
    ) -> MappedIssue {
        MappedIssue {
            issue_type: self.rules.issue_type(project_key, &issue.labels),
            status: self.rules.status(&issue.state, &issue.labels),
            summary: issue.title.clone(),
            description: issue.description.clone(),
            labels: self.rules.derive_labels(&issue.labels),
            comments: self.comments(discussions, &issue.web_url),
        }
    }

    /// Map one issue: resolve its project, fetch its discussions, build it.
    ///
    /// Returns the project key together with the mapped issue.
    pub async fn map_issue(
        &self,
        tracker: &dyn IssueTracker,
        issue: &SourceIssue,
    ) -> DomainResult<(String, MappedIssue)> {
        let project_key = self.resolve_project(tracker, issue).await?;
        let discussions = tracker
            .issue_discussions(issue.project_id, issue.iid)
            .await?;
        let mapped = self.build(&project_key, issue, &discussions);
        Ok((project_key, mapped))
    }
}
