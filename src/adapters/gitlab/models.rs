//! GitLab REST API v4 response models.
//!
//! These structs map to the GitLab JSON payloads. They are used internally
//! by the GitLab adapter and converted into the domain's source models
//! before leaving it.

use serde::{Deserialize, Serialize};

use crate::domain::models::{SourceDiscussion, SourceIssue, SourceNote};

/// An issue returned by `GET /groups/:id/issues`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabIssue {
    /// Instance-wide unique id.
    pub id: u64,
    /// Issue number within its project (e.g., 42 → "#42").
    pub iid: u64,
    /// Id of the project the issue belongs to.
    pub project_id: u64,
    /// Issue title.
    pub title: String,
    /// Markdown description (may be null).
    #[serde(default)]
    pub description: Option<String>,
    /// Current state: "opened" or "closed".
    pub state: String,
    /// Label names applied to the issue.
    #[serde(default)]
    pub labels: Vec<String>,
    /// URL to view the issue in the GitLab UI.
    pub web_url: String,
    /// ISO 8601 timestamp of creation.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<GitLabIssue> for SourceIssue {
    fn from(issue: GitLabIssue) -> Self {
        Self {
            id: issue.id,
            iid: issue.iid,
            project_id: issue.project_id,
            title: issue.title,
            description: issue.description.unwrap_or_default(),
            state: issue.state,
            labels: issue.labels,
            web_url: issue.web_url,
        }
    }
}

/// The subset of `GET /projects/:id` used for repository lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabProject {
    pub id: u64,
    /// Full path, e.g. "k-t-corp/web".
    pub path_with_namespace: String,
}

/// A discussion thread returned by `GET /projects/:id/issues/:iid/discussions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabDiscussion {
    /// Discussion id (a SHA, not numeric).
    pub id: String,
    /// True for single comments that are not part of a thread.
    #[serde(default)]
    pub individual_note: bool,
    #[serde(default)]
    pub notes: Vec<GitLabNote>,
}

/// One note inside a discussion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabNote {
    pub id: u64,
    pub body: String,
    /// Set on notes GitLab generates itself (label changes, closes, ...).
    #[serde(default)]
    pub system: bool,
}

impl From<GitLabDiscussion> for SourceDiscussion {
    fn from(discussion: GitLabDiscussion) -> Self {
        Self {
            notes: discussion
                .notes
                .into_iter()
                .map(|n| SourceNote {
                    body: n.body,
                    system: n.system,
                })
                .collect(),
        }
    }
}
