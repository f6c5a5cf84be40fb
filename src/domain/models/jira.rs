//! Jira import document model.
//!
//! Field names and order follow the Jira JSON importer format.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Jira issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueType {
    Epic,
    Bug,
    Story,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epic => write!(f, "Epic"),
            Self::Bug => write!(f, "Bug"),
            Self::Story => write!(f, "Story"),
        }
    }
}

/// Jira workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueStatus {
    #[serde(rename = "To Do")]
    ToDo,
    Done,
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToDo => write!(f, "To Do"),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// A single comment on an imported issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraComment {
    pub body: String,
}

impl JiraComment {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// An issue ready for import, built once per GitLab issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedIssue {
    pub issue_type: IssueType,
    pub status: IssueStatus,
    pub summary: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<JiraComment>,
}

/// All issues destined for one Jira project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraProject {
    pub key: String,
    pub issues: Vec<MappedIssue>,
}

/// Root of the export document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraExport {
    pub projects: Vec<JiraProject>,
}

impl JiraExport {
    /// Total number of issues across all projects.
    pub fn issue_count(&self) -> usize {
        self.projects.iter().map(|p| p.issues.len()).sum()
    }
}
