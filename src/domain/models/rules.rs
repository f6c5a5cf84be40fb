//! Rule table for deriving Jira fields from GitLab issues.
//!
//! The defaults reproduce the hardcoded behavior of the first migration
//! runs. Every rule can be overridden from the `rules` section of the
//! configuration file.

use serde::{Deserialize, Serialize};

use super::jira::{IssueStatus, IssueType};

/// Rules applied to each issue after its project key is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MappingRules {
    /// Project key whose issues are always imported as epics
    #[serde(default = "default_epic_project")]
    pub epic_project: String,

    /// Label marking an issue as a bug
    #[serde(default = "default_bug_label")]
    pub bug_label: String,

    /// Label that keeps a closed issue in "To Do"
    #[serde(default = "default_wont_fix_label")]
    pub wont_fix_label: String,

    /// GitLab state value of a closed issue
    #[serde(default = "default_closed_state")]
    pub closed_state: String,

    /// Labels copied to Jira verbatim
    #[serde(default = "default_kept_labels")]
    pub kept_labels: Vec<String>,

    /// Label prefixes that are stripped, keeping the remainder as a label
    #[serde(default = "default_strip_prefixes")]
    pub strip_prefixes: Vec<String>,

    /// Text placed before the issue URL in the trailing comment
    #[serde(default = "default_trailer_prefix")]
    pub trailer_prefix: String,
}

fn default_epic_project() -> String {
    "ENG".to_string()
}

fn default_bug_label() -> String {
    "bug".to_string()
}

fn default_wont_fix_label() -> String {
    "status:wont-fix".to_string()
}

fn default_closed_state() -> String {
    "closed".to_string()
}

fn default_kept_labels() -> Vec<String> {
    vec!["cost".to_string(), "monetize".to_string()]
}

fn default_strip_prefixes() -> Vec<String> {
    vec!["topic::".to_string()]
}

fn default_trailer_prefix() -> String {
    "Imported from ".to_string()
}

impl Default for MappingRules {
    fn default() -> Self {
        Self {
            epic_project: default_epic_project(),
            bug_label: default_bug_label(),
            wont_fix_label: default_wont_fix_label(),
            closed_state: default_closed_state(),
            kept_labels: default_kept_labels(),
            strip_prefixes: default_strip_prefixes(),
            trailer_prefix: default_trailer_prefix(),
        }
    }
}

impl MappingRules {
    /// Derive the Jira issue type.
    ///
    /// The epic project wins over everything else, labels are not looked
    /// at in that case.
    pub fn issue_type(&self, project_key: &str, labels: &[String]) -> IssueType {
        if project_key == self.epic_project {
            IssueType::Epic
        } else if labels.iter().any(|l| *l == self.bug_label) {
            IssueType::Bug
        } else {
            IssueType::Story
        }
    }

    /// Derive the Jira status.
    ///
    /// Closed issues are done unless they carry the wont-fix label; wont-fix
    /// work is not considered completed.
    pub fn status(&self, state: &str, labels: &[String]) -> IssueStatus {
        let wont_fix = labels.iter().any(|l| *l == self.wont_fix_label);
        if state == self.closed_state && !wont_fix {
            IssueStatus::Done
        } else {
            IssueStatus::ToDo
        }
    }

    /// Project GitLab labels onto Jira labels, preserving order.
    pub fn derive_labels(&self, labels: &[String]) -> Vec<String> {
        labels
            .iter()
            .filter_map(|label| {
                if self.kept_labels.contains(label) {
                    return Some(label.clone());
                }
                self.strip_prefixes
                    .iter()
                    .find_map(|prefix| label.strip_prefix(prefix.as_str()))
                    .map(str::to_string)
            })
            .collect()
    }

    /// Body of the comment appended to every imported issue.
    pub fn trailer(&self, web_url: &str) -> String {
        format!("{}{}", self.trailer_prefix, web_url)
    }
}
