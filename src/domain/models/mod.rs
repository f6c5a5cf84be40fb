pub mod bucket;
pub mod config;
pub mod jira;
pub mod rules;
pub mod source;

pub use bucket::ProjectBuckets;
pub use config::{Config, ExportConfig, LoggingConfig, SourceConfig};
pub use jira::{IssueStatus, IssueType, JiraComment, JiraExport, JiraProject, MappedIssue};
pub use rules::MappingRules;
pub use source::{SourceDiscussion, SourceIssue, SourceNote};
