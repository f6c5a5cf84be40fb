//! gitlab2jira - GitLab group issues to Jira import document
//!
//! Fetches every issue of a GitLab group, assigns each one to a Jira
//! project through label and repository lookup tables, derives its type,
//! status and labels from a rule table, attaches its discussion notes as
//! comments and writes the result as a Jira JSON import file.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): export models, mapping rules, the `IssueTracker` port
//! - **Adapters** (`adapters`): GitLab REST client and an in-memory tracker
//! - **Service Layer** (`services`): fetch, map and export stages
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gitlab2jira::{ConfigLoader, Exporter, GitLabClient, IssueMapper, MigrationService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load_from_file("config.json")?;
//!     let client = Arc::new(GitLabClient::from_config(&config)?);
//!     let buckets = MigrationService::new(
//!         client,
//!         IssueMapper::from_config(&config),
//!         config.source.group.clone(),
//!         config.source.per_page,
//!     )
//!     .run()
//!     .await?;
//!     Exporter::write(config.export.path.as_ref(), &Exporter::build(buckets)).await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::gitlab::GitLabClient;
pub use adapters::memory::InMemoryIssueTracker;
pub use domain::models::{
    Config, IssueStatus, IssueType, JiraExport, MappedIssue, MappingRules, ProjectBuckets,
    SourceIssue,
};
pub use domain::ports::IssueTracker;
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Exporter, IssueMapper, MigrationService};
