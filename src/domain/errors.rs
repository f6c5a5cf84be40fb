//! Domain errors for the GitLab to Jira export.
//!
//! Every variant is fatal: the pipeline stops at the first error and no
//! export file is written.

use std::path::PathBuf;

use thiserror::Error;

use crate::infrastructure::config::ConfigError;

/// Errors that can abort an export run.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("GitLab {operation} failed: {message}")]
    Remote { operation: String, message: String },

    #[error(
        "Issue '{title}' ({web_url}) does not belong to any Jira project \
         (no mapped label, repository '{}' is not mapped)",
        repo_path.as_deref().unwrap_or("<unknown>")
    )]
    UnassignableIssue {
        title: String,
        web_url: String,
        repo_path: Option<String>,
    },

    #[error("Failed to write export to {}: {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    /// Build a [`DomainError::Remote`] for the given GitLab operation.
    pub fn remote(operation: &str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
