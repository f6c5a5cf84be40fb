//! Common test utilities for integration tests
//!
//! Provides shared fixtures and builders used across the integration
//! test files.

#![allow(dead_code)]

use std::collections::HashMap;

use gitlab2jira::domain::models::{Config, SourceIssue};
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A source issue in project 7 with the given labels.
pub fn source_issue(iid: u64, title: &str, labels: &[&str]) -> SourceIssue {
    SourceIssue {
        id: 1000 + iid,
        iid,
        project_id: 7,
        title: title.to_string(),
        description: format!("Description of {title}"),
        state: "opened".to_string(),
        labels: labels.iter().map(|s| (*s).to_string()).collect(),
        web_url: format!("https://gitlab.com/k-t-corp/web/-/issues/{iid}"),
    }
}

/// Config mapping `eng-project` to ENG and `k-t-corp/web` to WEB, writing
/// to `export_path`.
pub fn test_config(export_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.gitlab_token = "glpat-test".to_string();
    config.label_to_project = HashMap::from([("eng-project".to_string(), "ENG".to_string())]);
    config.repo_to_project = HashMap::from([("k-t-corp/web".to_string(), "WEB".to_string())]);
    config.export.path = export_path.display().to_string();
    config
}

/// GitLab API JSON for one issue.
pub fn issue_json(iid: u64, title: &str, state: &str, labels: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "id": 1000 + iid,
        "iid": iid,
        "project_id": 7,
        "title": title,
        "description": null,
        "state": state,
        "labels": labels,
        "web_url": format!("https://gitlab.com/k-t-corp/web/-/issues/{iid}"),
        "created_at": "2024-01-01T00:00:00Z"
    })
}
