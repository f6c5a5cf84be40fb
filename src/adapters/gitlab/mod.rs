//! GitLab adapter.
//!
//! Reads group issues, project metadata and issue discussions from the
//! GitLab REST API v4 and exposes them through the
//! [`IssueTracker`](crate::domain::ports::IssueTracker) port.

pub mod client;
pub mod models;

pub use client::GitLabClient;
