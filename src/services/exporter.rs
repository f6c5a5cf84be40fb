//! Serializes mapped issues into the Jira import document.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{JiraExport, ProjectBuckets};

/// Indentation of the export document.
const INDENT: &[u8] = b"    ";

/// Builds and writes the export document.
pub struct Exporter;

impl Exporter {
    /// Wrap the buckets into the export document, projects in key order.
    pub fn build(buckets: ProjectBuckets) -> JiraExport {
        buckets.into_export()
    }

    /// Render the document as 4-space indented JSON.
    pub fn to_json(export: &JiraExport) -> DomainResult<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        export.serialize(&mut ser)?;
        Ok(buf)
    }

    /// Write the document to `path`, replacing any previous content.
    pub async fn write(path: &Path, export: &JiraExport) -> DomainResult<()> {
        let bytes = Self::to_json(export)?;
        tokio::fs::write(path, &bytes)
            .await
            .map_err(|source| DomainError::ExportWrite {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::info!(
            path = %path.display(),
            projects = export.projects.len(),
            issues = export.issue_count(),
            bytes = bytes.len(),
            "export written"
        );
        Ok(())
    }
}
