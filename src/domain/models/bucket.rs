use std::collections::BTreeMap;

use super::jira::{JiraExport, JiraProject, MappedIssue};

/// Mapped issues grouped by destination project key.
///
/// Within a bucket, issues keep insertion order. Keys iterate in
/// lexicographic order so repeated runs produce identical documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectBuckets {
    buckets: BTreeMap<String, Vec<MappedIssue>>,
}

impl ProjectBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue to the bucket for `key`, creating it on first use.
    pub fn push(&mut self, key: impl Into<String>, issue: MappedIssue) {
        self.buckets.entry(key.into()).or_default().push(issue);
    }

    pub fn get(&self, key: &str) -> Option<&[MappedIssue]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Number of distinct project keys.
    pub fn project_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn issue_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterate over `(key, issues)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MappedIssue])> {
        self.buckets.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Consume the buckets into the export document.
    pub fn into_export(self) -> JiraExport {
        JiraExport {
            projects: self
                .buckets
                .into_iter()
                .map(|(key, issues)| JiraProject { key, issues })
                .collect(),
        }
    }
}
