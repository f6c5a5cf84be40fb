//! GitLab HTTP client.
//!
//! Wraps the GitLab REST API v4, providing typed methods for the three
//! read operations the export needs. Requests are sent one at a time per
//! caller and are never retried.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, SourceDiscussion, SourceIssue};
use crate::domain::ports::IssueTracker;

use super::models::{GitLabDiscussion, GitLabIssue, GitLabProject};

/// Page size used when following discussion pages (GitLab maximum).
const DISCUSSIONS_PER_PAGE: u32 = 100;

/// HTTP client for the GitLab REST API v4.
///
/// All methods return [`DomainResult`] and map HTTP / network / decoding
/// errors to [`DomainError::Remote`].
#[derive(Clone)]
pub struct GitLabClient {
    /// The underlying HTTP client.
    http: Client,
    /// GitLab personal access token.
    token: String,
    /// Instance root, e.g. `https://gitlab.com`.
    base_url: Url,
}

impl fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GitLabClient {
    /// Create a new client for the instance at `base_url`.
    pub fn new(token: impl Into<String>, base_url: &str) -> DomainResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::remote("client setup", format!("invalid base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(DomainError::remote(
                "client setup",
                format!("base URL '{base_url}' cannot hold API paths"),
            ));
        }
        Ok(Self {
            http: Client::new(),
            token: token.into(),
            base_url,
        })
    }

    /// Build a client from the token and `source` section of the config.
    pub fn from_config(config: &Config) -> DomainResult<Self> {
        Self::new(config.gitlab_token.clone(), &config.source.base_url)
    }

    /// Build `{base}/api/v4/{segments...}`, percent-encoding each segment.
    ///
    /// Group paths such as `parent/child` therefore become a single
    /// `parent%2Fchild` segment, as the API expects.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v4"]).extend(segments);
        }
        url
    }

    /// Build an authorized GET request.
    fn authorized_get(&self, url: Url) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header("PRIVATE-TOKEN", &self.token)
            .header("Accept", "application/json")
            .header("User-Agent", "gitlab2jira")
    }

    /// Send a GET request and decode the JSON response body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
        query: &[(&str, String)],
    ) -> DomainResult<T> {
        tracing::debug!(operation, url = %url, ?query, "GitLab request");

        let resp = self
            .authorized_get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::remote(operation, format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::remote(
                operation,
                format!("returned {status}: {body}"),
            ));
        }

        resp.json::<T>()
            .await
            .map_err(|e| DomainError::remote(operation, format!("parse failed: {e}")))
    }

    /// List one page of a group's issues.
    pub async fn list_group_issues_page(
        &self,
        group: &str,
        page: u32,
        per_page: u32,
    ) -> DomainResult<Vec<GitLabIssue>> {
        let url = self.endpoint(&["groups", group, "issues"]);
        self.get_json(
            "list_group_issues",
            url,
            &[("page", page.to_string()), ("per_page", per_page.to_string())],
        )
        .await
    }

    /// Fetch a project's metadata.
    pub async fn get_project(&self, project_id: u64) -> DomainResult<GitLabProject> {
        let id = project_id.to_string();
        let url = self.endpoint(&["projects", &id]);
        self.get_json("get_project", url, &[]).await
    }

    /// List every discussion of an issue, following pages until an empty one.
    pub async fn list_issue_discussions(
        &self,
        project_id: u64,
        issue_iid: u64,
    ) -> DomainResult<Vec<GitLabDiscussion>> {
        let id = project_id.to_string();
        let iid = issue_iid.to_string();
        let mut discussions = Vec::new();
        let mut page = 1u32;

        loop {
            let url = self.endpoint(&["projects", &id, "issues", &iid, "discussions"]);
            let batch: Vec<GitLabDiscussion> = self
                .get_json(
                    "list_issue_discussions",
                    url,
                    &[
                        ("page", page.to_string()),
                        ("per_page", DISCUSSIONS_PER_PAGE.to_string()),
                    ],
                )
                .await?;
            if batch.is_empty() {
                break;
            }
            discussions.extend(batch);
            page += 1;
        }

        Ok(discussions)
    }
}

#[async_trait]
impl IssueTracker for GitLabClient {
    async fn list_group_issues(
        &self,
        group: &str,
        page: u32,
        per_page: u32,
    ) -> DomainResult<Vec<SourceIssue>> {
        let issues = self.list_group_issues_page(group, page, per_page).await?;
        Ok(issues.into_iter().map(SourceIssue::from).collect())
    }

    async fn project_path(&self, project_id: u64) -> DomainResult<String> {
        Ok(self.get_project(project_id).await?.path_with_namespace)
    }

    async fn issue_discussions(
        &self,
        project_id: u64,
        issue_iid: u64,
    ) -> DomainResult<Vec<SourceDiscussion>> {
        let discussions = self.list_issue_discussions(project_id, issue_iid).await?;
        Ok(discussions.into_iter().map(SourceDiscussion::from).collect())
    }
}
