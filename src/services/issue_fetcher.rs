//! Paginated issue listing.
//!
//! [`issue_pages`] turns the page-numbered listing of an [`IssueTracker`]
//! into a lazy stream: page N is only requested once page N-1 has been
//! consumed, and the stream ends at the first empty page.

use futures::stream::{self, Stream, TryStreamExt};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::SourceIssue;
use crate::domain::ports::IssueTracker;

/// Stream the pages of `group`'s issues in server order.
///
/// The stream is finite and cannot be restarted. It stops after the first
/// error.
pub fn issue_pages<'a>(
    tracker: &'a dyn IssueTracker,
    group: &'a str,
    per_page: u32,
) -> impl Stream<Item = DomainResult<Vec<SourceIssue>>> + 'a {
    stream::try_unfold(1u32, move |page| async move {
        let issues = tracker.list_group_issues(group, page, per_page).await?;
        if issues.is_empty() {
            tracing::debug!(page, "empty page, issue listing complete");
            return Ok::<_, DomainError>(None);
        }
        tracing::debug!(page, count = issues.len(), "fetched issue page");
        Ok(Some((issues, page + 1)))
    })
}

/// Fetch every issue of `group`, oldest first.
///
/// Pages are concatenated in server order and the whole list is then
/// reversed, so the result is the reverse of fetch order rather than a sort
/// on any issue field.
pub async fn fetch_all_issues(
    tracker: &dyn IssueTracker,
    group: &str,
    per_page: u32,
) -> DomainResult<Vec<SourceIssue>> {
    let pages: Vec<Vec<SourceIssue>> = issue_pages(tracker, group, per_page).try_collect().await?;
    let page_count = pages.len();

    let mut issues: Vec<SourceIssue> = pages.into_iter().flatten().collect();
    issues.reverse();

    tracing::info!(group, pages = page_count, count = issues.len(), "fetched group issues");
    Ok(issues)
}
