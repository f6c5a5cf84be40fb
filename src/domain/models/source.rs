//! Read-only view of the source tracker's issues and discussions.

/// An issue as listed by the source tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    /// Global issue id
    pub id: u64,
    /// Issue number within its project
    pub iid: u64,
    /// Id of the project (repository) the issue lives in
    pub project_id: u64,
    pub title: String,
    /// Empty when the issue has no description
    pub description: String,
    /// `opened` or `closed`
    pub state: String,
    /// Label names, in the order the tracker returns them
    pub labels: Vec<String>,
    pub web_url: String,
}

/// One note (comment or system event) of a discussion thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNote {
    pub body: String,
    /// True for tracker-generated notes such as state changes
    pub system: bool,
}

/// A discussion thread on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDiscussion {
    pub notes: Vec<SourceNote>,
}
