//! Port trait definitions (Hexagonal Architecture)
//!
//! - IssueTracker: read access to the source issue tracker

pub mod issue_tracker;

pub use issue_tracker::IssueTracker;
