pub mod exporter;
pub mod issue_fetcher;
pub mod issue_mapper;
pub mod migration_service;

pub use exporter::Exporter;
pub use issue_fetcher::{fetch_all_issues, issue_pages};
pub use issue_mapper::IssueMapper;
pub use migration_service::{MigrationService, NoProgress, ProgressSink};
