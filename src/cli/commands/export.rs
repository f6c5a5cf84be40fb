//! The export command: GitLab group issues in, Jira import document out.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::ProgressBar;
use serde::Serialize;

use crate::adapters::gitlab::GitLabClient;
use crate::cli::output::{
    create_progress_bar, output, CommandOutput, ProgressLogWriter, TableFormatter,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Config, IssueStatus, IssueType, ProjectBuckets};
use crate::domain::ports::IssueTracker;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::{Exporter, IssueMapper, MigrationService, ProgressSink};

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Path of the JSON config file
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Where to write the export document (overrides export.path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// GitLab group to export (overrides source.group)
    #[arg(short, long)]
    pub group: Option<String>,

    /// GitLab access token (overrides gitlab.token)
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Map every issue and print a summary without writing the export
    #[arg(long)]
    pub dry_run: bool,
}

impl ExportArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(output) = &self.output {
            config.export.path = output.display().to_string();
        }
        if let Some(group) = &self.group {
            config.source.group.clone_from(group);
        }
        if let Some(token) = &self.token {
            config.gitlab_token.clone_from(token);
        }
    }
}

/// Issue counts for one Jira project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub key: String,
    pub issues: usize,
    pub epics: usize,
    pub bugs: usize,
    pub stories: usize,
    pub done: usize,
}

/// Result of one export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub group: String,
    /// Path written to, `None` on a dry run
    pub path: Option<String>,
    pub projects: Vec<ProjectSummary>,
    pub total_issues: usize,
}

impl ExportSummary {
    pub fn from_buckets(group: &str, path: Option<&Path>, buckets: &ProjectBuckets) -> Self {
        let projects = buckets
            .iter()
            .map(|(key, issues)| ProjectSummary {
                key: key.to_string(),
                issues: issues.len(),
                epics: issues.iter().filter(|i| i.issue_type == IssueType::Epic).count(),
                bugs: issues.iter().filter(|i| i.issue_type == IssueType::Bug).count(),
                stories: issues.iter().filter(|i| i.issue_type == IssueType::Story).count(),
                done: issues.iter().filter(|i| i.status == IssueStatus::Done).count(),
            })
            .collect();

        Self {
            group: group.to_string(),
            path: path.map(|p| p.display().to_string()),
            projects,
            total_issues: buckets.issue_count(),
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.path.is_none()
    }
}

impl CommandOutput for ExportSummary {
    fn to_human(&self) -> String {
        let table = TableFormatter::new().format_projects(&self.projects);
        let headline = match &self.path {
            Some(path) => format!(
                "{} Exported {} issues from '{}' into {} projects: {}",
                style("✓").green().bold(),
                self.total_issues,
                self.group,
                self.projects.len(),
                path
            ),
            None => format!(
                "{} Dry run: {} issues from '{}' mapped into {} projects, nothing written",
                style("!").yellow().bold(),
                self.total_issues,
                self.group,
                self.projects.len()
            ),
        };
        format!("{table}\n{headline}")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "group": self.group,
            "path": self.path,
            "dry_run": self.is_dry_run(),
            "total_issues": self.total_issues,
            "projects": self.projects,
        })
    }
}

/// Run the pipeline against `tracker` and write the export unless
/// `dry_run` is set.
///
/// Nothing is written when any issue fails to map.
pub async fn run_export(
    config: &Config,
    tracker: Arc<dyn IssueTracker>,
    progress: Arc<dyn ProgressSink>,
    dry_run: bool,
) -> DomainResult<ExportSummary> {
    let mapper = IssueMapper::from_config(config);
    let buckets = MigrationService::new(
        tracker,
        mapper,
        config.source.group.clone(),
        config.source.per_page,
    )
    .with_concurrency(config.discussion_concurrency)
    .with_progress(progress)
    .run()
    .await?;

    if dry_run {
        tracing::info!("dry run, export not written");
        return Ok(ExportSummary::from_buckets(&config.source.group, None, &buckets));
    }

    let path = PathBuf::from(&config.export.path);
    let summary = ExportSummary::from_buckets(&config.source.group, Some(&path), &buckets);
    Exporter::write(&path, &Exporter::build(buckets)).await?;
    Ok(summary)
}

/// Report the loaded configuration. Only called once logging is set up.
fn log_config_loaded(path: &Path, config: &Config) {
    tracing::info!(
        path = %path.display(),
        labels = config.label_to_project.len(),
        repos = config.repo_to_project.len(),
        "configuration loaded"
    );
}

/// Entry point of the export command.
pub async fn execute(args: ExportArgs, json_mode: bool) -> Result<()> {
    let mut config = ConfigLoader::load_from_file(&args.config).map_err(DomainError::from)?;
    args.apply_overrides(&mut config);

    let progress = Arc::new(create_progress_bar(json_mode));
    let log_config = LogConfig::try_from(&config.logging).map_err(anyhow::Error::msg)?;
    LoggerImpl::init_with_writer(&log_config, ProgressLogWriter::new(ProgressBar::clone(&progress)))
        .context("Failed to initialize logging")?;

    log_config_loaded(&args.config, &config);
    tracing::info!(
        group = %config.source.group,
        base_url = %config.source.base_url,
        dry_run = args.dry_run,
        "starting export"
    );

    let tracker: Arc<dyn IssueTracker> = Arc::new(GitLabClient::from_config(&config)?);

    let result = run_export(&config, tracker, progress.clone(), args.dry_run).await;
    progress.finish_and_clear();

    output(&result?, json_mode);
    Ok(())
}
