use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::MappingRules;

/// Main configuration structure.
///
/// The three renamed fields keep the legacy `config.json` layout; every other
/// section is optional and falls back to its default.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitLab personal access token
    #[serde(rename = "gitlab.token", default)]
    pub gitlab_token: String,

    /// GitLab label name -> Jira project key
    #[serde(rename = "gitlabLabelToJiraProject", default)]
    pub label_to_project: HashMap<String, String>,

    /// GitLab `namespace/repo` path -> Jira project key
    #[serde(rename = "gitlabRepoToJiraProject", default)]
    pub repo_to_project: HashMap<String, String>,

    /// Where issues are read from
    #[serde(default)]
    pub source: SourceConfig,

    /// Where the export document is written
    #[serde(default)]
    pub export: ExportConfig,

    /// Issue type, status and label rules
    #[serde(default)]
    pub rules: MappingRules,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Number of issues mapped concurrently (1 = strictly sequential)
    #[serde(default = "default_discussion_concurrency")]
    pub discussion_concurrency: usize,
}

const fn default_discussion_concurrency() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gitlab_token: String::new(),
            label_to_project: HashMap::new(),
            repo_to_project: HashMap::new(),
            source: SourceConfig::default(),
            export: ExportConfig::default(),
            rules: MappingRules::default(),
            logging: LoggingConfig::default(),
            discussion_concurrency: default_discussion_concurrency(),
        }
    }
}

// The token never shows up in logs or panics.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "gitlab_token",
                &if self.gitlab_token.is_empty() { "" } else { "[REDACTED]" },
            )
            .field("label_to_project", &self.label_to_project)
            .field("repo_to_project", &self.repo_to_project)
            .field("source", &self.source)
            .field("export", &self.export)
            .field("rules", &self.rules)
            .field("logging", &self.logging)
            .field("discussion_concurrency", &self.discussion_concurrency)
            .finish()
    }
}

/// GitLab source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourceConfig {
    /// GitLab instance root, without the `/api/v4` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Group whose issues are exported (full path for subgroups)
    #[serde(default = "default_group")]
    pub group: String,

    /// Page size used when listing group issues (1-100)
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_base_url() -> String {
    "https://gitlab.com".to_string()
}

fn default_group() -> String {
    "k-t-corp".to_string()
}

const fn default_per_page() -> u32 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            group: default_group(),
            per_page: default_per_page(),
        }
    }
}

/// Export output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ExportConfig {
    /// Path of the export document, overwritten on every run
    #[serde(default = "default_export_path")]
    pub path: String,
}

fn default_export_path() -> String {
    "export.json".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_document_parses() {
        let json = r#"{
            "gitlab.token": "glpat-abc",
            "gitlabLabelToJiraProject": { "eng-project": "ENG" },
            "gitlabRepoToJiraProject": { "k-t-corp/web": "WEB" }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.gitlab_token, "glpat-abc");
        assert_eq!(config.label_to_project["eng-project"], "ENG");
        assert_eq!(config.repo_to_project["k-t-corp/web"], "WEB");
        assert_eq!(config.source.group, "k-t-corp");
        assert_eq!(config.source.per_page, 10);
        assert_eq!(config.export.path, "export.json");
        assert_eq!(config.discussion_concurrency, 1);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            gitlab_token: "glpat-secret".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("glpat-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_source_section_has_no_throttling_knob() {
        let value = serde_json::to_value(SourceConfig::default()).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["base_url", "group", "per_page"]);

        let legacy: SourceConfig =
            serde_json::from_str(r#"{ "group": "acme", "requests_per_minute": 600 }"#).unwrap();
        assert_eq!(legacy.group, "acme");
    }

    #[test]
    fn test_serialized_keys_keep_legacy_names() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert!(value.get("gitlab.token").is_some());
        assert!(value.get("gitlabLabelToJiraProject").is_some());
        assert!(value.get("gitlabRepoToJiraProject").is_some());
    }
}
