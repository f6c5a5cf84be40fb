//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - JSON file loading
//! - Environment variable overrides
//! - Validation of the supplemental settings

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, ENV_PREFIX};
