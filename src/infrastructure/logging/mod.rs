//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber, in pretty or
//! JSON format on stderr.

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
