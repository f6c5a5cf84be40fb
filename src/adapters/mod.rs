//! Infrastructure adapters for external systems.

pub mod gitlab;
pub mod memory;
