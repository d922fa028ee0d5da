//! Configuration management for league-skill
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values for a ratings run.

pub mod app;
pub mod rating;
pub mod replay;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, DatasetPaths, ReportSettings, ServiceSettings};
pub use rating::SkillSettings;
pub use replay::ReplaySettings;
