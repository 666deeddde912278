//! Configuration module for link-harvester.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Fetch modes and wait conditions
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, DownloadConfig, FetchConfig, HttpConfig, LoggingConfig, TargetConfig};
pub use modes::{FetchMode, WaitCondition};
pub use validation::{validate_config, validate_file_types, validate_url, validate_wait_for};
