//! Logging setup: console output plus a per-run log file.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, log_file_path, LOGS_DIR};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> EnvFilter {
    let log_level = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Create `<log_root>/logs/` and the log file for this run.
pub fn create_log_file(config: &LoggingConfig) -> Result<(PathBuf, File)> {
    ensure_dir(&log_directory(config))?;
    let path = log_file_path(&config.log_root, &config.resource_name, Local::now());
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Install the global subscriber. Every event goes to stderr and, without
/// ANSI colors, to the run's log file. Returns the log file path.
pub fn init_logging(config: &LoggingConfig, debug: bool) -> Result<PathBuf> {
    let (path, file) = create_log_file(config)?;

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(default_filter(debug))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(path)
}

/// Console-only logging, for runs that cannot create their log file.
pub fn init_console_logging(debug: bool) {
    let _ = fmt()
        .with_env_filter(default_filter(debug))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Directory log files for `config` are written to.
pub fn log_directory(config: &LoggingConfig) -> PathBuf {
    config.log_root.join(LOGS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            log_root: dir.path().to_path_buf(),
            resource_name: "city-budgets".to_string(),
        };

        let (path, _file) = create_log_file(&config).unwrap();

        assert!(path.exists());
        assert_eq!(path.parent().unwrap(), log_directory(&config));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("city-budgets_"));
        assert!(name.ends_with(".log"));
    }
}
