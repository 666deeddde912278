//! Configuration structures and loading logic.

use crate::config::modes::{FetchMode, WaitCondition};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What to harvest and where to put it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Page whose links are downloaded.
    #[serde(default)]
    pub url: Option<String>,

    /// Directory that receives the `data` folder.
    #[serde(default)]
    pub output_directory: Option<PathBuf>,

    /// File suffixes to download. Empty downloads every link.
    #[serde(default = "default_file_types")]
    pub file_types: Vec<String>,

    /// Write non-file links to `subpages.txt`.
    #[serde(default)]
    pub get_subpages: bool,

    /// The output directory already is the final one (no `data` folder added).
    #[serde(default)]
    pub is_subpage: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            url: None,
            output_directory: None,
            file_types: default_file_types(),
            get_subpages: false,
            is_subpage: false,
        }
    }
}

/// Page fetch options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Fetch mode (static, dynamic).
    #[serde(default)]
    pub mode: FetchMode,

    /// Run the browser without a window.
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Page request timeout, also the per-suffix element wait.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Suffixes to wait for in dynamic mode; `["any"]` for any link, `[]` for none.
    #[serde(default = "default_wait_for")]
    pub wait_for: Vec<String>,

    /// Where the browser saves files it downloads itself.
    #[serde(default)]
    pub browser_download_directory: Option<PathBuf>,

    /// Extra browser command-line switches, e.g. `["--no-sandbox"]`.
    #[serde(default)]
    pub browser_args: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            mode: FetchMode::default(),
            headless: true,
            timeout_seconds: default_timeout(),
            wait_for: default_wait_for(),
            browser_download_directory: None,
            browser_args: Vec::new(),
        }
    }
}

/// File download options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Pause before every file request.
    #[serde(default = "default_delay")]
    pub delay_seconds: u64,

    /// Timeout for a single file request.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Show a progress bar for large files.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            delay_seconds: default_delay(),
            timeout_seconds: default_timeout(),
            show_progress: true,
        }
    }
}

/// HTTP identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User agent sent by default.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Browser-like user agent for sites that reject the default.
    /// Check the site's robots.txt and terms before turning this on.
    #[serde(default = "default_alternate_user_agent")]
    pub alternate_user_agent: String,

    #[serde(default)]
    pub use_alternate_user_agent: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            alternate_user_agent: default_alternate_user_agent(),
            use_alternate_user_agent: false,
        }
    }
}

/// Log file placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory that receives the `logs` folder.
    #[serde(default = "default_log_root")]
    pub log_root: PathBuf,

    /// Prefix of the log file name.
    #[serde(default = "default_resource_name")]
    pub resource_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_root: default_log_root(),
            resource_name: default_resource_name(),
        }
    }
}

fn default_file_types() -> Vec<String> {
    vec![".zip".to_string(), ".pdf".to_string(), ".docx".to_string()]
}

fn default_wait_for() -> Vec<String> {
    vec!["any".to_string()]
}

fn default_user_agent() -> String {
    "link-harvester Research Data Collector".to_string()
}

fn default_alternate_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36 link-harvester/ResearchCollector".to_string()
}

fn default_log_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_resource_name() -> String {
    "link-harvester".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_delay() -> u64 {
    5
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.target
            .output_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Target URL, or an error when none was configured.
    pub fn target_url(&self) -> Result<&str> {
        self.target
            .url
            .as_deref()
            .ok_or_else(|| Error::MissingConfig("url (page to harvest)".to_string()))
    }

    pub fn wait_condition(&self) -> WaitCondition {
        WaitCondition::from_list(&self.fetch.wait_for)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.timeout_seconds)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download.timeout_seconds)
    }

    pub fn download_delay(&self) -> Duration {
        Duration::from_secs(self.download.delay_seconds)
    }
}
