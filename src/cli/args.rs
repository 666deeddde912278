//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, FetchMode};

/// Bulk file downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version,
    about = "Download every file linked from a web page",
    long_about = "Fetch a page (directly, or rendered in a headless browser), download each linked \
                  file whose name ends in one of the requested file types, and optionally list the \
                  page's subpages for later runs.\n\n\
                  Files already present in the destination are never downloaded again."
)]
pub struct Args {
    /// Page to harvest.
    #[arg(env = "LINK_HARVESTER_URL")]
    pub url: Option<String>,

    /// Directory the data folder is created under.
    #[arg(short, long = "output")]
    pub output_directory: Option<PathBuf>,

    /// File name suffixes to download, e.g. ".csv,.xlsx".
    #[arg(short = 't', long = "file-types", value_delimiter = ',', num_args = 1..)]
    pub file_types: Option<Vec<String>>,

    /// Download every link on the page regardless of suffix.
    #[arg(long, conflicts_with = "file_types")]
    pub all_files: bool,

    /// Render the page in a browser before parsing.
    #[arg(long)]
    pub dynamic: bool,

    /// Show the browser window (dynamic mode).
    #[arg(long)]
    pub headed: bool,

    /// Page request / element wait timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Suffixes to wait for before parsing a rendered page.
    /// "any" waits for any link; an empty value skips the wait.
    #[arg(long = "wait-for", value_delimiter = ',', num_args = 0..)]
    pub wait_for: Option<Vec<String>>,

    /// Download directory handed to the browser.
    #[arg(long)]
    pub browser_download_dir: Option<PathBuf>,

    /// Extra browser switch, repeatable (e.g. --browser-arg=--no-sandbox).
    #[arg(long = "browser-arg", allow_hyphen_values = true)]
    pub browser_args: Vec<String>,

    /// Use the browser-like user agent.
    #[arg(long)]
    pub alternate_user_agent: bool,

    /// Write the page's subpages to subpages.txt.
    #[arg(long)]
    pub subpages: bool,

    /// The output directory is already the final destination.
    #[arg(long)]
    pub is_subpage: bool,

    /// Seconds to wait before each file download.
    #[arg(long)]
    pub delay: Option<u64>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Name used for the log file.
    #[arg(long)]
    pub resource_name: Option<String>,

    /// Directory the logs folder is created under.
    #[arg(long)]
    pub log_root: Option<PathBuf>,

    /// Hide download progress bars.
    #[arg(long, short, alias = "no-progress")]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Target
        if let Some(url) = self.url {
            config.target.url = Some(url);
        }

        if let Some(dir) = self.output_directory {
            config.target.output_directory = Some(dir);
        }

        if self.all_files {
            config.target.file_types.clear();
        } else if let Some(file_types) = self.file_types {
            config.target.file_types = file_types;
        }

        if self.subpages {
            config.target.get_subpages = true;
        }

        if self.is_subpage {
            config.target.is_subpage = true;
        }

        // Fetch
        if self.dynamic {
            config.fetch.mode = FetchMode::Dynamic;
        }

        if self.headed {
            config.fetch.headless = false;
        }

        if let Some(timeout) = self.timeout {
            config.fetch.timeout_seconds = timeout;
        }

        if let Some(wait_for) = self.wait_for {
            config.fetch.wait_for = wait_for.into_iter().filter(|s| !s.is_empty()).collect();
        }

        if let Some(dir) = self.browser_download_dir {
            config.fetch.browser_download_directory = Some(dir);
        }

        if !self.browser_args.is_empty() {
            config.fetch.browser_args = self.browser_args;
        }

        // Download and HTTP
        if let Some(delay) = self.delay {
            config.download.delay_seconds = delay;
        }

        if self.quiet {
            config.download.show_progress = false;
        }

        if self.alternate_user_agent {
            config.http.use_alternate_user_agent = true;
        }

        // Logging
        if let Some(name) = self.resource_name {
            config.logging.resource_name = name;
        }

        if let Some(root) = self.log_root {
            config.logging.log_root = root;
        }
    }
}
