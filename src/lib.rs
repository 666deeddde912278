//! link-harvester - bulk downloads of files linked from a web page
//!
//! This library fetches a page, either directly over HTTP or rendered in a
//! headless browser, and downloads every linked file whose name ends in one of
//! a set of suffixes.
//!
//! # Features
//!
//! - Static or browser-rendered page fetching
//! - Waiting for specific file links on rendered pages
//! - Idempotent downloads (existing files are skipped)
//! - Subpage discovery for follow-up runs
//! - Form-driving primitives for rendered pages (click, select, type, read href)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use link_harvester::{browser::default_launcher, harvest, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let summary = harvest(&config, default_launcher(&config.fetch.browser_args)).await?;
//!
//!     println!("{} files downloaded", summary.report.downloaded_count);
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod links;
pub mod logging;
pub mod output;
pub mod pipeline;

// Re-exports for convenience
pub use config::{Config, FetchMode, WaitCondition};
pub use download::{DownloadOutcome, DownloadReport, FileDownloader};
pub use error::{DownloadError, Error, FetchError, Result};
pub use fetch::{FetchRequest, PageFetcher, ParsedPage};
pub use links::{collect_subpages, extract_links, LinkFilter};
pub use pipeline::{harvest, HarvestSummary};
