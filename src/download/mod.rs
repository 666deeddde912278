//! Download module for fetching linked files.
//!
//! This module provides:
//! - Download task planning
//! - Sequential, idempotent file downloading
//! - Per-batch outcome reporting

pub mod downloader;
pub mod report;
pub mod task;

pub use downloader::{FileDownloader, DEFAULT_DOWNLOAD_DELAY, DEFAULT_DOWNLOAD_TIMEOUT};
pub use report::{DownloadOutcome, DownloadReport, ItemReport};
pub use task::DownloadTask;
