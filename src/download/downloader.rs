//! Sequential file downloading.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::config::Config;
use crate::download::report::{DownloadOutcome, DownloadReport};
use crate::download::task::DownloadTask;
use crate::error::DownloadError;
use crate::fetch::HttpClient;
use crate::fs::{data_directory, final_segment, partial_path};
use crate::output::progress::create_download_bar;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Default pause before each network download.
pub const DEFAULT_DOWNLOAD_DELAY: Duration = Duration::from_secs(5);

/// Default per-file request timeout.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads a batch of hrefs one at a time, skipping files already on disk.
#[derive(Debug, Clone)]
pub struct FileDownloader {
    client: HttpClient,
    delay: Duration,
    timeout: Duration,
    alternate_user_agent: bool,
    is_subpage: bool,
    show_progress: bool,
}

impl FileDownloader {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            delay: DEFAULT_DOWNLOAD_DELAY,
            timeout: DEFAULT_DOWNLOAD_TIMEOUT,
            alternate_user_agent: false,
            is_subpage: false,
            show_progress: true,
        }
    }

    pub fn from_config(client: HttpClient, config: &Config) -> Self {
        Self::new(client)
            .with_delay(config.download_delay())
            .with_timeout(config.download_timeout())
            .alternate_user_agent(config.http.use_alternate_user_agent)
            .subpage(config.target.is_subpage)
            .show_progress(config.download.show_progress)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn alternate_user_agent(mut self, alternate: bool) -> Self {
        self.alternate_user_agent = alternate;
        self
    }

    /// Subpage runs write straight into the output directory.
    pub fn subpage(mut self, is_subpage: bool) -> Self {
        self.is_subpage = is_subpage;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download every href, resolved against `base_url`, into the data directory
    /// under `output_dir`.
    ///
    /// Never fails as a whole. Each href ends up downloaded, skipped because the
    /// destination already exists, or failed; a failure is logged and the batch
    /// moves on.
    pub async fn download_all(
        &self,
        hrefs: &[String],
        base_url: &Url,
        output_dir: &Path,
    ) -> DownloadReport {
        let directory = data_directory(output_dir, self.is_subpage);
        if let Err(e) = tokio::fs::create_dir_all(&directory).await {
            tracing::error!(
                "Failed to create download directory {}: {}",
                directory.display(),
                e
            );
        }

        let mut report = DownloadReport::new(directory.clone());
        for href in hrefs {
            let outcome = self.download_one(href, base_url, &directory).await;
            if let DownloadOutcome::Failed(ref e) = outcome {
                tracing::error!("Error downloading file {}: {}", href, e);
            }
            report.record(href.clone(), outcome);
        }

        tracing::debug!(
            "Batch finished: {} downloaded, {} skipped, {} failed",
            report.downloaded_count,
            report.skipped_count,
            report.failed_count
        );
        report
    }

    async fn download_one(&self, href: &str, base_url: &Url, directory: &Path) -> DownloadOutcome {
        // No basename: the destination is the directory itself, which always exists
        if final_segment(href).is_empty() {
            tracing::info!("File already exists: {}", directory.display());
            return DownloadOutcome::Skipped {
                path: directory.to_path_buf(),
            };
        }

        let task = match DownloadTask::from_href(href, base_url, directory) {
            Ok(task) => task,
            Err(e) => return DownloadOutcome::Failed(e),
        };

        if task.destination.exists() {
            tracing::info!("File already exists: {}", task.destination.display());
            return DownloadOutcome::Skipped {
                path: task.destination,
            };
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.fetch_to_file(&task).await {
            Ok(bytes) => {
                tracing::info!("Successfully downloaded file: {}", task.url);
                DownloadOutcome::Downloaded {
                    path: task.destination,
                    bytes,
                }
            }
            Err(e) => DownloadOutcome::Failed(e),
        }
    }

    /// GET the file into `<destination>.part`, then rename it into place.
    async fn fetch_to_file(&self, task: &DownloadTask) -> Result<u64, DownloadError> {
        let response = self
            .client
            .get(&task.url, self.alternate_user_agent, self.timeout)
            .await
            .map_err(|failure| failure.into_download_error(&task.url))?;

        let partial = partial_path(&task.destination);
        let written = match self.stream_body(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, &task.destination)
            .await
            .map_err(|source| DownloadError::Io {
                path: task.destination.clone(),
                source,
            })?;

        Ok(written)
    }

    async fn stream_body(&self, response: Response, partial: &Path) -> Result<u64, DownloadError> {
        let url = response.url().to_string();
        let io_error = |source: std::io::Error| DownloadError::Io {
            path: partial.to_path_buf(),
            source,
        };

        let content_length = response.content_length();
        let progress = match content_length {
            Some(total) if self.show_progress && total > PROGRESS_THRESHOLD => {
                Some(create_download_bar(total))
            }
            _ => None,
        };

        // Stream to file
        let mut file = File::create(partial).await.map_err(io_error)?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| DownloadError::Transport {
                url: url.clone(),
                source,
            })?;
            file.write_all(&chunk).await.map_err(io_error)?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await.map_err(io_error)?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(downloaded)
    }
}
