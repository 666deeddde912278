//! One harvest run: fetch the page, download its files, list its subpages.

use std::sync::Arc;

use url::Url;

use crate::browser::BrowserLauncher;
use crate::config::Config;
use crate::download::{DownloadReport, FileDownloader};
use crate::error::Result;
use crate::fetch::{FetchRequest, HttpClient, PageFetcher, UserAgents};
use crate::fs::data_directory;
use crate::links::{all_links, collect_subpages, extract_links, LinkFilter};

/// Everything one run produced.
#[derive(Debug)]
pub struct HarvestSummary {
    pub page_url: Url,
    /// Links that passed the file type filter.
    pub links_found: usize,
    pub report: DownloadReport,
    /// Present when subpage collection was requested.
    pub subpages: Option<Vec<Url>>,
}

impl HarvestSummary {
    pub fn has_failures(&self) -> bool {
        self.report.has_failures()
    }
}

/// Run the whole pipeline for `config`.
///
/// Fails only when the page itself cannot be obtained (or the subpage
/// manifest cannot be written). Individual file failures are in the report.
pub async fn harvest(config: &Config, launcher: Arc<dyn BrowserLauncher>) -> Result<HarvestSummary> {
    let client = HttpClient::new(UserAgents::from_config(&config.http))?;
    let fetcher = PageFetcher::new(client.clone(), launcher)
        .with_browser_download_dir(config.fetch.browser_download_directory.clone());

    let request = FetchRequest::from_config(config)?;
    let output_dir = config.output_directory();

    let (hrefs, every_link) = {
        let page = fetcher.fetch(&request).await?;
        let filter = LinkFilter::from_suffixes(&config.target.file_types);
        let hrefs = extract_links(&page, &filter);
        let every_link = config.target.get_subpages.then(|| all_links(&page));
        (hrefs, every_link)
    };
    tracing::info!("Found {} matching links on {}", hrefs.len(), request.url);

    let downloader = FileDownloader::from_config(client, config);
    let report = downloader
        .download_all(&hrefs, &request.url, &output_dir)
        .await;

    let subpages = match every_link {
        Some(links) => {
            let destination = data_directory(&output_dir, config.target.is_subpage);
            Some(collect_subpages(&links, &request.url, &destination).await?)
        }
        None => None,
    };

    Ok(HarvestSummary {
        page_url: request.url,
        links_found: hrefs.len(),
        report,
        subpages,
    })
}
