//! Static and browser-rendered page fetching.

use std::path::PathBuf;
use std::sync::Arc;

use crate::browser::{BrowserGuard, BrowserLauncher, BrowserOptions, BrowserSession};
use crate::config::FetchMode;
use crate::error::FetchError;
use crate::fetch::http::HttpClient;
use crate::fetch::page::{FetchRequest, ParsedPage};
use crate::fetch::wait::wait_for_links;

/// Obtains parsed pages over HTTP or through a rendering browser.
pub struct PageFetcher {
    client: HttpClient,
    launcher: Arc<dyn BrowserLauncher>,
    browser_download_dir: Option<PathBuf>,
}

impl PageFetcher {
    pub fn new(client: HttpClient, launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self {
            client,
            launcher,
            browser_download_dir: None,
        }
    }

    /// Directory the browser saves its own downloads to (dynamic mode).
    pub fn with_browser_download_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.browser_download_dir = dir;
        self
    }

    /// Fetch and parse the page described by `request`.
    pub async fn fetch(&self, request: &FetchRequest) -> Result<ParsedPage, FetchError> {
        match request.mode {
            FetchMode::Static => self.fetch_static(request).await,
            FetchMode::Dynamic => self.fetch_dynamic(request).await,
        }
    }

    async fn fetch_static(&self, request: &FetchRequest) -> Result<ParsedPage, FetchError> {
        let response = self
            .client
            .get(&request.url, request.alternate_user_agent, request.timeout)
            .await
            .map_err(|failure| {
                let e = failure.into_fetch_error(&request.url);
                tracing::error!("Error fetching URL {}: {}", request.url, e);
                e
            })?;

        let body = response.text().await.map_err(|source| {
            tracing::error!("Error reading body of {}: {}", request.url, source);
            FetchError::Transport {
                url: request.url.to_string(),
                source,
            }
        })?;

        tracing::info!("Successfully fetched and parsed URL: {}", request.url);
        Ok(ParsedPage::parse(request.url.clone(), &body))
    }

    async fn fetch_dynamic(&self, request: &FetchRequest) -> Result<ParsedPage, FetchError> {
        let options = BrowserOptions {
            headless: request.headless,
            download_dir: self.browser_download_dir.clone(),
        };

        let session = self.launcher.launch(&options).await.map_err(|e| {
            tracing::error!("Failed to initialize driver: {}", e);
            FetchError::Driver(e)
        })?;

        let mut guard = BrowserGuard::new(session);
        let rendered = match guard.session() {
            Ok(session) => render(session, request).await,
            Err(source) => Err(FetchError::Render {
                url: request.url.to_string(),
                source,
            }),
        };

        // Released whatever render returned
        if let Err(e) = guard.release().await {
            tracing::warn!("Failed to close browser: {}", e);
        }

        let html = rendered?;
        tracing::info!("Successfully rendered and parsed URL: {}", request.url);
        Ok(ParsedPage::parse(request.url.clone(), &html))
    }
}

/// Navigate, wait for qualifying links, and read the HTML.
///
/// Only a failure to read the HTML is fatal; navigation errors and wait timeouts
/// are logged and the current document is used as-is.
async fn render(
    session: &mut dyn BrowserSession,
    request: &FetchRequest,
) -> Result<String, FetchError> {
    tracing::info!("Rendering {}", request.url);

    match tokio::time::timeout(request.timeout, session.navigate(request.url.as_str())).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Failed to load {}: {}", request.url, e),
        Err(_) => tracing::error!(
            "Timed out loading {} after {:.1}s",
            request.url,
            request.timeout.as_secs_f32()
        ),
    }

    wait_for_links(
        &mut *session,
        &request.wait_for,
        request.timeout,
        request.poll_interval,
    )
    .await;

    session.content().await.map_err(|source| {
        tracing::error!("Failed to read rendered page {}: {}", request.url, source);
        FetchError::Render {
            url: request.url.to_string(),
            source,
        }
    })
}
