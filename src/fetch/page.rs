//! Fetch requests and parsed pages.

use std::time::Duration;

use scraper::Html;
use url::Url;

use crate::browser::DEFAULT_POLL_INTERVAL;
use crate::config::{validate_url, Config, FetchMode, WaitCondition};
use crate::error::Result;

/// Default bound on page requests and on each element wait.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to obtain one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: Url,
    pub mode: FetchMode,
    /// Dynamic mode only.
    pub wait_for: WaitCondition,
    /// HTTP request timeout (static) or per-suffix wait (dynamic).
    pub timeout: Duration,
    pub headless: bool,
    pub alternate_user_agent: bool,
    /// Pause between element probes while waiting.
    pub poll_interval: Duration,
}

impl FetchRequest {
    /// Static request with default settings.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            mode: FetchMode::Static,
            wait_for: WaitCondition::default(),
            timeout: DEFAULT_FETCH_TIMEOUT,
            headless: true,
            alternate_user_agent: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let url = validate_url(config.target_url()?)?;
        Ok(Self {
            url,
            mode: config.fetch.mode,
            wait_for: config.wait_condition(),
            timeout: config.fetch_timeout(),
            headless: config.fetch.headless,
            alternate_user_agent: config.http.use_alternate_user_agent,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn dynamic(mut self, wait_for: WaitCondition) -> Self {
        self.mode = FetchMode::Dynamic;
        self.wait_for = wait_for;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn alternate_user_agent(mut self, alternate: bool) -> Self {
        self.alternate_user_agent = alternate;
        self
    }
}

/// A parsed HTML document and the URL it was requested from.
pub struct ParsedPage {
    url: Url,
    document: Html,
}

impl ParsedPage {
    pub fn parse(url: Url, html: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(html),
        }
    }

    /// Base URL for resolving the page's links.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn document(&self) -> &Html {
        &self.document
    }
}

impl std::fmt::Debug for ParsedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedPage")
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}
