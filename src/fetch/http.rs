//! HTTP client shared by static page fetches and file downloads.

use std::time::Duration;

use reqwest::{header, Client, Response};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{DownloadError, Error, FetchError, Result};

/// The two user agents a caller chooses between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgents {
    /// Identifies the tool.
    pub default: String,
    /// Browser-like, for sites that reject the default.
    pub alternate: String,
}

impl UserAgents {
    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            default: config.user_agent.clone(),
            alternate: config.alternate_user_agent.clone(),
        }
    }

    pub fn pick(&self, alternate: bool) -> &str {
        if alternate {
            &self.alternate
        } else {
            &self.default
        }
    }
}

impl Default for UserAgents {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

/// Why a GET produced no usable response.
#[derive(Debug)]
pub enum GetFailure {
    Transport(reqwest::Error),
    Status(u16),
}

impl GetFailure {
    pub fn into_fetch_error(self, url: &Url) -> FetchError {
        match self {
            GetFailure::Transport(source) => FetchError::Transport {
                url: url.to_string(),
                source,
            },
            GetFailure::Status(status) => FetchError::Status {
                url: url.to_string(),
                status,
            },
        }
    }

    pub fn into_download_error(self, url: &Url) -> DownloadError {
        match self {
            GetFailure::Transport(source) => DownloadError::Transport {
                url: url.to_string(),
                source,
            },
            GetFailure::Status(status) => DownloadError::Status {
                url: url.to_string(),
                status,
            },
        }
    }
}

/// Thin wrapper over a reqwest client with per-request user agent choice.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    user_agents: UserAgents,
}

impl HttpClient {
    /// Build a client. Cookies set by the page carry over to file requests.
    pub fn new(user_agents: UserAgents) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agents,
        })
    }

    /// Issue one GET. Any non-2xx status is a failure.
    pub async fn get(
        &self,
        url: &Url,
        alternate_user_agent: bool,
        timeout: Duration,
    ) -> std::result::Result<Response, GetFailure> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .header(header::USER_AGENT, self.user_agents.pick(alternate_user_agent))
            .timeout(timeout)
            .send()
            .await
            .map_err(GetFailure::Transport)?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(GetFailure::Status(status.as_u16()));
        }

        Ok(response)
    }
}
