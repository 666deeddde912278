//! Browser driver seam and scoped session guard.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BrowserError;

/// Launch options for a browser instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    /// Run without a window.
    pub headless: bool,

    /// Directory the browser saves its own downloads to.
    pub download_dir: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            download_dir: None,
        }
    }
}

/// Starts browser instances.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, options: &BrowserOptions)
        -> Result<Box<dyn BrowserSession>, BrowserError>;
}

/// One running browser with a single page.
#[async_trait]
pub trait BrowserSession: Send {
    /// Load `url` in the page.
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError>;

    /// Evaluate a JavaScript expression in the page and return its JSON value.
    async fn evaluate(&mut self, script: &str) -> Result<Value, BrowserError>;

    /// Current HTML of the page.
    async fn content(&mut self) -> Result<String, BrowserError>;

    /// Shut the browser down. Calling it twice is a no-op.
    async fn close(&mut self) -> Result<(), BrowserError>;

    /// Best-effort release without awaiting, used when a guard is dropped unreleased.
    fn abandon(&mut self) {}
}

/// Owns a session until [`BrowserGuard::release`] is awaited.
///
/// If the guard is dropped first (early return, cancellation, panic) the session is
/// abandoned, which for a real browser kills the process in the background.
pub struct BrowserGuard {
    session: Option<Box<dyn BrowserSession>>,
}

impl BrowserGuard {
    pub fn new(session: Box<dyn BrowserSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Access the guarded session.
    pub fn session(&mut self) -> Result<&mut (dyn BrowserSession + 'static), BrowserError> {
        self.session.as_deref_mut().ok_or(BrowserError::Closed)
    }

    /// Close the browser, consuming the guard.
    pub async fn release(mut self) -> Result<(), BrowserError> {
        match self.session.take() {
            Some(mut session) => session.close().await,
            None => Ok(()),
        }
    }
}

impl Drop for BrowserGuard {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            tracing::warn!("Browser session dropped without release, abandoning it");
            session.abandon();
        }
    }
}

/// Launcher used when the crate is built without browser support.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableLauncher;

#[async_trait]
impl BrowserLauncher for UnavailableLauncher {
    async fn launch(
        &self,
        _options: &BrowserOptions,
    ) -> Result<Box<dyn BrowserSession>, BrowserError> {
        Err(BrowserError::Unavailable)
    }
}
