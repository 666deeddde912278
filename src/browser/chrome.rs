//! Chrome driver over the DevTools protocol.

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::browser::session::{BrowserLauncher, BrowserOptions, BrowserSession};
use crate::error::BrowserError;

/// Launches a local Chrome/Chromium per session.
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    /// Extra command-line switches passed to Chrome.
    pub chrome_args: Vec<String>,
}

/// Switches passed to every launch.
const BASE_ARGS: [&str; 4] = [
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--no-first-run",
    "--no-default-browser-check",
];

impl ChromeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add switches such as `--no-sandbox` (needed when running as root in a container).
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chrome_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Full switch list for a launch.
    pub fn launch_args(&self) -> Vec<String> {
        BASE_ARGS
            .iter()
            .map(|arg| arg.to_string())
            .chain(self.chrome_args.iter().cloned())
            .collect()
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(
        &self,
        options: &BrowserOptions,
    ) -> Result<Box<dyn BrowserSession>, BrowserError> {
        tracing::info!("Launching browser (headless={})", options.headless);

        let mut builder = BrowserConfig::builder();

        // with_head means NOT headless
        if !options.headless {
            builder = builder.with_head();
        }

        for arg in self.launch_args() {
            builder = builder.arg(arg);
        }

        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let mut session = ChromeSession {
            browser: Some(browser),
            page: None,
            handler_task: Some(handler_task),
        };

        // Past this point the process is running, so setup failures must close it
        if let Err(e) = session.prepare(options).await {
            let _ = session.close().await;
            return Err(e);
        }

        tracing::info!("Successfully initialized browser");
        Ok(Box::new(session))
    }
}

/// A running Chrome process with one page.
pub struct ChromeSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
}

impl ChromeSession {
    async fn prepare(&mut self, options: &BrowserOptions) -> Result<(), BrowserError> {
        let browser = self.browser.as_ref().ok_or(BrowserError::Closed)?;

        if let Some(dir) = &options.download_dir {
            let params = SetDownloadBehaviorParams::builder()
                .behavior(SetDownloadBehaviorBehavior::Allow)
                .download_path(dir.display().to_string())
                .build()
                .map_err(BrowserError::Launch)?;
            browser
                .execute(params)
                .await
                .map_err(|e| BrowserError::Launch(e.to_string()))?;
            tracing::debug!("Browser downloads go to {}", dir.display());
        }

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        self.page = Some(page);

        Ok(())
    }

    fn page(&self) -> Result<&Page, BrowserError> {
        self.page.as_ref().ok_or(BrowserError::Closed)
    }

    fn stop_handler(&mut self) {
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.page()?
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Navigation(e.to_string()))
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value, BrowserError> {
        let result = self
            .page()?
            .evaluate(script.to_string())
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn content(&mut self) -> Result<String, BrowserError> {
        self.page()?
            .content()
            .await
            .map_err(|e| BrowserError::Script(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::debug!("Failed to close page: {}", e);
            }
        }

        let Some(mut browser) = self.browser.take() else {
            self.stop_handler();
            return Ok(());
        };

        let closed = browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Launch(format!("close failed: {}", e)));
        if let Err(e) = browser.wait().await {
            tracing::debug!("Failed to reap browser process: {}", e);
        }
        self.stop_handler();

        tracing::debug!("Browser closed");
        closed
    }

    fn abandon(&mut self) {
        self.page.take();
        let Some(mut browser) = self.browser.take() else {
            self.stop_handler();
            return;
        };
        let handler_task = self.handler_task.take();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = browser.close().await {
                        tracing::warn!("Failed to close abandoned browser: {}", e);
                    }
                    let _ = browser.wait().await;
                    if let Some(task) = handler_task {
                        task.abort();
                    }
                });
            }
            Err(_) => {
                // No runtime left; dropping the Browser kills the child process
                if let Some(task) = handler_task {
                    task.abort();
                }
            }
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.abandon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_kept_by_default() {
        let args = ChromeLauncher::new().launch_args();
        assert!(args.contains(&"--disable-gpu".to_string()));
        assert!(!args.iter().any(|arg| arg == "--no-sandbox"));
    }

    #[test]
    fn test_extra_args_appended() {
        let args = ChromeLauncher::new()
            .with_args(["--no-sandbox", "--lang=en-US"])
            .launch_args();
        assert_eq!(&args[args.len() - 2..], ["--no-sandbox", "--lang=en-US"]);
    }
}
