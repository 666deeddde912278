//! Browser automation for dynamic pages.
//!
//! This module provides:
//! - The launcher/session seam every dynamic fetch goes through
//! - A scoped guard that releases the browser on every exit path
//! - Element locators and form-driving primitives (click, select, type, read href)
//! - The Chrome DevTools driver (`browser` feature)

#[cfg(feature = "browser")]
pub mod chrome;
pub mod interaction;
pub mod locator;
pub mod poll;
pub mod session;

#[cfg(feature = "browser")]
pub use chrome::{ChromeLauncher, ChromeSession};
pub use interaction::{Interactor, SelectChoice, DEFAULT_INTERACTION_TIMEOUT, DEFAULT_POLL_INTERVAL};
pub use locator::Locator;
pub use poll::{poll_script, PollOutcome};
pub use session::{BrowserGuard, BrowserLauncher, BrowserOptions, BrowserSession, UnavailableLauncher};

use std::sync::Arc;

/// Launcher for this build: Chrome with `browser_args` when the `browser` feature is on.
pub fn default_launcher(browser_args: &[String]) -> Arc<dyn BrowserLauncher> {
    #[cfg(feature = "browser")]
    {
        Arc::new(ChromeLauncher::new().with_args(browser_args.iter().cloned()))
    }
    #[cfg(not(feature = "browser"))]
    {
        let _ = browser_args;
        Arc::new(UnavailableLauncher)
    }
}
