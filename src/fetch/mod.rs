//! Page fetching module.
//!
//! This module provides:
//! - The shared HTTP client and user agent choice
//! - Fetch requests and parsed pages
//! - Static and browser-rendered fetching
//! - Waiting for qualifying links on rendered pages

pub mod fetcher;
pub mod http;
pub mod page;
pub mod wait;

pub use fetcher::PageFetcher;
pub use http::{GetFailure, HttpClient, UserAgents};
pub use page::{FetchRequest, ParsedPage, DEFAULT_FETCH_TIMEOUT};
pub use wait::{probes, wait_for_links, Probe, WaitOutcome, WaitState};
