//! Bounded polling of page scripts.

use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, Instant};

use crate::browser::session::BrowserSession;

/// Result of a bounded poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The predicate accepted this value before the deadline.
    Ready(Value),
    /// The deadline passed; carries the last value observed, if any.
    TimedOut(Option<Value>),
}

/// Evaluate `script` until `ready` accepts its value or `timeout` elapses.
///
/// Script errors count as "not ready yet"; the page may still be loading.
pub async fn poll_script<F>(
    session: &mut dyn BrowserSession,
    script: &str,
    timeout: Duration,
    interval: Duration,
    ready: F,
) -> PollOutcome
where
    F: Fn(&Value) -> bool,
{
    let deadline = Instant::now() + timeout;
    let mut last = None;

    loop {
        match session.evaluate(script).await {
            Ok(value) if ready(&value) => return PollOutcome::Ready(value),
            Ok(value) => last = Some(value),
            Err(e) => tracing::debug!("Poll script failed: {}", e),
        }

        let now = Instant::now();
        if now >= deadline {
            return PollOutcome::TimedOut(last);
        }
        sleep(interval.min(deadline - now)).await;
    }
}
