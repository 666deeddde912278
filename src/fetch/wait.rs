//! Waiting for qualifying links to appear on a rendered page.
//!
//! Suffixes are tried in order, each with its own timeout; the first one whose anchor
//! shows up wins. The search is a small state machine:
//!
//! ```text
//! Polling(0) --miss--> Polling(1) --miss--> ... --miss--> Exhausted
//!     |hit                 |hit
//!     v                    v
//!  Found(0)             Found(1)
//! ```

use std::time::Duration;

use serde_json::Value;

use crate::browser::locator::{css_string, js_string};
use crate::browser::poll::{poll_script, PollOutcome};
use crate::browser::BrowserSession;
use crate::config::WaitCondition;

/// One element query tried during the wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// What is being waited for, for logs.
    pub label: String,
    /// CSS selector of a qualifying anchor.
    pub selector: String,
}

impl Probe {
    /// Script that is `true` once a matching anchor exists.
    pub fn presence_script(&self) -> String {
        format!(
            "document.querySelector({}) !== null",
            js_string(&self.selector)
        )
    }
}

/// Probes for a wait condition, in the order they are tried.
pub fn probes(condition: &WaitCondition) -> Vec<Probe> {
    match condition {
        WaitCondition::None => Vec::new(),
        WaitCondition::AnyLink => vec![Probe {
            label: "any link".to_string(),
            selector: "a[href]".to_string(),
        }],
        WaitCondition::Suffixes(suffixes) => suffixes
            .iter()
            .map(|suffix| Probe {
                label: suffix.clone(),
                selector: format!("a[href$={}]", css_string(suffix)),
            })
            .collect(),
    }
}

/// Position in the ordered search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Polling(usize),
    Found(usize),
    Exhausted,
}

impl WaitState {
    pub fn start(probe_count: usize) -> Self {
        if probe_count == 0 {
            WaitState::Exhausted
        } else {
            WaitState::Polling(0)
        }
    }

    /// Next state after the current probe hit or timed out.
    pub fn advance(self, matched: bool, probe_count: usize) -> Self {
        match self {
            WaitState::Polling(index) if matched => WaitState::Found(index),
            WaitState::Polling(index) if index + 1 < probe_count => WaitState::Polling(index + 1),
            WaitState::Polling(_) => WaitState::Exhausted,
            terminal => terminal,
        }
    }
}

/// How a wait ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// Nothing was requested.
    Skipped,
    /// A matching anchor appeared; carries the probe label.
    Found(String),
    /// Every probe timed out.
    Exhausted,
}

/// Wait for the first anchor satisfying `condition`. Never fails: an exhausted
/// search is logged and the caller parses whatever HTML is present.
pub async fn wait_for_links(
    session: &mut dyn BrowserSession,
    condition: &WaitCondition,
    timeout: Duration,
    interval: Duration,
) -> WaitOutcome {
    if condition.is_none() {
        tracing::info!("No file types specified - proceed to parse HTML");
        return WaitOutcome::Skipped;
    }

    let probes = probes(condition);
    let mut state = WaitState::start(probes.len());

    loop {
        match state {
            WaitState::Polling(index) => {
                let probe = &probes[index];
                tracing::debug!("Waiting for {} ({})", probe.label, probe.selector);
                let outcome = poll_script(
                    &mut *session,
                    &probe.presence_script(),
                    timeout,
                    interval,
                    |value| *value == Value::Bool(true),
                )
                .await;
                state = state.advance(matches!(outcome, PollOutcome::Ready(_)), probes.len());
            }
            WaitState::Found(index) => {
                let label = probes[index].label.clone();
                tracing::info!("Found {} file - proceed to parse HTML", label);
                return WaitOutcome::Found(label);
            }
            WaitState::Exhausted => {
                tracing::error!(
                    "No element found containing the specified file types: {}",
                    condition
                );
                return WaitOutcome::Exhausted;
            }
        }
    }
}
