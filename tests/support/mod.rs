//! Shared test doubles.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use link_harvester::browser::{BrowserLauncher, BrowserOptions, BrowserSession};
use link_harvester::error::BrowserError;

/// Scripted browser. Records every call in `events`.
#[derive(Clone, Default)]
pub struct FakeBrowser {
    pub html: String,
    /// Selectors `document.querySelector` finds.
    pub present: Vec<String>,
    pub launch_error: Option<BrowserError>,
    pub navigate_error: Option<BrowserError>,
    pub content_error: Option<BrowserError>,
    pub events: Arc<Mutex<Vec<String>>>,
    pub options: Arc<Mutex<Option<BrowserOptions>>>,
}

impl FakeBrowser {
    pub fn serving(html: &str) -> Self {
        Self {
            html: html.to_string(),
            ..Default::default()
        }
    }

    pub fn with_present(mut self, selector: &str) -> Self {
        self.present.push(selector.to_string());
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.navigate_error = Some(BrowserError::Navigation("net::ERR_NAME_NOT_RESOLVED".into()));
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.launch_error = Some(BrowserError::Launch("no chrome binary".into()));
        self
    }

    pub fn failing_content(mut self) -> Self {
        self.content_error = Some(BrowserError::Script("target crashed".into()));
        self
    }

    pub fn launcher(&self) -> Arc<dyn BrowserLauncher> {
        Arc::new(self.clone())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn launched_with(&self) -> Option<BrowserOptions> {
        self.options.lock().unwrap().clone()
    }

    fn log(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }
}

#[async_trait]
impl BrowserLauncher for FakeBrowser {
    async fn launch(
        &self,
        options: &BrowserOptions,
    ) -> Result<Box<dyn BrowserSession>, BrowserError> {
        self.log("launch");
        *self.options.lock().unwrap() = Some(options.clone());
        match &self.launch_error {
            Some(e) => Err(e.clone()),
            None => Ok(Box::new(FakeSession {
                browser: self.clone(),
                closed: false,
            })),
        }
    }
}

pub struct FakeSession {
    browser: FakeBrowser,
    closed: bool,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&mut self, url: &str) -> Result<(), BrowserError> {
        self.browser.log(format!("navigate {}", url));
        match &self.browser.navigate_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn evaluate(&mut self, script: &str) -> Result<Value, BrowserError> {
        if script.contains("document.querySelector(") {
            let found = self
                .browser
                .present
                .iter()
                .any(|selector| script.contains(selector.as_str()));
            return Ok(Value::Bool(found));
        }
        Err(BrowserError::Script(format!("unexpected script: {}", script)))
    }

    async fn content(&mut self) -> Result<String, BrowserError> {
        self.browser.log("content");
        match &self.browser.content_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.browser.html.clone()),
        }
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if !self.closed {
            self.closed = true;
            self.browser.log("close");
        }
        Ok(())
    }

    fn abandon(&mut self) {
        self.browser.log("abandon");
    }
}

/// Page linking the three files used across the integration tests.
pub const LISTING: &str = r#"<html><body>
<a href="a.csv">A</a>
<a href="files/b.txt">B</a>
<a href="c.zip">C</a>
<a href="/page/2">next</a>
</body></html>"#;
