//! Form-driving primitives for rendered pages.
//!
//! Every primitive waits (bounded) for its element, then acts on it. Timeouts and
//! missing elements are logged and reported as `false` / `None` rather than raised,
//! so multi-step scripts decide for themselves whether to carry on.

use std::time::Duration;

use serde_json::Value;

use crate::browser::locator::{js_string, Locator};
use crate::browser::poll::{poll_script, PollOutcome};
use crate::browser::session::BrowserSession;

/// Default bound on every element wait.
pub const DEFAULT_INTERACTION_TIMEOUT: Duration = Duration::from_secs(15);

/// Default pause between element probes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Which option of a dropdown to pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectChoice {
    /// Match the option's `value` attribute.
    Value(String),
    /// Match the option's visible text.
    Text(String),
    /// Position in the option list.
    Index(usize),
}

/// Element readiness required before acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    Visible,
    Clickable,
}

impl Readiness {
    fn accepts(self, state: &str) -> bool {
        match self {
            Readiness::Visible => state == "ready" || state == "disabled",
            Readiness::Clickable => state == "ready",
        }
    }
}

/// Drives one browser session through clicks, selections and text entry.
pub struct Interactor<'a> {
    session: &'a mut dyn BrowserSession,
    timeout: Duration,
    poll_interval: Duration,
}

impl<'a> Interactor<'a> {
    pub fn new(session: &'a mut dyn BrowserSession) -> Self {
        Self {
            session,
            timeout: DEFAULT_INTERACTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Wait until the element is clickable, then click it.
    pub async fn click(&mut self, locator: &Locator) -> bool {
        if !self.wait_for(locator, Readiness::Clickable, "button").await {
            return false;
        }

        let script = format!(
            r#"(function () {{
  var el = {};
  if (!el) return "missing";
  el.click();
  return "ok";
}})()"#,
            locator.to_js()
        );
        self.act(locator, "button", &script).await
    }

    /// Wait until the dropdown is clickable, then pick an option.
    ///
    /// With `wait_for_visibility` the element must first become visible.
    pub async fn select(
        &mut self,
        locator: &Locator,
        choice: &SelectChoice,
        wait_for_visibility: bool,
    ) -> bool {
        if wait_for_visibility && !self.wait_for(locator, Readiness::Visible, "menu").await {
            return false;
        }
        if !self.wait_for(locator, Readiness::Clickable, "menu").await {
            return false;
        }

        let find_option = match choice {
            SelectChoice::Value(value) => format!(
                "for (var i = 0; i < el.options.length; i++) {{ if (el.options[i].value === {}) {{ idx = i; break; }} }}",
                js_string(value)
            ),
            SelectChoice::Text(text) => format!(
                "for (var i = 0; i < el.options.length; i++) {{ if (el.options[i].text.trim() === {}) {{ idx = i; break; }} }}",
                js_string(text.trim())
            ),
            SelectChoice::Index(index) => {
                format!("if ({index} < el.options.length) {{ idx = {index}; }}")
            }
        };

        let script = format!(
            r#"(function () {{
  var el = {};
  if (!el) return "missing";
  if (el.tagName !== "SELECT") return "not-select";
  var idx = -1;
  {}
  if (idx < 0) return "no-option";
  el.selectedIndex = idx;
  el.dispatchEvent(new Event("change", {{ bubbles: true }}));
  return "ok";
}})()"#,
            locator.to_js(),
            find_option
        );
        self.act(locator, "menu", &script).await
    }

    /// Wait until the text box is clickable, clear it, then enter `text`.
    pub async fn enter_text(&mut self, locator: &Locator, text: &str) -> bool {
        if !self.wait_for(locator, Readiness::Clickable, "text box").await {
            return false;
        }

        let script = format!(
            r#"(function () {{
  var el = {};
  if (!el) return "missing";
  el.focus();
  el.value = "";
  el.value = {};
  el.dispatchEvent(new Event("input", {{ bubbles: true }}));
  el.dispatchEvent(new Event("change", {{ bubbles: true }}));
  return "ok";
}})()"#,
            locator.to_js(),
            js_string(text)
        );
        self.act(locator, "text box", &script).await
    }

    /// Wait until the element is clickable and read its resolved `href`.
    pub async fn href(&mut self, locator: &Locator) -> Option<String> {
        if !self.wait_for(locator, Readiness::Clickable, "link").await {
            return None;
        }

        let script = format!(
            r#"(function () {{
  var el = {};
  if (!el) return null;
  return el.href || el.getAttribute("href");
}})()"#,
            locator.to_js()
        );

        match self.session.evaluate(&script).await {
            Ok(Value::String(href)) if !href.is_empty() => Some(href),
            Ok(_) => {
                tracing::error!("Element with identifier {} has no href", locator);
                None
            }
            Err(e) => {
                tracing::error!("An error occurred reading href of {}: {}", locator, e);
                None
            }
        }
    }

    async fn wait_for(&mut self, locator: &Locator, readiness: Readiness, what: &str) -> bool {
        let script = element_state_script(locator);
        let outcome = poll_script(
            &mut *self.session,
            &script,
            self.timeout,
            self.poll_interval,
            |value| value.as_str().is_some_and(|state| readiness.accepts(state)),
        )
        .await;

        match outcome {
            PollOutcome::Ready(_) => true,
            PollOutcome::TimedOut(Some(Value::String(state))) if state != "missing" => {
                tracing::error!(
                    "Timeout: the {} with identifier {} was not {} within {} seconds ({})",
                    what,
                    locator,
                    match readiness {
                        Readiness::Visible => "visible",
                        Readiness::Clickable => "clickable",
                    },
                    self.timeout.as_secs_f32(),
                    state
                );
                false
            }
            PollOutcome::TimedOut(_) => {
                tracing::error!(
                    "Error: the {} with identifier {} was not found",
                    what,
                    locator
                );
                false
            }
        }
    }

    async fn act(&mut self, locator: &Locator, what: &str, script: &str) -> bool {
        match self.session.evaluate(script).await {
            Ok(Value::String(status)) if status == "ok" => true,
            Ok(Value::String(status)) if status == "missing" => {
                tracing::error!(
                    "Error: the {} with identifier {} was not found",
                    what,
                    locator
                );
                false
            }
            Ok(other) => {
                tracing::error!(
                    "Could not operate the {} with identifier {}: {}",
                    what,
                    locator,
                    other
                );
                false
            }
            Err(e) => {
                tracing::error!("An error occurred on {} {}: {}", what, locator, e);
                false
            }
        }
    }
}

/// Script reporting `missing`, `hidden`, `disabled` or `ready` for the element.
fn element_state_script(locator: &Locator) -> String {
    format!(
        r#"(function () {{
  var el = {};
  if (!el) return "missing";
  if (!(el.offsetWidth || el.offsetHeight || el.getClientRects().length)) return "hidden";
  if (el.disabled) return "disabled";
  return "ready";
}})()"#,
        locator.to_js()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowserError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    type Responder = Box<dyn FnMut(&str) -> Result<Value, BrowserError> + Send>;

    struct ScriptedSession {
        respond: Responder,
        scripts: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedSession {
        fn new(respond: Responder) -> (Self, Arc<Mutex<Vec<String>>>) {
            let scripts = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    respond,
                    scripts: scripts.clone(),
                },
                scripts,
            )
        }
    }

    #[async_trait]
    impl BrowserSession for ScriptedSession {
        async fn navigate(&mut self, _url: &str) -> Result<(), BrowserError> {
            Ok(())
        }

        async fn evaluate(&mut self, script: &str) -> Result<Value, BrowserError> {
            self.scripts.lock().unwrap().push(script.to_string());
            (self.respond)(script)
        }

        async fn content(&mut self) -> Result<String, BrowserError> {
            Ok(String::new())
        }

        async fn close(&mut self) -> Result<(), BrowserError> {
            Ok(())
        }
    }

    fn is_state_probe(script: &str) -> bool {
        script.contains(r#"return "hidden""#)
    }

    fn quick(session: &mut ScriptedSession) -> Interactor<'_> {
        Interactor::new(session)
            .with_timeout(Duration::from_millis(50))
            .with_poll_interval(Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_click_ready_element() {
        let (mut session, scripts) = ScriptedSession::new(Box::new(|script| {
            if is_state_probe(script) {
                Ok(Value::from("ready"))
            } else {
                Ok(Value::from("ok"))
            }
        }));

        assert!(quick(&mut session).click(&Locator::id("go")).await);
        let scripts = scripts.lock().unwrap();
        assert!(scripts.last().unwrap().contains("el.click()"));
        assert!(scripts.last().unwrap().contains(r#"getElementById("go")"#));
    }

    #[tokio::test]
    async fn test_click_missing_element_times_out() {
        let (mut session, scripts) =
            ScriptedSession::new(Box::new(|_| Ok(Value::from("missing"))));

        assert!(!quick(&mut session).click(&Locator::id("nope")).await);
        assert!(scripts
            .lock()
            .unwrap()
            .iter()
            .all(|s| !s.contains("el.click()")));
    }

    #[tokio::test]
    async fn test_click_waits_until_enabled() {
        let mut probes = 0;
        let (mut session, _) = ScriptedSession::new(Box::new(move |script| {
            if is_state_probe(script) {
                probes += 1;
                Ok(Value::from(if probes < 3 { "disabled" } else { "ready" }))
            } else {
                Ok(Value::from("ok"))
            }
        }));

        let mut interactor = Interactor::new(&mut session)
            .with_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(1));
        assert!(interactor.click(&Locator::css("button.submit")).await);
    }

    #[tokio::test]
    async fn test_select_by_text_builds_lookup() {
        let (mut session, scripts) = ScriptedSession::new(Box::new(|script| {
            if is_state_probe(script) {
                Ok(Value::from("ready"))
            } else {
                Ok(Value::from("ok"))
            }
        }));

        let choice = SelectChoice::Text(" Maryland ".to_string());
        assert!(
            quick(&mut session)
                .select(&Locator::name("state"), &choice, true)
                .await
        );

        let scripts = scripts.lock().unwrap();
        let action = scripts.last().unwrap();
        assert!(action.contains(r#"el.options[i].text.trim() === "Maryland""#));
        assert!(action.contains("selectedIndex"));
    }

    #[tokio::test]
    async fn test_select_unknown_option_fails() {
        let (mut session, _) = ScriptedSession::new(Box::new(|script| {
            if is_state_probe(script) {
                Ok(Value::from("ready"))
            } else {
                Ok(Value::from("no-option"))
            }
        }));

        let choice = SelectChoice::Index(40);
        assert!(
            !quick(&mut session)
                .select(&Locator::id("year"), &choice, false)
                .await
        );
    }

    #[tokio::test]
    async fn test_enter_text_escapes_value() {
        let (mut session, scripts) = ScriptedSession::new(Box::new(|script| {
            if is_state_probe(script) {
                Ok(Value::from("ready"))
            } else {
                Ok(Value::from("ok"))
            }
        }));

        assert!(
            quick(&mut session)
                .enter_text(&Locator::id("zip"), "20\"500")
                .await
        );
        let scripts = scripts.lock().unwrap();
        assert!(scripts.last().unwrap().contains(r#"el.value = "20\"500";"#));
    }

    #[tokio::test]
    async fn test_href() {
        let (mut session, _) = ScriptedSession::new(Box::new(|script| {
            if is_state_probe(script) {
                Ok(Value::from("ready"))
            } else {
                Ok(Value::from("https://example.org/export.csv"))
            }
        }));

        assert_eq!(
            quick(&mut session).href(&Locator::css("a.export")).await,
            Some("https://example.org/export.csv".to_string())
        );
    }

    #[tokio::test]
    async fn test_href_script_error_is_none() {
        let (mut session, _) = ScriptedSession::new(Box::new(|script| {
            if is_state_probe(script) {
                Ok(Value::from("ready"))
            } else {
                Err(BrowserError::Script("detached".to_string()))
            }
        }));

        assert_eq!(quick(&mut session).href(&Locator::css("a")).await, None);
    }

    #[test]
    fn test_readiness() {
        assert!(Readiness::Visible.accepts("disabled"));
        assert!(!Readiness::Clickable.accepts("disabled"));
        assert!(!Readiness::Visible.accepts("hidden"));
    }
}
