//! Element locators and the JavaScript that resolves them.

use std::fmt;

use serde_json::Value;

/// How an element on a rendered page is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
    Id(String),
    Name(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Locator::Name(name.into())
    }

    /// JavaScript expression evaluating to the element or `null`.
    pub fn to_js(&self) -> String {
        match self {
            Locator::Css(selector) => format!("document.querySelector({})", js_string(selector)),
            Locator::XPath(expression) => format!(
                "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
                js_string(expression)
            ),
            Locator::Id(id) => format!("document.getElementById({})", js_string(id)),
            Locator::Name(name) => format!(
                "(document.getElementsByName({})[0] || null)",
                js_string(name)
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css '{}'", s),
            Locator::XPath(s) => write!(f, "xpath '{}'", s),
            Locator::Id(s) => write!(f, "id '{}'", s),
            Locator::Name(s) => write!(f, "name '{}'", s),
        }
    }
}

/// Quote `value` as a JavaScript string literal.
pub fn js_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Quote `value` for use inside a single-quoted CSS attribute selector.
pub fn css_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}
