//! Fetch mode and wait condition definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a page is obtained before its links are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Single HTTP GET, no JavaScript execution (default).
    #[default]
    Static,
    /// Load the page in a rendering browser first.
    Dynamic,
}

impl fmt::Display for FetchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchMode::Static => write!(f, "static"),
            FetchMode::Dynamic => write!(f, "dynamic"),
        }
    }
}

impl FromStr for FetchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(FetchMode::Static),
            "dynamic" => Ok(FetchMode::Dynamic),
            _ => Err(format!("Unknown fetch mode: {}", s)),
        }
    }
}

/// Words accepted as "wait for any anchor".
const WILDCARDS: [&str; 2] = ["any", "all"];

/// Whether a wait entry means "any link" (`any` or `all`, any case).
pub fn is_wildcard(entry: &str) -> bool {
    WILDCARDS.contains(&entry.trim().to_lowercase().as_str())
}

/// What a dynamic fetch waits for before reading the rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WaitCondition {
    /// Read the HTML as soon as navigation returns.
    None,
    /// Wait for any anchor carrying an href.
    #[default]
    AnyLink,
    /// Wait for an anchor whose href ends in one of these suffixes, tried in order.
    Suffixes(Vec<String>),
}

impl WaitCondition {
    /// Build a condition from a configured list: `[]` waits for nothing, a lone
    /// wildcard waits for any link, anything else is a suffix list.
    ///
    /// A wildcard mixed with suffixes is rejected by `validate_config`.
    pub fn from_list<S: AsRef<str>>(entries: &[S]) -> Self {
        match entries {
            [] => WaitCondition::None,
            [only] if is_wildcard(only.as_ref()) => WaitCondition::AnyLink,
            _ => WaitCondition::Suffixes(entries.iter().map(|e| e.as_ref().to_string()).collect()),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, WaitCondition::None)
    }
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitCondition::None => write!(f, "nothing"),
            WaitCondition::AnyLink => write!(f, "any link"),
            WaitCondition::Suffixes(suffixes) => write!(f, "{}", suffixes.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_condition_from_empty_list() {
        let empty: [&str; 0] = [];
        assert_eq!(WaitCondition::from_list(&empty), WaitCondition::None);
    }

    #[test]
    fn test_wait_condition_wildcards() {
        assert_eq!(WaitCondition::from_list(&["any"]), WaitCondition::AnyLink);
        assert_eq!(WaitCondition::from_list(&["all"]), WaitCondition::AnyLink);
        assert_eq!(WaitCondition::from_list(&[" ANY "]), WaitCondition::AnyLink);
    }

    #[test]
    fn test_wait_condition_wildcard_not_alone_keeps_suffixes() {
        assert_eq!(
            WaitCondition::from_list(&[".zip", "any"]),
            WaitCondition::Suffixes(vec![".zip".to_string(), "any".to_string()])
        );
    }

    #[test]
    fn test_wait_condition_keeps_suffix_order() {
        let condition = WaitCondition::from_list(&[".pdf", ".zip"]);
        assert_eq!(
            condition,
            WaitCondition::Suffixes(vec![".pdf".to_string(), ".zip".to_string()])
        );
    }

    #[test]
    fn test_fetch_mode_from_str() {
        assert_eq!("Dynamic".parse::<FetchMode>().unwrap(), FetchMode::Dynamic);
        assert!("rendered".parse::<FetchMode>().is_err());
    }
}
