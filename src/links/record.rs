//! Resolved links.

use url::Url;

use crate::fs::final_segment;

/// An href together with its absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// As written in the page; possibly relative.
    pub href: String,
    pub resolved_url: Url,
    /// Dotted extension of the final path segment, if any.
    pub suffix: Option<String>,
}

impl LinkRecord {
    /// Resolve `href` against `base` with standard relative-URL rules.
    pub fn resolve(href: &str, base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            href: href.to_string(),
            resolved_url: base.join(href)?,
            suffix: suffix_of(href),
        })
    }
}

fn suffix_of(href: &str) -> Option<String> {
    let segment = final_segment(href);
    let dot = segment.rfind('.')?;
    let suffix = &segment[dot..];
    (dot > 0 && suffix.len() > 1).then(|| suffix.to_string())
}
