//! Subpage discovery.
//!
//! A subpage is any link whose final path segment does not end in a dotted 3 to 5
//! character extension. They are resolved and written to a manifest so a later run
//! can harvest each one; nothing here recurses.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};
use crate::fs::final_segment;
use crate::links::record::LinkRecord;

/// File name of the subpage manifest.
pub const SUBPAGE_MANIFEST: &str = "subpages.txt";

static FILE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\w{3,5}$").expect("static extension pattern"));

/// Whether `href` looks like a page rather than a file.
pub fn is_subpage(href: &str) -> bool {
    !FILE_EXTENSION.is_match(final_segment(href))
}

/// Resolve the subpage candidates among `hrefs` and overwrite
/// `destination/subpages.txt` with them, one absolute URL per line.
pub async fn collect_subpages(
    hrefs: &[String],
    base_url: &Url,
    destination: &Path,
) -> Result<Vec<Url>> {
    let subpages: Vec<Url> = hrefs
        .iter()
        .filter(|href| is_subpage(href))
        .filter_map(|href| match LinkRecord::resolve(href, base_url) {
            Ok(record) => Some(record.resolved_url),
            Err(e) => {
                tracing::warn!("Skipping unresolvable subpage '{}': {}", href, e);
                None
            }
        })
        .collect();

    tracing::info!("Found {} subpages", subpages.len());

    let manifest = manifest_path(destination);
    let mut contents = String::new();
    for url in &subpages {
        contents.push_str(url.as_str());
        contents.push('\n');
    }

    tokio::fs::create_dir_all(destination).await?;
    tokio::fs::write(&manifest, contents).await.map_err(|e| {
        tracing::error!("Failed to write {}: {}", manifest.display(), e);
        Error::Io(e)
    })?;

    Ok(subpages)
}

pub fn manifest_path(destination: &Path) -> PathBuf {
    destination.join(SUBPAGE_MANIFEST)
}
