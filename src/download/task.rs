//! Download task planning.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::DownloadError;
use crate::fs::destination_name;
use crate::links::LinkRecord;

/// One file to fetch and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub url: Url,
    pub destination: PathBuf,
}

impl DownloadTask {
    /// Destination is `directory/<final path segment of the href>`.
    pub fn plan(record: &LinkRecord, directory: &Path) -> Result<Self, DownloadError> {
        let name = destination_name(&record.href)?;
        Ok(Self {
            url: record.resolved_url.clone(),
            destination: directory.join(name),
        })
    }

    /// Resolve `href` against `base_url` and plan it.
    pub fn from_href(href: &str, base_url: &Url, directory: &Path) -> Result<Self, DownloadError> {
        let record =
            LinkRecord::resolve(href, base_url).map_err(|source| DownloadError::InvalidUrl {
                href: href.to_string(),
                source,
            })?;
        Self::plan(&record, directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_uses_href_basename() {
        let base = Url::parse("https://example.org/data/").unwrap();
        let task =
            DownloadTask::from_href("files/2024/a.csv?v=3", &base, Path::new("/out/data")).unwrap();
        assert_eq!(
            task.url.as_str(),
            "https://example.org/data/files/2024/a.csv?v=3"
        );
        assert_eq!(task.destination, PathBuf::from("/out/data/a.csv"));
    }

    #[test]
    fn test_plan_rejects_directory_href() {
        let base = Url::parse("https://example.org/").unwrap();
        assert!(matches!(
            DownloadTask::from_href("/reports/", &base, Path::new("/out")),
            Err(DownloadError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_plan_rejects_unresolvable_href() {
        let base = Url::parse("https://example.org/").unwrap();
        assert!(matches!(
            DownloadTask::from_href("http://[bad/x.zip", &base, Path::new("/out")),
            Err(DownloadError::InvalidUrl { .. })
        ));
    }
}
