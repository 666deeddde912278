//! File name derivation and sanitization.

use crate::error::DownloadError;

/// Final path segment of an href, with query and fragment stripped.
///
/// `"files/report.pdf?v=2#top"` gives `"report.pdf"`; an href ending in `/` gives `""`.
pub fn final_segment(href: &str) -> &str {
    let path = href.split(['?', '#']).next().unwrap_or("");
    path.rsplit('/').next().unwrap_or(path)
}

/// Local file name for a downloaded href.
pub fn destination_name(href: &str) -> Result<String, DownloadError> {
    sanitize_filename(final_segment(href))
}

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String, DownloadError> {
    if name == "." || name.contains("..") {
        return Err(DownloadError::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(DownloadError::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(DownloadError::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(DownloadError::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}
