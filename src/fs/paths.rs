//! Path and directory management.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::Result;

/// Folder created under the output directory for downloaded files.
pub const DATA_DIR: &str = "data";

/// Folder created under the log root for run logs.
pub const LOGS_DIR: &str = "logs";

/// Directory downloads land in.
///
/// Subpage runs are handed the final directory already, so nothing is appended.
pub fn data_directory(output_dir: &Path, is_subpage: bool) -> PathBuf {
    if is_subpage {
        output_dir.to_path_buf()
    } else {
        output_dir.join(DATA_DIR)
    }
}

/// Log file for one run: `<root>/logs/<resource>_<YYYYmmdd_HHMMSS>.log`.
pub fn log_file_path(root: &Path, resource_name: &str, started: DateTime<Local>) -> PathBuf {
    root.join(LOGS_DIR).join(format!(
        "{}_{}.log",
        resource_name,
        started.format("%Y%m%d_%H%M%S")
    ))
}

/// In-flight download path; renamed onto `destination` once the body is written.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_data_directory() {
        let out = Path::new("/downloads/site");
        assert_eq!(
            data_directory(out, false),
            PathBuf::from("/downloads/site/data")
        );
        assert_eq!(data_directory(out, true), PathBuf::from("/downloads/site"));
    }

    #[test]
    fn test_log_file_path() {
        let started = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            log_file_path(Path::new("scripts"), "ed-express", started),
            PathBuf::from("scripts/logs/ed-express_20240309_140507.log")
        );
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path(Path::new("/tmp/data/a.csv")),
            PathBuf::from("/tmp/data/a.csv.part")
        );
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }
}
