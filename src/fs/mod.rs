//! Filesystem module.
//!
//! Provides:
//! - Download and log directory layout
//! - Destination file name derivation

pub mod naming;
pub mod paths;

pub use naming::{destination_name, final_segment, sanitize_filename};
pub use paths::{data_directory, ensure_dir, log_file_path, partial_path, DATA_DIR, LOGS_DIR};
