//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     link-harvester                                    ║
║     Bulk downloads of files linked from a page        ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// What a run is about to do.
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    pub url: &'a str,
    pub mode: String,
    pub file_types: &'a [String],
    pub directory: String,
    pub subpages: bool,
    pub log_file: Option<String>,
}

/// Print configuration summary.
pub fn print_config_summary(summary: &RunSummary<'_>) {
    let file_types = if summary.file_types.is_empty() {
        "all links".to_string()
    } else {
        summary.file_types.join(", ")
    };

    println!();
    println!("{}", style("Configuration:").bold());
    println!("  URL: {}", summary.url);
    println!("  Mode: {}", summary.mode);
    println!("  File types: {}", file_types);
    println!("  Directory: {}", summary.directory);
    if summary.subpages {
        println!("  Subpages: collected");
    }
    if let Some(ref log_file) = summary.log_file {
        println!("  Log file: {}", log_file);
    }
    println!();
}
