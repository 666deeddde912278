//! Statistics reporting.

use console::style;

use crate::download::DownloadReport;
use crate::pipeline::HarvestSummary;

/// Print statistics for one download batch.
pub fn print_report(report: &DownloadReport) {
    println!();
    println!(
        "{}",
        style(format!("Downloads in {}:", report.directory.display())).bold()
    );
    println!("  Downloaded: {}", report.downloaded_count);
    println!("  Skipped:    {} (already on disk)", report.skipped_count);
    if report.failed_count > 0 {
        println!("  Failed:     {}", style(report.failed_count).red());
        for (href, error) in report.failures() {
            println!("    {} {}", style(href).dim(), error);
        }
    }
    println!("  Bytes:      {}", report.bytes_downloaded);
}

/// Print everything a run produced.
pub fn print_harvest(summary: &HarvestSummary) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style(format!("Results for {}:", summary.page_url)).bold());
    println!("  Matching links: {}", summary.links_found);
    print_report(&summary.report);
    if let Some(ref subpages) = summary.subpages {
        println!("  Subpages:   {} listed", subpages.len());
    }
    println!("{}", style("═".repeat(50)).dim());
}

/// Print a summary line for quick viewing.
pub fn print_summary(report: &DownloadReport) {
    println!(
        "Downloaded: {} files ({} skipped, {} failed)",
        style(report.downloaded_count).green(),
        style(report.skipped_count).yellow(),
        style(report.failed_count).red()
    );
}
