//! Statistics reporting.

use std::path::Path;

use console::style;

use crate::download::{BatchReport, DownloadTask};

/// Print the outcome of a download batch.
pub fn print_batch_stats(report: &BatchReport) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Download Statistics:").bold());
    println!("  Downloaded: {}", style(report.downloaded_count()).green());
    if report.has_failures() {
        println!("  Failed:     {}", style(report.failed_count()).red());
        for failure in &report.failed {
            let target = failure
                .destination
                .as_deref()
                .map(Path::display)
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("    {} -> {} ({})", failure.url, target, failure.reason);
        }
    }
    println!("  Total:      {}", report.total());
    println!("{}", style("═".repeat(50)).dim());
}

/// Print the downloads a dry run would perform.
pub fn print_planned_downloads(tasks: &[DownloadTask]) {
    println!();
    println!(
        "{}",
        style(format!("{} file(s) would be downloaded:", tasks.len())).bold()
    );
    for task in tasks {
        println!("  {} -> {}", task.source_url, task.destination.display());
    }
}
