//! Console reporting.
//!
//! Pure `format_*` functions build the strings (and are what the tests
//! exercise); thin `print_*` wrappers do the actual terminal writes. Errors
//! and failure summaries go to stderr, everything else to stdout.

use crate::config::BrandConfig;
use crate::pipeline::{BrandReport, Event, PipelineError, RunReport};
use crate::scan::ScanReport;

pub fn format_progress(index: usize, total: usize, config: &BrandConfig) -> String {
    format!(
        "[{index}/{total}] {} ({})",
        config.url_scheme, config.app.name
    )
}

pub fn format_brand_done(report: &BrandReport) -> String {
    let mut out = format!("  {} files written", report.files.len());
    for warning in &report.warnings {
        out.push_str(&format!("\n  warning: {warning}"));
    }
    out
}

pub fn format_brand_failed(url_scheme: &str, err: &PipelineError) -> String {
    format!("  {url_scheme} failed: {err}")
}

pub fn format_run_summary(report: &RunReport) -> String {
    let mut out = format!(
        "Done: {} brands, {} files",
        report.brands.len(),
        report.files_written()
    );
    if report.has_failures() {
        out.push_str(&format!(", {} failed:", report.failures.len()));
        for (scheme, err) in &report.failures {
            out.push_str(&format!("\n  {scheme}: {err}"));
        }
    }
    out
}

/// One line per brand for the `check` subcommand, broken configs last.
pub fn format_check_list(scanned: &ScanReport) -> String {
    if scanned.brands.is_empty() && scanned.failures.is_empty() {
        return "No brands found".to_string();
    }
    let mut lines: Vec<String> = scanned
        .brands
        .iter()
        .map(|b| {
            let venue = match b.config.venue_base_url() {
                Some(url) => url.to_string(),
                None => "(no venue URL)".to_string(),
            };
            format!("{}  {}  {}", b.config.url_scheme, b.config.app.name, venue)
        })
        .collect();
    for (name, err) in &scanned.failures {
        lines.push(format!("{name}  broken config: {err}"));
    }
    lines.push(format!(
        "{} brands OK, {} broken",
        scanned.brands.len(),
        scanned.failures.len()
    ));
    lines.join("\n")
}

pub fn print_event(event: &Event<'_>) {
    match event {
        Event::Started {
            index,
            total,
            config,
        } => println!("{}", format_progress(*index, *total, config)),
        Event::Finished(report) => println!("{}", format_brand_done(report)),
        Event::Failed(scheme, err) => eprintln!("{}", format_brand_failed(scheme, err)),
    }
}

pub fn print_run_summary(report: &RunReport) {
    if report.has_failures() {
        eprintln!("{}", format_run_summary(report));
    } else {
        println!("{}", format_run_summary(report));
    }
}

pub fn print_check_list(scanned: &ScanReport) {
    println!("{}", format_check_list(scanned));
}
