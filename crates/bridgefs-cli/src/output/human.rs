//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::parse_listing;
use crate::progress::humanize_bytes;
use anyhow::Result;
use bridgefs_core::EntryOutcome;
use bridgefs_core::ExtractionReport;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn check_line(&self, message: &str) -> Result<()> {
        if self.use_colors {
            self.term
                .write_line(&format!("{} {message}", style("✓").green().bold()))?;
        } else {
            self.term.write_line(message)?;
        }
        Ok(())
    }

    fn warning_line(&self, message: &str) -> Result<()> {
        if self.use_colors {
            self.term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()))?;
        } else {
            self.term.write_line(&format!("WARNING: {message}"))?;
        }
        Ok(())
    }
}

fn skip_reason(outcome: &EntryOutcome) -> &str {
    match outcome {
        EntryOutcome::SkippedConfinement => "escapes the destination root",
        EntryOutcome::SkippedError(reason) => reason.as_str(),
        EntryOutcome::Extracted { .. } | EntryOutcome::DirectoryCreated => "",
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(&self, _operation: &str, report: &ExtractionReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.check_line("Extraction complete")?;
        self.term
            .write_line(&format!("  Files extracted: {}", report.files_extracted))?;
        self.term
            .write_line(&format!("  Directories: {}", report.directories_created))?;
        self.term.write_line(&format!(
            "  Total size: {}",
            humanize_bytes(report.bytes_written)
        ))?;

        if self.verbose {
            self.term
                .write_line(&format!("  Duration: {:?}", report.duration))?;
        }

        if report.has_skipped() {
            self.warning_line(&format!(
                "{} of {} entries skipped",
                report.entries_skipped,
                report.total_entries()
            ))?;
            if self.verbose {
                for record in report.skipped() {
                    self.term.write_line(&format!(
                        "  - {}: {}",
                        record.name,
                        skip_reason(&record.outcome)
                    ))?;
                }
            }
        }

        Ok(())
    }

    fn format_decompression_result(&self, output: &Path, bytes_written: u64) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.check_line(&format!(
            "Decompressed {} to {}",
            humanize_bytes(bytes_written),
            output.display()
        ))
    }

    fn format_listing(&self, listing: &str) -> Result<()> {
        for entry in parse_listing(listing) {
            let name = if entry.is_dir {
                let name = format!("{}/", entry.name);
                if self.use_colors {
                    style(name).blue().bold().to_string()
                } else {
                    name
                }
            } else {
                entry.name
            };
            let size = if entry.is_dir {
                "-".to_string()
            } else {
                humanize_bytes(entry.size)
            };
            self.term.write_line(&format!("{size:>10}  {name}"))?;
        }
        Ok(())
    }

    fn format_value(&self, _operation: &str, value: &str) -> Result<()> {
        self.term.write_line(value)?;
        Ok(())
    }

    fn format_success(&self, _operation: &str, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.check_line(message)
    }
}
