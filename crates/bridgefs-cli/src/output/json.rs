//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::parse_listing;
use anyhow::Result;
use bridgefs_core::EntryOutcome;
use bridgefs_core::ExtractionReport;
use serde::Serialize;
use std::io;
use std::io::Write;
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SkippedEntry<'a> {
    name: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
struct ExtractionOutput<'a> {
    files_extracted: usize,
    directories_created: usize,
    entries_skipped: usize,
    bytes_written: u64,
    duration_ms: u128,
    skipped: Vec<SkippedEntry<'a>>,
}

impl<'a> ExtractionOutput<'a> {
    fn from_report(report: &'a ExtractionReport) -> Self {
        let skipped = report
            .skipped()
            .map(|record| SkippedEntry {
                name: &record.name,
                reason: match &record.outcome {
                    EntryOutcome::SkippedError(reason) => reason.as_str(),
                    _ => "confinement",
                },
            })
            .collect();

        Self {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            skipped,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(&self, operation: &str, report: &ExtractionReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            operation,
            ExtractionOutput::from_report(report),
        ))
    }

    fn format_decompression_result(&self, output: &Path, bytes_written: u64) -> Result<()> {
        #[derive(Serialize)]
        struct DecompressionOutput {
            output: String,
            bytes_written: u64,
        }

        Self::output(&JsonOutput::success(
            "gunzip",
            DecompressionOutput {
                output: output.display().to_string(),
                bytes_written,
            },
        ))
    }

    fn format_listing(&self, listing: &str) -> Result<()> {
        Self::output(&JsonOutput::success("ls", parse_listing(listing)))
    }

    fn format_value(&self, operation: &str, value: &str) -> Result<()> {
        #[derive(Serialize)]
        struct ValueData<'a> {
            value: &'a str,
        }

        Self::output(&JsonOutput::success(operation, ValueData { value }))
    }

    fn format_success(&self, operation: &str, message: &str) -> Result<()> {
        #[derive(Serialize)]
        struct SuccessData<'a> {
            message: &'a str,
        }

        Self::output(&JsonOutput::success(operation, SuccessData { message }))
    }
}
