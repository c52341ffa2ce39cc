//! Output formatter trait for CLI results.

use anyhow::Result;
use bridgefs_core::ExtractionReport;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, operation: &str, report: &ExtractionReport) -> Result<()>;

    /// Format the result of decompressing a single gzip file
    fn format_decompression_result(&self, output: &Path, bytes_written: u64) -> Result<()>;

    /// Format a directory listing in the bridge's `name,size,isDir|...` form
    fn format_listing(&self, listing: &str) -> Result<()>;

    /// Format a bare value such as file content or a resolved path.
    ///
    /// Printed even in quiet mode: the value is the result.
    fn format_value(&self, operation: &str, value: &str) -> Result<()>;

    /// Format success message
    fn format_success(&self, operation: &str, message: &str) -> Result<()>;
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data,
        }
    }
}

/// One record of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

/// Parses `name,size,isDir` records joined by `|`.
///
/// Splits from the right so names containing commas survive. Malformed
/// records are dropped.
pub fn parse_listing(listing: &str) -> Vec<ListingEntry> {
    listing
        .split('|')
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let mut fields = record.rsplitn(3, ',');
            let is_dir = fields.next()?.parse().ok()?;
            let size = fields.next()?.parse().ok()?;
            let name = fields.next()?.to_string();
            Some(ListingEntry { name, size, is_dir })
        })
        .collect()
}
