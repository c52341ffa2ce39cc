//! High-level public API for confined archive extraction.

use std::path::Path;

use tracing::debug;

use crate::BridgeConfig;
use crate::ExtractionReport;
use crate::ProgressCallback;
use crate::Result;
use crate::extraction::extract_catalog;
use crate::extraction::extract_cursor;
use crate::formats::EntryCatalog;
use crate::formats::TarCursor;
use crate::formats::ZipCatalog;
use crate::formats::gzip;
use crate::report::NoopProgress;
use crate::types::DestRoot;

/// Extracts a ZIP archive under `dest_root`.
///
/// Every entry whose name resolves inside the destination root is written;
/// entries that would escape it, or that fail to materialize, are skipped
/// and recorded in the returned report.
///
/// # Errors
///
/// Returns an error only if the archive cannot be opened or its central
/// directory cannot be parsed, or if `dest_root` cannot be resolved.
///
/// # Examples
///
/// ```no_run
/// use bridgefs_core::BridgeConfig;
/// use bridgefs_core::extract_zip;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_zip("bundle.zip", "/tmp/output", &BridgeConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_root: Q,
    config: &BridgeConfig,
) -> Result<ExtractionReport> {
    extract_zip_with_progress(archive_path, dest_root, config, &mut NoopProgress)
}

/// Extracts a ZIP archive with progress reporting.
///
/// # Errors
///
/// See [`extract_zip`].
pub fn extract_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_root: Q,
    config: &BridgeConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let mut catalog = ZipCatalog::open(archive_path)?;
    let root = DestRoot::new(dest_root.as_ref())?;

    debug!(
        archive = %archive_path.display(),
        root = %root.as_path().display(),
        entries = catalog.len(),
        "extracting zip archive"
    );
    Ok(extract_catalog(&mut catalog, root, config, progress))
}

/// Extracts a gzip-compressed TAR archive under `dest_root`.
///
/// Entries are processed in stream order. Per-entry failures are skipped as
/// for ZIP, but a broken stream or an unreadable header ends the extraction
/// with an error; entries already written stay on disk.
///
/// # Errors
///
/// Returns an error if the archive cannot be opened, the gzip stream or a
/// TAR header cannot be read, or `dest_root` cannot be resolved.
///
/// # Examples
///
/// ```no_run
/// use bridgefs_core::BridgeConfig;
/// use bridgefs_core::extract_tar_gz;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_tar_gz("bundle.tar.gz", "/tmp/output", &BridgeConfig::default())?;
/// for skipped in report.skipped() {
///     eprintln!("skipped {}", skipped.name);
/// }
/// # Ok(())
/// # }
/// ```
pub fn extract_tar_gz<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_root: Q,
    config: &BridgeConfig,
) -> Result<ExtractionReport> {
    extract_tar_gz_with_progress(archive_path, dest_root, config, &mut NoopProgress)
}

/// Extracts a gzip-compressed TAR archive with progress reporting.
///
/// The total entry count passed to the callback is always `0`; a TAR
/// stream has no index.
///
/// # Errors
///
/// See [`extract_tar_gz`].
pub fn extract_tar_gz_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_root: Q,
    config: &BridgeConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let mut cursor = TarCursor::open_gz(archive_path)?;
    let root = DestRoot::new(dest_root.as_ref())?;

    debug!(
        archive = %archive_path.display(),
        root = %root.as_path().display(),
        "extracting tar.gz archive"
    );
    extract_cursor(&mut cursor, root, config, progress)
}

/// Decompresses a plain gzip file into `dest_file`.
///
/// `dest_file` is a file path, not a directory, and its parent must exist.
/// Returns the number of bytes written.
///
/// # Errors
///
/// Any failure is fatal: missing source, uncreatable destination, invalid
/// gzip header or corrupt stream.
pub fn decompress_gz<P: AsRef<Path>, Q: AsRef<Path>>(archive_path: P, dest_file: Q) -> Result<u64> {
    decompress_gz_with_progress(archive_path, dest_file, &mut NoopProgress)
}

/// Decompresses a plain gzip file with progress reporting.
///
/// The stream is reported as a single entry named after `dest_file`.
///
/// # Errors
///
/// See [`decompress_gz`].
pub fn decompress_gz_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_file: Q,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let archive_path = archive_path.as_ref();
    let dest_file = dest_file.as_ref();

    progress.on_entry_start(dest_file, 1, 1);
    let bytes = gzip::decompress_file(archive_path, dest_file)?;
    progress.on_bytes_written(bytes);
    progress.on_entry_complete(dest_file);
    progress.on_complete();

    debug!(
        archive = %archive_path.display(),
        dest = %dest_file.display(),
        bytes,
        "decompressed gzip file"
    );
    Ok(bytes)
}
