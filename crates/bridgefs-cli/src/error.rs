//! Error conversion utilities for CLI.
//!
//! Converts bridgefs-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use bridgefs_core::BridgeError;
use bridgefs_core::FlagResult;
use std::io;
use std::path::Path;

/// Converts a `BridgeError` raised while processing `archive`.
pub fn convert_archive_error(err: BridgeError, archive: &Path) -> anyhow::Error {
    match err {
        BridgeError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            anyhow!(
                "Cannot open '{}': {io_err}\n\
                 HINT: Relative paths are resolved against --base-dir.",
                archive.display()
            )
        }
        BridgeError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {io_err}",
                archive.display()
            )
        }
        err if err.is_archive_error() => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted, truncated, or in a different format.",
                archive.display(),
                err.context().unwrap_or("unreadable container")
            )
        }
        other => anyhow::Error::from(other)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, BridgeError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}

/// Turns a failed bridge call into an error carrying its message.
pub fn check_flag(operation: &str, result: FlagResult) -> anyhow::Result<FlagResult> {
    if result.flag {
        Ok(result)
    } else {
        Err(anyhow!("{operation} failed: {}", result.data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_not_found_error() {
        let err = BridgeError::Io(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        let converted = convert_archive_error(err, Path::new("missing.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("missing.zip"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_archive_error() {
        let err = BridgeError::InvalidArchive("could not find central directory".to_string());
        let converted = convert_archive_error(err, Path::new("broken.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("Invalid archive"));
        assert!(msg.contains("central directory"));
    }

    #[test]
    fn test_convert_other_error_keeps_source() {
        let err = BridgeError::InvalidEncoding("bad utf-8".to_string());
        let converted = convert_archive_error(err, Path::new("a.gz"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("a.gz"));
        assert!(msg.contains("bad utf-8"));
    }

    #[test]
    fn test_check_flag() {
        assert!(check_flag("read", FlagResult::success("hi")).is_ok());

        let err = check_flag("read", FlagResult::failure("permission denied")).unwrap_err();
        assert_eq!(err.to_string(), "read failed: permission denied");
    }
}
