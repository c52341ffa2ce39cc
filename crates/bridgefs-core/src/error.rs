//! Error types for bridge and extraction operations.

use thiserror::Error;

/// Result type alias using `BridgeError`.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that abort a bridge operation.
///
/// Per-entry failures during archive extraction are not represented here:
/// they are recorded as [`EntryOutcome`](crate::EntryOutcome)s in the
/// [`ExtractionReport`](crate::ExtractionReport) and extraction continues.
/// A `BridgeError` always means the operation as a whole failed.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive container is corrupted or could not be parsed.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// IO mode string is neither `Text` nor `Binary`.
    #[error("Unsupported IO mode: {0}")]
    UnsupportedMode(String),

    /// Content could not be decoded (base64 or UTF-8).
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

impl BridgeError {
    /// Returns `true` if this error came from the archive container itself
    /// rather than the file system around it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridgefs_core::BridgeError;
    ///
    /// let err = BridgeError::InvalidArchive("bad central directory".to_string());
    /// assert!(err.is_archive_error());
    ///
    /// let err = BridgeError::UnsupportedMode("Hex".to_string());
    /// assert!(!err.is_archive_error());
    /// ```
    #[must_use]
    pub const fn is_archive_error(&self) -> bool {
        matches!(self, Self::InvalidArchive(_))
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridgefs_core::BridgeError;
    ///
    /// let err = BridgeError::InvalidArchive("bad header".to_string());
    /// assert_eq!(err.context(), Some("bad header"));
    ///
    /// let err = BridgeError::Io(std::io::Error::other("boom"));
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) | Self::InvalidEncoding(msg) => Some(msg),
            Self::UnsupportedMode(mode) => Some(mode),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for BridgeError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

impl From<base64::DecodeError> for BridgeError {
    fn from(err: base64::DecodeError) -> Self {
        Self::InvalidEncoding(err.to_string())
    }
}
