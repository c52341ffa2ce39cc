//! Confined archive extraction and file-system operations for a webview
//! frontend.
//!
//! `bridgefs-core` extracts ZIP and gzip-compressed TAR archives without
//! ever writing outside the chosen destination root, decompresses plain
//! gzip files, and exposes the plain file operations the frontend needs.
//! Entries whose names would escape the root (`../evil.txt`) are skipped
//! rather than failing the whole extraction.
//!
//! Two layers are available:
//!
//! - The typed API ([`extract_zip`], [`extract_tar_gz`], [`decompress_gz`])
//!   returns an [`ExtractionReport`] listing what happened to each entry.
//! - The [`Bridge`] resolves caller paths against the application base
//!   directory and answers every call with a [`FlagResult`], the shape the
//!   frontend consumes.
//!
//! # Examples
//!
//! ```no_run
//! use bridgefs_core::BridgeConfig;
//! use bridgefs_core::extract_zip;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_zip("bundle.zip", "/output/dir", &BridgeConfig::default())?;
//! println!(
//!     "Extracted {} files, skipped {}",
//!     report.files_extracted, report.entries_skipped
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod bridge;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod fileio;
pub mod formats;
pub mod paths;
pub mod report;
pub mod result;
pub mod security;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::decompress_gz;
pub use api::decompress_gz_with_progress;
pub use api::extract_tar_gz;
pub use api::extract_tar_gz_with_progress;
pub use api::extract_zip;
pub use api::extract_zip_with_progress;
pub use bridge::Bridge;
pub use config::BridgeConfig;
pub use error::BridgeError;
pub use error::Result;
pub use fileio::IoMode;
pub use report::EntryOutcome;
pub use report::EntryRecord;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use result::FlagResult;
pub use types::DestRoot;
pub use types::EntryHeader;
pub use types::EntryKind;
pub use types::ResolvedPath;
