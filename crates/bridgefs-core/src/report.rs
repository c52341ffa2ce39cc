//! Extraction outcome reporting.

use std::path::Path;
use std::time::Duration;

/// What happened to a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// A regular file was written.
    Extracted {
        /// Bytes written to disk.
        bytes: u64,
    },

    /// A directory entry was created (or already existed).
    DirectoryCreated,

    /// The entry name resolved outside the destination root.
    SkippedConfinement,

    /// Materializing the entry failed; extraction went on without it.
    SkippedError(String),
}

impl EntryOutcome {
    /// Returns `true` for either skip variant.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::SkippedConfinement | Self::SkippedError(_))
    }
}

/// One entry record in an [`ExtractionReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    /// Entry name as stored in the archive.
    pub name: String,

    /// Outcome for this entry.
    pub outcome: EntryOutcome,
}

/// Report of an archive extraction operation.
///
/// Extraction is best-effort: entries that cannot be materialized are
/// skipped and recorded here, and the operation still succeeds. The bridge
/// contract only exposes success or failure, so this report is the only
/// place where skipped entries are visible.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directory entries created.
    pub directories_created: usize,

    /// Number of entries skipped for any reason.
    pub entries_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,

    /// Per-entry outcomes in archive order.
    pub entries: Vec<EntryRecord>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one entry and updates the counters.
    pub fn record(&mut self, name: impl Into<String>, outcome: EntryOutcome) {
        match &outcome {
            EntryOutcome::Extracted { bytes } => {
                self.files_extracted += 1;
                self.bytes_written = self.bytes_written.saturating_add(*bytes);
            }
            EntryOutcome::DirectoryCreated => self.directories_created += 1,
            EntryOutcome::SkippedConfinement | EntryOutcome::SkippedError(_) => {
                self.entries_skipped += 1;
            }
        }
        self.entries.push(EntryRecord {
            name: name.into(),
            outcome,
        });
    }

    /// Returns total number of entries seen.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether any entry was skipped.
    #[must_use]
    pub fn has_skipped(&self) -> bool {
        self.entries_skipped > 0
    }

    /// Iterates over the skipped entries.
    pub fn skipped(&self) -> impl Iterator<Item = &EntryRecord> {
        self.entries.iter().filter(|r| r.outcome.is_skipped())
    }

    /// Returns the outcome recorded for `name`, if the entry was seen.
    #[must_use]
    pub fn outcome_of(&self, name: &str) -> Option<&EntryOutcome> {
        self.entries
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.outcome)
    }
}

/// Callback trait for progress reporting during extraction.
///
/// Callbacks run synchronously on the extracting thread.
///
/// # Examples
///
/// ```
/// use bridgefs_core::ProgressCallback;
/// use std::path::Path;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("Processing {}/{}: {}", current, total, path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, path: &Path) {
///         println!("Completed: {}", path.display());
///     }
///
///     fn on_complete(&mut self) {
///         println!("Operation complete");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called when starting to process an entry.
    ///
    /// `total` is the number of entries in the archive, or `0` when the
    /// format cannot know it up front (tar). `current` is 1-indexed.
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called after bytes of an entry were written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when an entry has been processed, whatever its outcome.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called when the entire operation is complete.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
