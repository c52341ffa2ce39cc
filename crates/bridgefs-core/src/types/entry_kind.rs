//! Archive entry kind.

/// Kind of an entry read from an archive.
///
/// Only directories and regular files are materialized. Everything else
/// (symlinks, hardlinks, device nodes, fifos) is reported as `Other` and
/// skipped by the extractors.
///
/// # Examples
///
/// ```
/// use bridgefs_core::types::EntryKind;
///
/// assert!(EntryKind::File.is_file());
/// assert!(EntryKind::Directory.is_directory());
/// assert!(!EntryKind::Other("symlink").is_file());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Any other entry type, with a short description of it.
    Other(&'static str),
}

impl EntryKind {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns a short human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Other(name) => name,
        }
    }
}

/// Metadata of one archive entry, as stored (untrusted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    /// Entry name exactly as it appears in the archive.
    pub name: String,

    /// Entry kind.
    pub kind: EntryKind,

    /// Stored unix permission bits, if the archive carries them.
    pub mode: Option<u32>,
}

impl EntryHeader {
    /// Creates a header.
    pub fn new(name: impl Into<String>, kind: EntryKind, mode: Option<u32>) -> Self {
        Self {
            name: name.into(),
            kind,
            mode,
        }
    }
}
