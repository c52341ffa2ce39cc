//! ZIP archive access.

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use zip::ZipArchive;

use super::traits::EntryCatalog;
use crate::Result;
use crate::types::EntryHeader;
use crate::types::EntryKind;

/// Unix file-type bits for a symbolic link.
const S_IFLNK: u32 = 0o120_000;
/// Mask selecting the unix file-type bits.
const S_IFMT: u32 = 0o170_000;

/// Random-access catalog over a ZIP archive.
///
/// Opening parses the central directory at the end of the file; a file
/// without a valid central directory fails here, before any entry is
/// touched.
pub struct ZipCatalog<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl ZipCatalog<File> {
    /// Opens the ZIP file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a ZIP archive.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipCatalog<R> {
    /// Parses a ZIP archive from any seekable reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the central directory cannot be read.
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }
}

impl<R: Read + Seek> EntryCatalog for ZipCatalog<R> {
    fn len(&self) -> usize {
        self.archive.len()
    }

    fn name_of(&self, index: usize) -> Option<&str> {
        self.archive.name_for_index(index)
    }

    fn with_entry<T, F>(&mut self, index: usize, visit: F) -> Result<T>
    where
        F: FnOnce(&EntryHeader, &mut dyn Read) -> T,
    {
        let mut entry = self.archive.by_index(index)?;

        let mode = entry.unix_mode();
        let kind = if entry.is_dir() {
            EntryKind::Directory
        } else if mode.is_some_and(|m| m & S_IFMT == S_IFLNK) {
            EntryKind::Other("symlink")
        } else {
            EntryKind::File
        };

        let header = EntryHeader::new(entry.name(), kind, mode.map(|m| m & 0o7777));
        Ok(visit(&header, &mut entry))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::BridgeError;
    use crate::test_utils::ZipTestBuilder;
    use std::io::Cursor;

    fn read_all(reader: &mut dyn Read) -> Vec<u8> {
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_catalog_lists_entries_in_order() {
        let data = ZipTestBuilder::new()
            .add_file("a.txt", b"hi")
            .add_directory("sub/")
            .add_file("sub/b.txt", b"there")
            .build();
        let catalog = ZipCatalog::new(Cursor::new(data)).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.name_of(0), Some("a.txt"));
        assert_eq!(catalog.name_of(1), Some("sub/"));
        assert_eq!(catalog.name_of(2), Some("sub/b.txt"));
        assert_eq!(catalog.name_of(3), None);
    }

    #[test]
    fn test_with_entry_reads_header_and_content() {
        let data = ZipTestBuilder::new()
            .add_file_with_mode("run.sh", b"#!/bin/sh\n", 0o755)
            .add_directory("dir/")
            .build();
        let mut catalog = ZipCatalog::new(Cursor::new(data)).unwrap();

        let (header, content) = catalog
            .with_entry(0, |h, r| (h.clone(), read_all(r)))
            .unwrap();
        assert_eq!(header.name, "run.sh");
        assert_eq!(header.kind, EntryKind::File);
        assert_eq!(header.mode, Some(0o755));
        assert_eq!(content, b"#!/bin/sh\n");

        let header = catalog.with_entry(1, |h, _| h.clone()).unwrap();
        assert_eq!(header.kind, EntryKind::Directory);
    }

    #[test]
    #[cfg(unix)]
    fn test_symlink_entry_is_other() {
        let data = ZipTestBuilder::new().add_symlink("link", "target").build();
        let mut catalog = ZipCatalog::new(Cursor::new(data)).unwrap();

        let kind = catalog.with_entry(0, |h, _| h.kind).unwrap();
        assert_eq!(kind, EntryKind::Other("symlink"));
    }

    #[test]
    fn test_garbage_is_invalid_archive() {
        let result = ZipCatalog::new(Cursor::new(b"definitely not a zip".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let result = ZipCatalog::open(Path::new("/nonexistent/archive.zip"));
        assert!(matches!(result, Err(BridgeError::Io(_))));
    }
}
