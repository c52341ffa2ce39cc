//! Gzip-compressed TAR stream access.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tar::Archive;
use tar::Entry;
use tar::EntryType;

use super::traits::EntryCursor;
use crate::Result;
use crate::types::EntryHeader;
use crate::types::EntryKind;

/// Forward-only cursor over a TAR stream.
pub struct TarCursor<R: Read> {
    archive: Archive<R>,
}

impl TarCursor<MultiGzDecoder<File>> {
    /// Opens a `.tar.gz` file.
    ///
    /// Gzip framing is only checked once the first header is read, so a file
    /// with bad gzip magic opens fine and fails on [`for_each_entry`].
    ///
    /// [`for_each_entry`]: EntryCursor::for_each_entry
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open_gz(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(MultiGzDecoder::new(file)))
    }
}

impl<R: Read> TarCursor<R> {
    /// Wraps an already-decompressed TAR stream.
    pub fn new(reader: R) -> Self {
        Self {
            archive: Archive::new(reader),
        }
    }
}

impl<R: Read> EntryCursor for TarCursor<R> {
    fn for_each_entry<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&EntryHeader, &mut dyn Read),
    {
        for entry in self.archive.entries()? {
            let mut entry = entry?;
            let entry_type = entry.header().entry_type();
            if entry_type.is_pax_global_extensions() {
                continue;
            }

            let header = header_of(&entry, entry_type);
            visit(&header, &mut entry);
        }
        Ok(())
    }
}

fn header_of<R: Read>(entry: &Entry<'_, R>, entry_type: EntryType) -> EntryHeader {
    let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
    let mode = entry.header().mode().ok().map(|m| m & 0o7777);
    EntryHeader::new(name, kind_of(entry_type), mode)
}

fn kind_of(entry_type: EntryType) -> EntryKind {
    if entry_type.is_dir() {
        EntryKind::Directory
    } else if entry_type.is_file() || entry_type.is_contiguous() {
        EntryKind::File
    } else if entry_type.is_symlink() {
        EntryKind::Other("symlink")
    } else if entry_type.is_hard_link() {
        EntryKind::Other("hardlink")
    } else if entry_type.is_character_special() || entry_type.is_block_special() {
        EntryKind::Other("device node")
    } else if entry_type.is_fifo() {
        EntryKind::Other("fifo")
    } else if entry_type.is_gnu_sparse() {
        EntryKind::Other("sparse file")
    } else {
        EntryKind::Other("special entry")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::gzip_bytes;
    use std::io::Cursor;

    fn collect(cursor: &mut TarCursor<impl Read>) -> Result<Vec<(EntryHeader, Vec<u8>)>> {
        let mut seen = Vec::new();
        cursor.for_each_entry(|header, reader| {
            let mut data = Vec::new();
            reader.read_to_end(&mut data).unwrap();
            seen.push((header.clone(), data));
        })?;
        Ok(seen)
    }

    #[test]
    fn test_cursor_walks_entries_in_order() {
        let tar = TarTestBuilder::new()
            .add_directory("sub/")
            .add_file("sub/b.txt", b"there")
            .add_file_with_mode("run.sh", b"echo", 0o755)
            .build();
        let mut cursor = TarCursor::new(Cursor::new(tar));

        let seen = collect(&mut cursor).unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0.kind, EntryKind::Directory);
        assert_eq!(seen[1].0.name, "sub/b.txt");
        assert_eq!(seen[1].1, b"there");
        assert_eq!(seen[2].0.mode, Some(0o755));
    }

    #[test]
    fn test_cursor_reports_untrusted_names_verbatim() {
        let tar = TarTestBuilder::new()
            .add_file("../evil.txt", b"x")
            .add_file("/abs.txt", b"y")
            .build();
        let mut cursor = TarCursor::new(Cursor::new(tar));

        let names: Vec<String> = collect(&mut cursor)
            .unwrap()
            .into_iter()
            .map(|(h, _)| h.name)
            .collect();
        assert_eq!(names, vec!["../evil.txt", "/abs.txt"]);
    }

    #[test]
    fn test_unread_content_is_skipped() {
        let tar = TarTestBuilder::new()
            .add_file("a.txt", b"aaaa")
            .add_file("b.txt", b"bbbb")
            .build();
        let mut cursor = TarCursor::new(Cursor::new(tar));

        let mut names = Vec::new();
        cursor
            .for_each_entry(|header, _reader| names.push(header.name.clone()))
            .unwrap();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_link_kinds() {
        let tar = TarTestBuilder::new()
            .add_symlink("link", "a.txt")
            .add_hardlink("hard", "a.txt")
            .build();
        let mut cursor = TarCursor::new(Cursor::new(tar));

        let kinds: Vec<EntryKind> = collect(&mut cursor)
            .unwrap()
            .into_iter()
            .map(|(h, _)| h.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Other("symlink"), EntryKind::Other("hardlink")]
        );
    }

    #[test]
    fn test_gzip_wrapped_stream() {
        let tar = TarTestBuilder::new().add_file("a.txt", b"hi").build();
        let mut cursor = TarCursor::new(MultiGzDecoder::new(Cursor::new(gzip_bytes(&tar))));

        let seen = collect(&mut cursor).unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, b"hi");
    }

    #[test]
    fn test_bad_gzip_magic_fails() {
        let mut cursor = TarCursor::new(MultiGzDecoder::new(Cursor::new(
            b"this is not gzip data at all".to_vec(),
        )));
        assert!(cursor.for_each_entry(|_, _| {}).is_err());
    }
}
