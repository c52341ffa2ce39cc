//! Writing one confined entry into the destination tree.

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Read;
use std::path::Path;

use tracing::debug;
use tracing::warn;

use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::report::EntryOutcome;
use crate::security::confine;
use crate::security::ensure_within;
use crate::types::DestRoot;
use crate::types::EntryHeader;
use crate::types::EntryKind;
use crate::types::ResolvedPath;

/// Permission bits used when an entry carries no usable mode.
const DEFAULT_FILE_MODE: u32 = 0o666;

/// Materializes archive entries under a fixed destination root.
///
/// One `Materializer` is created per extraction and owns the copy buffer
/// reused for every file entry. Failures never escape
/// [`materialize_entry`](Self::materialize_entry): they are turned into a
/// skip outcome so the caller can move on to the next entry.
#[derive(Debug)]
pub struct Materializer {
    root: DestRoot,
    preserve_permissions: bool,
    buffer: CopyBuffer,
}

impl Materializer {
    /// Creates a materializer writing under `root`.
    #[must_use]
    pub fn new(root: DestRoot, preserve_permissions: bool) -> Self {
        Self {
            root,
            preserve_permissions,
            buffer: CopyBuffer::new(),
        }
    }

    /// Returns the destination root.
    #[must_use]
    pub fn root(&self) -> &DestRoot {
        &self.root
    }

    /// Confines `header.name` and writes the entry.
    ///
    /// Directories are created with all missing parents. Regular files get
    /// their parents created, are created or truncated with the stored mode,
    /// and receive the content of `reader`. A file whose copy fails midway
    /// is removed again. Other entry kinds are skipped.
    pub fn materialize_entry(&mut self, header: &EntryHeader, reader: &mut dyn Read) -> EntryOutcome {
        let outcome = match confine(&self.root, &header.name) {
            None => EntryOutcome::SkippedConfinement,
            Some(target) => self
                .write_entry(header, &target, reader)
                .unwrap_or_else(|e| EntryOutcome::SkippedError(e.to_string())),
        };

        match &outcome {
            EntryOutcome::Extracted { bytes } => {
                debug!(entry = %header.name, bytes, "extracted file");
            }
            EntryOutcome::DirectoryCreated => debug!(entry = %header.name, "created directory"),
            EntryOutcome::SkippedConfinement => {
                warn!(entry = %header.name, "entry resolves outside destination root, skipped");
            }
            EntryOutcome::SkippedError(reason) => {
                warn!(entry = %header.name, %reason, "entry skipped");
            }
        }
        outcome
    }

    fn write_entry(
        &mut self,
        header: &EntryHeader,
        target: &ResolvedPath,
        reader: &mut dyn Read,
    ) -> io::Result<EntryOutcome> {
        match header.kind {
            EntryKind::Directory => self.create_directory(target),
            EntryKind::File => self.write_file(target, header.mode, reader),
            other @ EntryKind::Other(_) => Ok(EntryOutcome::SkippedError(format!(
                "unsupported entry type: {}",
                other.name()
            ))),
        }
    }

    fn create_directory(&self, target: &ResolvedPath) -> io::Result<EntryOutcome> {
        if !self.existing_part_within(target.as_path())? {
            return Ok(EntryOutcome::SkippedConfinement);
        }
        fs::create_dir_all(target)?;
        Ok(EntryOutcome::DirectoryCreated)
    }

    fn write_file(
        &mut self,
        target: &ResolvedPath,
        mode: Option<u32>,
        reader: &mut dyn Read,
    ) -> io::Result<EntryOutcome> {
        let path = target.as_path();
        let parent = match path.parent() {
            Some(parent) if !target.is_root() => parent,
            _ => {
                return Ok(EntryOutcome::SkippedError(
                    "file entry resolves to the destination root".to_string(),
                ));
            }
        };

        if !self.existing_part_within(parent)? {
            return Ok(EntryOutcome::SkippedConfinement);
        }
        fs::create_dir_all(parent)?;
        if !ensure_within(&self.root, parent)? {
            return Ok(EntryOutcome::SkippedConfinement);
        }
        if is_symlink(path) && !ensure_within(&self.root, path).unwrap_or(false) {
            return Ok(EntryOutcome::SkippedConfinement);
        }

        let mut file = self.open_output(path, mode)?;
        match copy_with_buffer(reader, &mut file, &mut self.buffer) {
            Ok(bytes) => Ok(EntryOutcome::Extracted { bytes }),
            Err(e) => {
                drop(file);
                let _ = fs::remove_file(path);
                Err(e)
            }
        }
    }

    /// Checks the deepest already existing directory at or above `path`
    /// (but not above the root) against the root.
    fn existing_part_within(&self, path: &Path) -> io::Result<bool> {
        let existing = path
            .ancestors()
            .take_while(|ancestor| self.root.contains(ancestor))
            .find(|ancestor| ancestor.exists());

        match existing {
            Some(dir) => ensure_within(&self.root, dir),
            None => Ok(true),
        }
    }

    fn open_output(&self, path: &Path, mode: Option<u32>) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;

            let mode = mode
                .filter(|m| self.preserve_permissions && m & 0o777 != 0)
                .map_or(DEFAULT_FILE_MODE, |m| m & 0o777);
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = (mode, self.preserve_permissions, DEFAULT_FILE_MODE);

        options.open(path)
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}
