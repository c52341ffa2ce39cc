//! In-memory archive builders for tests.
//!
//! Entry names are written exactly as given, including `..` components and
//! absolute paths, so tests can build the hostile archives the extractors
//! have to survive.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use zip::write::SimpleFileOptions;

/// Compresses `data` into a single gzip member.
#[must_use]
pub fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Builder for TAR test archives with raw entry names.
///
/// # Examples
///
/// ```
/// use bridgefs_core::test_utils::TarTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .add_file("../evil.txt", b"escape attempt")
///     .add_directory("dir/")
///     .add_symlink("link", "/etc/passwd")
///     .build();
/// assert_eq!(tar_data.len() % 512, 0);
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates a new TAR test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(name, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(self, name: &str, data: &[u8], mode: u32) -> Self {
        self.append(name, tar::EntryType::Regular, mode, None, data)
    }

    /// Adds a directory.
    #[must_use]
    pub fn add_directory(self, name: &str) -> Self {
        self.append(name, tar::EntryType::Directory, 0o755, None, &[])
    }

    /// Adds a symlink pointing at `target`.
    #[must_use]
    pub fn add_symlink(self, name: &str, target: &str) -> Self {
        self.append(name, tar::EntryType::Symlink, 0o777, Some(target), &[])
    }

    /// Adds a hardlink pointing at `target`.
    #[must_use]
    pub fn add_hardlink(self, name: &str, target: &str) -> Self {
        self.append(name, tar::EntryType::Link, 0o644, Some(target), &[])
    }

    /// Builds and returns the TAR archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    fn append(
        mut self,
        name: &str,
        entry_type: tar::EntryType,
        mode: u32,
        link: Option<&str>,
        data: &[u8],
    ) -> Self {
        let mut header = tar::Header::new_gnu();
        // set_path() refuses `..` and absolute names, so write the raw bytes.
        write_raw(&mut header.as_old_mut().name, name);
        if let Some(link) = link {
            write_raw(&mut header.as_old_mut().linkname, link);
        }
        header.set_entry_type(entry_type);
        header.set_mode(mode);
        header.set_size(data.len() as u64);
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_raw(slot: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    assert!(bytes.len() < slot.len(), "name too long for a plain header: {value}");
    slot.fill(0);
    slot[..bytes.len()].copy_from_slice(bytes);
}

/// Builder for ZIP test archives with raw entry names.
///
/// Files are stored uncompressed, so their content appears verbatim in the
/// built bytes.
///
/// # Examples
///
/// ```
/// use bridgefs_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_file("file.txt", b"content")
///     .add_directory("dir/")
///     .build();
/// assert!(zip_data.starts_with(b"PK"));
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored file with mode 0o644.
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(name, data, 0o644)
    }

    /// Adds a stored file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, name: &str, data: &[u8], mode: u32) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a deflate-compressed file.
    #[must_use]
    pub fn add_deflated_file(mut self, name: &str, data: &[u8]) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(name, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(name, options).unwrap();
        self
    }

    /// Adds a symlink entry pointing at `target`.
    #[must_use]
    pub fn add_symlink(mut self, name: &str, target: &str) -> Self {
        self.zip
            .add_symlink(name, target, SimpleFileOptions::default())
            .unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
