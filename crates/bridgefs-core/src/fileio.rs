//! Plain file operations exposed next to the archive extractors.
//!
//! Every function takes an already resolved path; resolution against the
//! application base directory happens in [`Bridge`](crate::Bridge).

use std::fmt;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::BridgeError;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Permission bits of files written by [`write_file`].
#[cfg(unix)]
const WRITE_FILE_MODE: u32 = 0o644;

/// How file content crosses the bridge.
///
/// # Examples
///
/// ```
/// use bridgefs_core::fileio::IoMode;
///
/// assert_eq!("Binary".parse::<IoMode>().unwrap(), IoMode::Binary);
/// assert!("binary".parse::<IoMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoMode {
    /// Content is UTF-8 text, passed through unchanged.
    Text,

    /// Content is raw bytes, carried as standard base64.
    Binary,
}

impl FromStr for IoMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Text" => Ok(Self::Text),
            "Binary" => Ok(Self::Binary),
            other => Err(BridgeError::UnsupportedMode(other.to_string())),
        }
    }
}

impl fmt::Display for IoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Binary => f.write_str("Binary"),
        }
    }
}

/// Writes `content` to `path`, creating missing parent directories.
///
/// In [`IoMode::Binary`] the content is base64-decoded first; nothing is
/// written if decoding fails.
///
/// # Errors
///
/// Returns an error if the content is not valid base64 (binary mode), or if
/// a parent directory or the file cannot be created or written.
pub fn write_file(path: &Path, content: &str, mode: IoMode) -> Result<()> {
    create_parent(path)?;

    let data = match mode {
        IoMode::Text => content.as_bytes().to_vec(),
        IoMode::Binary => BASE64.decode(content)?,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(WRITE_FILE_MODE);
    }

    let mut file = options.open(path)?;
    file.write_all(&data)?;
    Ok(())
}

/// Reads the file at `path` as text or as base64.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if text mode meets
/// content that is not valid UTF-8.
pub fn read_file(path: &Path, mode: IoMode) -> Result<String> {
    let data = fs::read(path)?;
    match mode {
        IoMode::Text => {
            String::from_utf8(data).map_err(|e| BridgeError::InvalidEncoding(e.to_string()))
        }
        IoMode::Binary => Ok(BASE64.encode(data)),
    }
}

/// Renames `source` to `target`, creating the target's parent directories.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the rename fails
/// (missing source, cross-device move).
pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    create_parent(target)?;
    fs::rename(source, target)?;
    Ok(())
}

/// Removes a file or a whole directory tree. A missing path is not an error.
///
/// Symlinks are removed, never followed.
///
/// # Errors
///
/// Returns an error if removal fails for any reason other than the path not
/// existing.
pub fn remove_file(path: &Path) -> Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

/// Copies `source` to `dest`, creating the destination's parent
/// directories. Returns the number of bytes copied.
///
/// # Errors
///
/// Returns an error if the source cannot be opened, the destination cannot
/// be created, or the copy fails.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64> {
    let mut input = File::open(source)?;
    create_parent(dest)?;
    let mut output = File::create(dest)?;

    let mut buffer = CopyBuffer::new();
    Ok(copy_with_buffer(&mut input, &mut output, &mut buffer)?)
}

/// Creates `path` and all missing parents.
///
/// # Errors
///
/// Returns an error if a component exists and is not a directory, or
/// creation fails.
pub fn make_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Lists a directory as `name,size,isDir` records joined by `|`, sorted by
/// name.
///
/// Entries whose metadata cannot be read are left out. An empty directory
/// yields an empty string.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
///
/// # Examples
///
/// ```no_run
/// use bridgefs_core::fileio::read_dir;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // "a.txt,2,false|sub,4096,true"
/// let listing = read_dir(Path::new("/tmp/out"))?;
/// # Ok(())
/// # }
/// ```
pub fn read_dir(path: &Path) -> Result<String> {
    let mut records: Vec<(String, u64, bool)> = fs::read_dir(path)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let meta = entry.metadata().ok()?;
            Some((
                entry.file_name().to_string_lossy().into_owned(),
                meta.len(),
                meta.is_dir(),
            ))
        })
        .collect();
    records.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(records
        .iter()
        .map(|(name, size, is_dir)| format!("{name},{size},{is_dir}"))
        .collect::<Vec<_>>()
        .join("|"))
}

/// Returns whether `path` exists, following symlinks.
///
/// # Errors
///
/// Returns an error if existence cannot be determined (for instance a
/// permission error on a parent directory).
pub fn file_exists(path: &Path) -> Result<bool> {
    Ok(path.try_exists()?)
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_io_mode_parse() {
        assert_eq!("Text".parse::<IoMode>().unwrap(), IoMode::Text);
        assert_eq!("Binary".parse::<IoMode>().unwrap(), IoMode::Binary);

        let err = "Hex".parse::<IoMode>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported IO mode: Hex");
        assert_eq!(IoMode::Binary.to_string(), "Binary");
    }

    #[test]
    fn test_write_and_read_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data/profiles.yaml");

        write_file(&path, "name: default\n", IoMode::Text).unwrap();

        assert_eq!(read_file(&path, IoMode::Text).unwrap(), "name: default\n");
    }

    #[test]
    fn test_write_and_read_binary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");

        write_file(&path, "AAEC/w==", IoMode::Binary).unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![0x00, 0x01, 0x02, 0xff]);
        assert_eq!(read_file(&path, IoMode::Binary).unwrap(), "AAEC/w==");
    }

    #[test]
    fn test_write_binary_rejects_bad_base64() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob.bin");

        let err = write_file(&path, "not base64!", IoMode::Binary).unwrap_err();

        assert!(matches!(err, BridgeError::InvalidEncoding(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_read_text_rejects_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("latin1.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            read_file(&path, IoMode::Text),
            Err(BridgeError::InvalidEncoding(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");
        write_file(&path, "x", IoMode::Text).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0);
        assert_eq!(mode & 0o600, 0o600);
    }

    #[test]
    fn test_move_file_creates_parent() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        let target = temp.path().join("nested/dir/b.txt");
        fs::write(&source, "moved").unwrap();

        move_file(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&target).unwrap(), "moved");
    }

    #[test]
    fn test_move_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        assert!(move_file(&temp.path().join("missing"), &temp.path().join("b")).is_err());
    }

    #[test]
    fn test_remove_file_and_tree() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        let tree = temp.path().join("tree");
        fs::write(&file, "x").unwrap();
        fs::create_dir_all(tree.join("deep/er")).unwrap();
        fs::write(tree.join("deep/er/c.txt"), "y").unwrap();

        remove_file(&file).unwrap();
        remove_file(&tree).unwrap();

        assert!(!file.exists());
        assert!(!tree.exists());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        remove_file(&temp.path().join("never-existed")).unwrap();
    }

    #[test]
    fn test_copy_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        let dest = temp.path().join("copies/a.txt");
        fs::write(&source, "copied").unwrap();
        fs::create_dir_all(temp.path().join("copies")).unwrap();
        fs::write(&dest, "a longer stale copy").unwrap();

        let bytes = copy_file(&source, &dest).unwrap();

        assert_eq!(bytes, 6);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "copied");
        assert_eq!(fs::read_to_string(&source).unwrap(), "copied");
    }

    #[test]
    fn test_copy_missing_source_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("new-dir/a.txt");

        assert!(copy_file(&temp.path().join("missing"), &dest).is_err());
        assert!(!temp.path().join("new-dir").exists());
    }

    #[test]
    fn test_make_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c");

        make_dir(&path).unwrap();
        make_dir(&path).unwrap();

        assert!(path.is_dir());
    }

    #[test]
    fn test_read_dir_sorted_records() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "there").unwrap();
        fs::write(temp.path().join("a.txt"), "hi").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let listing = read_dir(temp.path()).unwrap();
        let records: Vec<&str> = listing.split('|').collect();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], "a.txt,2,false");
        assert_eq!(records[1], "b.txt,5,false");
        assert!(records[2].starts_with("sub,"));
        assert!(records[2].ends_with(",true"));
    }

    #[test]
    fn test_read_dir_empty_and_missing() {
        let temp = TempDir::new().unwrap();
        assert_eq!(read_dir(temp.path()).unwrap(), "");
        assert!(read_dir(&temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.txt");

        assert!(!file_exists(&path).unwrap());
        fs::write(&path, "x").unwrap();
        assert!(file_exists(&path).unwrap());
        assert!(file_exists(temp.path()).unwrap());
    }
}
