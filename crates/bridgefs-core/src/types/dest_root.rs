//! Canonical destination root for archive extraction.

use crate::Result;
use crate::paths::normalize_lexically;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// The directory outside of which no extracted entry may be written.
///
/// The root does not have to exist yet. Its longest existing ancestor is
/// canonicalized (symlinks resolved) and the missing tail is appended
/// lexically, so constructing a `DestRoot` never touches the disk beyond
/// `stat` calls. Directories are only created once entries are materialized.
///
/// # Examples
///
/// ```no_run
/// use bridgefs_core::types::DestRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = DestRoot::new("/tmp/extraction/not-yet-created")?;
/// assert!(root.as_path().is_absolute());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestRoot(PathBuf);

impl DestRoot {
    /// Resolves `path` into a canonical destination root.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be made absolute
    /// - An existing ancestor cannot be canonicalized
    /// - The deepest existing ancestor is not a directory
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let absolute = std::path::absolute(&path)?;
        let cleaned = normalize_lexically(&absolute);

        let mut existing: &Path = &cleaned;
        let mut missing: Vec<OsString> = Vec::new();

        let canonical = loop {
            match existing.canonicalize() {
                Ok(canonical) => break canonical,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    match (existing.parent(), existing.file_name()) {
                        (Some(parent), Some(name)) => {
                            missing.push(name.to_os_string());
                            existing = parent;
                        }
                        _ => return Err(e.into()),
                    }
                }
                Err(e) => {
                    return Err(io::Error::new(
                        e.kind(),
                        format!("failed to canonicalize {}: {e}", existing.display()),
                    )
                    .into());
                }
            }
        };

        if !canonical.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", canonical.display()),
            )
            .into());
        }

        let root = missing
            .iter()
            .rev()
            .fold(canonical, |mut acc, name| {
                acc.push(name);
                acc
            });

        Ok(Self(root))
    }

    /// Returns the root as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Returns `true` if `path` is the root itself or lies beneath it.
    ///
    /// The comparison is component-wise, so `/out` contains `/out/a` but not
    /// `/outside`.
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::BridgeError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dest_root_existing_dir() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = DestRoot::new(temp.path()).expect("root should resolve");
        assert_eq!(root.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_dest_root_missing_tail_is_not_created() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let wanted = temp.path().join("a").join("b");

        let root = DestRoot::new(&wanted).expect("root should resolve");

        assert!(!wanted.exists(), "resolving must not create directories");
        assert_eq!(
            root.as_path(),
            temp.path().canonicalize().unwrap().join("a").join("b")
        );
    }

    #[test]
    fn test_dest_root_is_cleaned() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let messy = temp.path().join("x").join(".").join("..").join("y");
        let root = DestRoot::new(messy).expect("root should resolve");
        assert_eq!(root.as_path(), temp.path().canonicalize().unwrap().join("y"));
    }

    #[test]
    fn test_dest_root_file_is_rejected() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").expect("failed to write file");

        let result = DestRoot::new(&file);
        assert!(matches!(result, Err(BridgeError::Io(_))));

        let result = DestRoot::new(file.join("below"));
        assert!(result.is_err());
    }

    #[test]
    fn test_contains_rejects_sibling_prefix() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = DestRoot::new(temp.path().join("out")).expect("root should resolve");
        let base = root.as_path().parent().unwrap().to_path_buf();

        assert!(root.contains(root.as_path()));
        assert!(root.contains(&base.join("out").join("a.txt")));
        assert!(!root.contains(&base.join("outside")));
        assert!(!root.contains(&base.join("outside").join("evil.txt")));
    }

    #[test]
    #[cfg(unix)]
    fn test_dest_root_resolves_symlink() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().expect("failed to create temp dir");
        let real = temp.path().join("real");
        fs::create_dir(&real).expect("failed to create dir");
        let link = temp.path().join("link");
        symlink(&real, &link).expect("failed to create symlink");

        let root = DestRoot::new(link.join("sub")).expect("root should resolve");
        assert_eq!(root.as_path(), real.canonicalize().unwrap().join("sub"));
    }
}
