//! Caller path resolution and lexical path normalization.
//!
//! The frontend addresses files relative to the application's base
//! directory. [`PathResolver`] turns those caller paths into absolute,
//! lexically cleaned paths. [`normalize_lexically`] is the shared `.`/`..`
//! folding used both here and by the confinement guard.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Folds `.` and `..` components without touching the file system.
///
/// `..` pops the previous normal component; at a root it is dropped, so
/// `/..` cleans to `/`. A relative path that climbs above its start keeps the
/// leading `..` components.
///
/// # Examples
///
/// ```
/// use bridgefs_core::paths::normalize_lexically;
/// use std::path::Path;
///
/// assert_eq!(normalize_lexically(Path::new("/a/./b/../c")), Path::new("/a/c"));
/// assert_eq!(normalize_lexically(Path::new("/..")), Path::new("/"));
/// assert_eq!(normalize_lexically(Path::new("../x")), Path::new("../x"));
/// ```
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

/// Resolves caller-supplied paths against the application base directory.
///
/// Absolute paths are kept as they are, relative paths are joined onto the
/// base directory. Both are cleaned lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_dir: PathBuf,
}

impl PathResolver {
    /// Creates a resolver rooted at `base_dir`.
    ///
    /// A relative `base_dir` is made absolute against the current directory
    /// when possible.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let base_dir = std::path::absolute(&base_dir).unwrap_or(base_dir);
        Self {
            base_dir: normalize_lexically(&base_dir),
        }
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves a caller path.
    ///
    /// # Examples
    ///
    /// ```
    /// use bridgefs_core::paths::PathResolver;
    /// use std::path::Path;
    ///
    /// let resolver = PathResolver::new("/opt/app");
    /// assert_eq!(resolver.resolve("data/user.yaml"), Path::new("/opt/app/data/user.yaml"));
    /// assert_eq!(resolver.resolve("/tmp/x"), Path::new("/tmp/x"));
    /// assert_eq!(resolver.resolve("data/../cache"), Path::new("/opt/app/cache"));
    /// ```
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            normalize_lexically(path)
        } else {
            normalize_lexically(&self.base_dir.join(path))
        }
    }

    /// Resolves a caller path and renders it with forward slashes.
    ///
    /// This is the form handed back to the frontend.
    #[must_use]
    pub fn resolve_display(&self, path: impl AsRef<Path>) -> String {
        to_slash(&self.resolve(path))
    }
}

/// Renders a path with `/` separators regardless of platform.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        rendered.into_owned()
    } else {
        rendered.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_removes_current_dir() {
        assert_eq!(
            normalize_lexically(Path::new("./a/./b")),
            PathBuf::from("a/b")
        );
    }

    #[test]
    fn test_normalize_parent_pops() {
        assert_eq!(
            normalize_lexically(Path::new("a/b/../../c")),
            PathBuf::from("c")
        );
    }

    #[test]
    fn test_normalize_parent_at_root_is_dropped() {
        assert_eq!(
            normalize_lexically(Path::new("/../../etc")),
            PathBuf::from("/etc")
        );
    }

    #[test]
    fn test_normalize_relative_escape_is_kept() {
        assert_eq!(
            normalize_lexically(Path::new("a/../../b")),
            PathBuf::from("../b")
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_lexically(Path::new("")), PathBuf::new());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolver_relative_and_absolute() {
        let resolver = PathResolver::new("/srv/app");
        assert_eq!(
            resolver.resolve("data/profiles.yaml"),
            PathBuf::from("/srv/app/data/profiles.yaml")
        );
        assert_eq!(resolver.resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(resolver.resolve(""), PathBuf::from("/srv/app"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolver_cleans_parent_components() {
        let resolver = PathResolver::new("/srv/app/./bin/..");
        assert_eq!(resolver.base_dir(), Path::new("/srv/app"));
        assert_eq!(resolver.resolve("../other"), PathBuf::from("/srv/other"));
    }

    #[test]
    fn test_resolver_relative_base_becomes_absolute() {
        let resolver = PathResolver::new("relative-base");
        assert!(resolver.base_dir().is_absolute());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_display_uses_forward_slashes() {
        let resolver = PathResolver::new("/srv/app");
        assert_eq!(resolver.resolve_display("a/b.txt"), "/srv/app/a/b.txt");
    }
}
