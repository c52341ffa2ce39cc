//! Entry target path that passed the confinement guard.

use std::path::Path;
use std::path::PathBuf;

/// Absolute target path of an archive entry, proven to lie within its
/// [`DestRoot`](super::DestRoot).
///
/// There is no public constructor and no `From<PathBuf>`: the only way to
/// obtain a `ResolvedPath` is [`confine`](crate::security::confine).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    path: PathBuf,
    is_root: bool,
}

impl ResolvedPath {
    pub(crate) fn new(path: PathBuf, is_root: bool) -> Self {
        Self { path, is_root }
    }

    /// Returns the absolute target path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the entry name resolved to the root itself
    /// (for example `""` or `"."`).
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_root
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
