//! Path confinement guard.
//!
//! Archive entry names are attacker-controlled. [`confine`] maps a raw name
//! onto the destination root and refuses anything that would land outside
//! of it.

use std::io;
use std::path::Component;
use std::path::Path;

use crate::types::DestRoot;
use crate::types::ResolvedPath;

/// Resolves an untrusted entry name under `root`.
///
/// The name is joined onto the root and folded lexically: `.` is dropped,
/// `..` pops one component, and root or drive-prefix components inside the
/// name are ignored, so `/etc/passwd` becomes `<root>/etc/passwd`. The result
/// is accepted only if it is the root itself or lies beneath it.
///
/// Returns `None` for names that escape the root. Callers skip such entries;
/// a rejection is never an error.
///
/// # Examples
///
/// ```no_run
/// use bridgefs_core::security::confine;
/// use bridgefs_core::types::DestRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = DestRoot::new("/tmp/out")?;
///
/// assert!(confine(&root, "sub/b.txt").is_some());
/// assert!(confine(&root, "../evil.txt").is_none());
/// assert!(confine(&root, "/etc/passwd").is_some()); // rebased under the root
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn confine(root: &DestRoot, name: &str) -> Option<ResolvedPath> {
    let mut resolved = root.as_path().to_path_buf();

    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if !root.contains(&resolved) {
        return None;
    }

    let is_root = resolved.as_path() == root.as_path();
    Some(ResolvedPath::new(resolved, is_root))
}

/// Re-checks a directory that now exists on disk against the root.
///
/// Lexical confinement cannot see symlinks that already sit inside the
/// destination. Once the parent of an entry has been created it is
/// canonicalized and compared with the root again.
///
/// # Errors
///
/// Returns an error if the directory cannot be canonicalized.
pub fn ensure_within(root: &DestRoot, dir: &Path) -> io::Result<bool> {
    let canonical = dir.canonicalize()?;
    Ok(root.contains(&canonical))
}
