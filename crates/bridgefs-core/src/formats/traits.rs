//! Entry access abstractions for archive formats.
//!
//! Zip and tar are read in fundamentally different ways, so they get
//! different traits rather than one shared iterator:
//!
//! - [`EntryCatalog`]: random access by index. Zip keeps its central
//!   directory at the end of the file, so the whole catalog is known up front
//!   and any entry can be opened independently.
//! - [`EntryCursor`]: forward-only. A tar stream (behind gzip) can only be
//!   walked header by header, and a broken header makes every following
//!   entry unreachable.

use std::io::Read;

use crate::Result;
use crate::types::EntryHeader;

/// Random-access view over an archive's entries.
pub trait EntryCatalog {
    /// Number of entries listed in the catalog.
    fn len(&self) -> usize;

    /// Returns `true` if the catalog lists no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Best-effort name of the entry at `index`, available even when the
    /// entry itself cannot be opened.
    fn name_of(&self, index: usize) -> Option<&str>;

    /// Opens the entry at `index` and hands its header and content stream to
    /// `visit`. The stream is closed before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be located or its stream cannot
    /// be set up. Errors are scoped to this entry; other entries stay
    /// readable.
    fn with_entry<T, F>(&mut self, index: usize, visit: F) -> Result<T>
    where
        F: FnOnce(&EntryHeader, &mut dyn Read) -> T;
}

/// Forward-only cursor over an archive's entries.
pub trait EntryCursor {
    /// Walks the remaining entries in stream order, handing each header and
    /// content window to `visit`. Content left unread by `visit` is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be decoded or a header cannot be
    /// read. Walking stops at the first such error.
    fn for_each_entry<F>(&mut self, visit: F) -> Result<()>
    where
        F: FnMut(&EntryHeader, &mut dyn Read);
}
