//! Type-safe wrappers for archive extraction.
//!
//! A [`ResolvedPath`] can only be produced by the confinement guard, so any
//! function taking one is guaranteed to write inside its [`DestRoot`].

pub mod dest_root;
pub mod entry_kind;
pub mod resolved_path;

pub use dest_root::DestRoot;
pub use entry_kind::EntryHeader;
pub use entry_kind::EntryKind;
pub use resolved_path::ResolvedPath;
