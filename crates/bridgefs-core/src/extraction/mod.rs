//! Entry materialization shared by the archive extractors.
//!
//! Format modules only know how to walk their entries. Everything that
//! touches the destination tree (confinement, directory creation, file
//! writes, per-entry bookkeeping) lives here, so zip and tar behave the
//! same once an entry header has been read.

mod materialize;
mod runner;

pub use materialize::Materializer;
pub use runner::extract_catalog;
pub use runner::extract_cursor;
