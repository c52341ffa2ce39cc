//! Path confinement for archive extraction.

pub mod confine;

pub use confine::confine;
pub use confine::ensure_within;
