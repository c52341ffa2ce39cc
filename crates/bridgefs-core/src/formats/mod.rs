//! Archive format readers.

pub mod gzip;
pub mod tar;
pub mod traits;
pub mod zip;

pub use tar::TarCursor;
pub use traits::EntryCatalog;
pub use traits::EntryCursor;
pub use zip::ZipCatalog;
