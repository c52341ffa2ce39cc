//! Plain gzip decompression.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Decompresses the gzip file at `source` into `dest`.
///
/// A `.gz` file holds a single logical stream, so there is no per-entry
/// tolerance: the destination is created (and truncated) first, and any
/// failure afterwards fails the whole call. Concatenated gzip members are
/// decoded back to back. Returns the number of decompressed bytes written.
///
/// # Errors
///
/// Returns an error if the source cannot be opened, the destination cannot
/// be created, the gzip header is invalid, or the stream is corrupt.
pub fn decompress_file(source: &Path, dest: &Path) -> Result<u64> {
    let input = File::open(source)?;
    let output = File::create(dest)?;

    let mut decoder = MultiGzDecoder::new(input);
    let mut writer = BufWriter::new(output);
    let mut buffer = CopyBuffer::new();

    Ok(copy_with_buffer(&mut decoder, &mut writer, &mut buffer)?)
}
