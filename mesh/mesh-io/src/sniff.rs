//! STL encoding detection.
//!
//! Binary STL has no magic number. Its 80-byte header is free-form and may
//! well start with `solid`, the keyword that opens an ASCII file. A leading
//! `solid` is therefore only a hint: the file is still binary when its
//! declared triangle count accounts for the buffer length exactly.

/// Bytes before the first binary record: 80-byte header plus `u32` count.
pub(crate) const BINARY_PREAMBLE: usize = 84;

/// Bytes per binary triangle record.
pub(crate) const BINARY_RECORD: usize = 50;

/// How an STL buffer is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlEncoding {
    /// Fixed-size little-endian records.
    Binary,
    /// Line-oriented `solid` / `facet` / `vertex` text.
    Ascii,
}

/// Classify an STL buffer as binary or ASCII.
///
/// - Buffers shorter than 84 bytes are ASCII.
/// - Buffers whose first non-whitespace bytes are exactly `solid` (lower
///   case) are ASCII,
///   unless `84 + count * 50` equals the buffer length exactly.
/// - Anything else is binary.
///
/// # Example
///
/// ```
/// use mesh_io::{detect_stl_encoding, StlEncoding};
///
/// assert_eq!(detect_stl_encoding(b"solid cube\nendsolid cube\n"), StlEncoding::Ascii);
///
/// // A binary file whose header happens to start with "solid".
/// let mut data = vec![0u8; 84];
/// data[..5].copy_from_slice(b"solid");
/// assert_eq!(detect_stl_encoding(&data), StlEncoding::Binary);
/// ```
#[must_use]
pub fn detect_stl_encoding(data: &[u8]) -> StlEncoding {
    if data.len() < BINARY_PREAMBLE {
        return StlEncoding::Ascii;
    }

    if starts_with_solid(data) {
        if declared_binary_len(data) == Some(data.len() as u64) {
            StlEncoding::Binary
        } else {
            StlEncoding::Ascii
        }
    } else {
        StlEncoding::Binary
    }
}

/// Total size implied by the triangle count at offset 80.
pub(crate) fn declared_binary_len(data: &[u8]) -> Option<u64> {
    let count = triangle_count(data)?;
    Some(BINARY_PREAMBLE as u64 + u64::from(count) * BINARY_RECORD as u64)
}

/// Triangle count at offset 80, if the buffer is long enough.
pub(crate) fn triangle_count(data: &[u8]) -> Option<u32> {
    let bytes: [u8; 4] = data.get(80..BINARY_PREAMBLE)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

fn starts_with_solid(data: &[u8]) -> bool {
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    data[start..]
        .get(..5)
        .is_some_and(|prefix| prefix == b"solid")
}
