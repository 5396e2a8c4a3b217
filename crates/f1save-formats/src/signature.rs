//! Signature scanning
//!
//! The size header has no magic of its own. It is found relative to a pair of
//! serialized `"None"` strings (u32 length 5, then `None\0`, twice) that the
//! game writes just before it. The header starts 4 bytes after the end of
//! this pattern.

/// Byte pattern preceding the packed database region
pub const SIGNATURE: [u8; 19] = [
    0x00, 0x05, 0x00, 0x00, 0x00, 0x4E, 0x6F, 0x6E, 0x65, // ..."None"
    0x00, 0x05, 0x00, 0x00, 0x00, 0x4E, 0x6F, 0x6E, 0x65, // ..."None"
    0x00,
];

/// Bytes between the end of [`SIGNATURE`] and the size header
pub const SIGNATURE_GAP: usize = 4;

/// Return the lowest index at which `pattern` occurs in `buffer`
///
/// A plain byte comparison at each position; the first match wins. Returns
/// `None` when the pattern does not occur, including when `buffer` is shorter
/// than `pattern`. An empty pattern matches at index 0.
pub fn locate(buffer: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() {
        return Some(0);
    }
    buffer
        .windows(pattern.len())
        .position(|window| window == pattern)
}

/// Offset of the size header, or `None` if the signature is absent
pub fn database_offset(buffer: &[u8]) -> Option<usize> {
    locate(buffer, &SIGNATURE).map(|index| index + SIGNATURE.len() + SIGNATURE_GAP)
}
