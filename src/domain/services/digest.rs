//! Digest and text-encoding utilities

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};

/// Default input chunk for [`text_encode`]: 48 KiB, a multiple of 3
pub const DEFAULT_TEXT_CHUNK: usize = 48 * 1024;

/// Returns the lowercase hex SHA-256 of `data`
pub fn checksum_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Encodes `data` as standard padded Base64
///
/// The input is consumed `chunk` bytes at a time. `chunk` is rounded down to
/// a multiple of 3 so no padding appears before the final group.
pub fn text_encode(data: &[u8], chunk: usize) -> String {
    let chunk = (chunk - chunk % 3).max(3);
    let mut out = String::with_capacity(data.len().div_ceil(3) * 4);
    for piece in data.chunks(chunk) {
        STANDARD.encode_string(piece, &mut out);
    }
    out
}
