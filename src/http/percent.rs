//! Percent-encoding for directory listing links and request paths.
//!
//! The encoder keeps ASCII alphanumerics and `/ _ . - ~` as they are and
//! escapes every other byte as `%XX`. The decoder replaces each `%` followed
//! by two hex digits with the byte they spell and passes everything else
//! through untouched, including a `%` that is not followed by two hex digits.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, percent_encode};

/// Bytes left literal in listing links.
const LINK: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Percent-encodes `input` without any size limit.
pub fn encode(input: &[u8]) -> String {
    percent_encode(input, LINK).to_string()
}

/// Percent-encodes `input` into at most `capacity - 1` bytes.
///
/// One byte of the capacity is kept for a terminator, as a fixed link
/// buffer would. Encoding stops before the first byte whose escaped form
/// would not fit; an escape sequence is never split.
pub fn encode_bounded(input: &[u8], capacity: usize) -> String {
    let limit = capacity.saturating_sub(1);
    let mut out = String::with_capacity(limit.min(input.len() * 3));

    for chunk in percent_encode(input, LINK) {
        let room = limit - out.len();
        if chunk.len() <= room {
            out.push_str(chunk);
            continue;
        }
        // literal runs are ASCII and may be cut anywhere, escapes may not
        if !chunk.starts_with('%') {
            out.push_str(&chunk[..room]);
        }
        break;
    }
    out
}

/// Decodes `%XX` escapes (either hex case) back into raw bytes.
pub fn decode(input: &[u8]) -> Vec<u8> {
    percent_decode(input).collect()
}
