//! Mojibake signatures.
//!
//! Only code points that never belong in a filename are flagged. A name
//! garbled into plausible-looking text is not caught here.

/// Lead byte range of the common East-Asian double-byte encodings.
const LEAD_BYTES: std::ops::RangeInclusive<u8> = 0x81..=0xFE;

/// Trail byte range of the common East-Asian double-byte encodings.
const TRAIL_BYTES: std::ops::RangeInclusive<u8> = 0x41..=0xFE;

/// True if `text` carries a replacement character, a BOM or non-character,
/// or a C1 control code point (U+0080..=U+009F).
pub fn looks_damaged(text: &str) -> bool {
    text.chars().any(is_damage_signature)
}

fn is_damage_signature(c: char) -> bool {
    let cp = u32::from(c);
    matches!(cp, 0x80..=0x9F | 0xFEFF | 0xFFFD | 0xFDD0..=0xFDEF) || cp & 0xFFFE == 0xFFFE
}

/// True if every code point fits in one byte.
///
/// Such a string is most likely raw bytes carried in a text type. Anything
/// else already holds real multi-byte text and is never re-decoded.
pub fn is_byte_representable(text: &str) -> bool {
    text.chars().all(|c| u32::from(c) <= 0xFF)
}

/// One byte per code point. Returns `None` unless the text is byte-representable.
pub fn to_code_point_bytes(text: &str) -> Option<Vec<u8>> {
    text.chars().map(|c| u8::try_from(c).ok()).collect()
}

/// Count non-overlapping lead/trail byte pairs.
///
/// A matched pair consumes both bytes before the scan continues.
pub fn count_double_byte_pairs(bytes: &[u8]) -> usize {
    let mut pairs = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if LEAD_BYTES.contains(&bytes[i]) && TRAIL_BYTES.contains(&bytes[i + 1]) {
            pairs += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    pairs
}

/// True if any adjacent pair looks like a double-byte legacy character.
pub fn looks_like_double_byte_legacy_pair(bytes: &[u8]) -> bool {
    count_double_byte_pairs(bytes) > 0
}
