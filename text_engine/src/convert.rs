// Copyright 2026 the Text Engine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between UTF-8 text and the UTF-32 character buffer.

use crate::{Character, Length};

/// Decodes UTF-8 bytes, appending the code points to `characters`.
///
/// Malformed sequences are skipped, so garbage input yields fewer characters rather than an
/// error. Returns the number of characters appended.
///
/// ```
/// let mut characters = Vec::new();
/// let count = text_engine::convert::utf8_to_utf32(b"h\xFFi\xE2\x82", &mut characters);
/// assert_eq!(count, 2);
/// assert_eq!(characters, ['h', 'i']);
/// ```
pub fn utf8_to_utf32(bytes: &[u8], characters: &mut Vec<Character>) -> Length {
    let before = characters.len();
    characters.reserve(bytes.len());
    for chunk in bytes.utf8_chunks() {
        characters.extend(chunk.valid().chars());
        if !chunk.invalid().is_empty() {
            log::trace!("skipped {} malformed UTF-8 bytes", chunk.invalid().len());
        }
    }
    characters.len() - before
}

/// Encodes UTF-32 characters as a UTF-8 string.
pub fn utf32_to_utf8(characters: &[Character]) -> String {
    characters.iter().collect()
}

/// Number of UTF-8 bytes needed to encode `characters`.
pub fn utf8_length(characters: &[Character]) -> usize {
    characters.iter().map(|c| c.len_utf8()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_byte_sequences() {
        let text = "aé€😀";
        let mut characters = Vec::new();
        assert_eq!(utf8_to_utf32(text.as_bytes(), &mut characters), 4);
        assert_eq!(characters, ['a', 'é', '€', '😀']);
        assert_eq!(utf8_length(&characters), text.len());
        assert_eq!(utf32_to_utf8(&characters), text);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let mut characters = Vec::new();
        assert_eq!(utf8_to_utf32(b"", &mut characters), 0);
        assert!(characters.is_empty());
    }

    #[test]
    fn appends_to_existing_buffer() {
        let mut characters = vec!['x'];
        assert_eq!(utf8_to_utf32(b"yz", &mut characters), 2);
        assert_eq!(characters, ['x', 'y', 'z']);
    }

    #[test]
    fn truncated_sequence_is_dropped() {
        let mut characters = Vec::new();
        assert_eq!(utf8_to_utf32(b"ab\xF0\x9F", &mut characters), 2);
        assert_eq!(characters, ['a', 'b']);
    }
}
