// crates/plystore-core/src/tokenizer.rs
//
// Line and word scanning over raw bytes. The only delimiter is LF; a CR before it
// stays part of the line and is skipped by the word scanner like any separator.

use crate::error::{PlyError, Result};

pub const DELIMITER: u8 = b'\n';

#[inline]
pub fn is_delimiter(buf: &[u8], i: usize) -> bool {
    buf.get(i) == Some(&DELIMITER)
}

/// Position of the next delimiter at or after `from`.
#[inline]
pub fn next_delimiter(buf: &[u8], from: usize) -> Option<usize> {
    if from >= buf.len() {
        return None;
    }
    memchr::memchr(DELIMITER, &buf[from..]).map(|off| from + off)
}

/// Words of one header line: maximal runs of alphanumeric or `_` characters.
///
/// `line_no` is only used to label a decoding failure.
pub fn words_of(line: &[u8], line_no: usize) -> Result<Words<'_>> {
    let text = std::str::from_utf8(line).map_err(|_| PlyError::Decoding { line: line_no })?;
    Ok(Words { rest: text })
}

#[inline]
fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Borrowing word iterator; yields slices of the decoded line without allocating.
#[derive(Clone, Debug)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let start = self.rest.find(is_word_char)?;
        let tail = &self.rest[start..];
        let end = tail.find(|c: char| !is_word_char(c)).unwrap_or(tail.len());
        let (word, rest) = tail.split_at(end);
        self.rest = rest;
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &[u8]) -> Vec<&str> {
        words_of(line, 1).unwrap().collect()
    }

    #[test]
    fn splits_on_non_word_bytes() {
        assert_eq!(collect(b"element vertex 8"), vec!["element", "vertex", "8"]);
        assert_eq!(collect(b"  format\tascii 1.0\r"), vec!["format", "ascii", "1", "0"]);
        assert_eq!(collect(b"end_header"), vec!["end_header"]);
    }

    #[test]
    fn blank_and_punctuation_lines_have_no_words() {
        assert!(collect(b"").is_empty());
        assert!(collect(b" \t-- ..\r").is_empty());
    }

    #[test]
    fn invalid_utf8_is_a_decoding_error() {
        let err = words_of(&[b'a', 0xff, b'b'], 7).unwrap_err();
        assert_eq!(err, PlyError::Decoding { line: 7 });
    }

    #[test]
    fn delimiter_lookup() {
        let buf = b"ab\ncd\r\n";
        assert!(is_delimiter(buf, 2));
        assert!(!is_delimiter(buf, 5));
        assert!(!is_delimiter(buf, 99));
        assert_eq!(next_delimiter(buf, 0), Some(2));
        assert_eq!(next_delimiter(buf, 3), Some(6));
        assert_eq!(next_delimiter(buf, 7), None);
    }
}
