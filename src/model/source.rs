//! Source buffer - the canonical document text

use std::borrow::Cow;
use std::ops::Range;

use ropey::Rope;

/// Document loaded at startup and restored by the reset action
pub const DEFAULT_DOCUMENT: &str = include_str!("../../samples/default.html");

/// The single authoritative copy of the document being edited.
///
/// Every mutation replaces text atomically and bumps `revision`; a rendered view
/// built from an older revision is stale.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    buffer: Rope,
    revision: u64,
}

impl SourceBuffer {
    /// Create a buffer holding the default document
    pub fn new() -> Self {
        Self::with_text(DEFAULT_DOCUMENT)
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from_str(text),
            revision: 0,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn rope(&self) -> &Rope {
        &self.buffer
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len_bytes(&self) -> usize {
        self.buffer.len_bytes()
    }

    /// Number of lines, as shown in a line-number gutter.
    ///
    /// Only `\n` ends a line, matching `str::lines` used by the locator.
    pub fn line_count(&self) -> usize {
        self.buffer.bytes().filter(|&b| b == b'\n').count() + 1
    }

    /// 1-based line holding the given byte offset
    pub fn line_of_byte(&self, byte: usize) -> usize {
        let end = byte.min(self.buffer.len_bytes());
        self.buffer.bytes().take(end).filter(|&b| b == b'\n').count() + 1
    }

    /// Byte offset of the first occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        // Borrowed when the rope is a single leaf
        let text: Cow<str> = (&self.buffer).into();
        text.find(needle)
    }

    /// Text in a byte range, if the range is valid for the current text
    pub fn slice(&self, range: Range<usize>) -> Option<String> {
        self.buffer
            .get_byte_slice(range)
            .map(|slice| slice.to_string())
    }

    /// Replace the whole document (authoring surface, reset)
    pub fn set_text(&mut self, text: &str) {
        self.buffer = Rope::from_str(text);
        self.revision += 1;
    }

    /// Replace a byte range with `replacement` in one step
    pub(crate) fn splice(&mut self, range: Range<usize>, replacement: &str) {
        let start = self.buffer.byte_to_char(range.start);
        let end = self.buffer.byte_to_char(range.end);
        self.buffer.remove(start..end);
        self.buffer.insert(start, replacement);
        self.revision += 1;
    }
}

impl Default for SourceBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_is_html() {
        let source = SourceBuffer::new();
        assert!(source.text().starts_with("<!DOCTYPE html>"));
        assert!(source.text().contains("Welcome to Live Editor"));
        assert_eq!(source.revision(), 0);
    }

    #[test]
    fn test_set_text_bumps_revision() {
        let mut source = SourceBuffer::with_text("a");
        source.set_text("b");
        assert_eq!(source.text(), "b");
        assert_eq!(source.revision(), 1);
    }

    #[test]
    fn test_splice_multibyte() {
        let mut source = SourceBuffer::with_text("héllo wörld");
        let start = source.find("wörld").unwrap();
        source.splice(start..start + "wörld".len(), "there");
        assert_eq!(source.text(), "héllo there");
        assert_eq!(source.revision(), 1);
    }

    #[test]
    fn test_line_of_byte() {
        let source = SourceBuffer::with_text("one\ntwo\nthree");
        assert_eq!(source.line_of_byte(0), 1);
        assert_eq!(source.line_of_byte(4), 2);
        assert_eq!(source.line_of_byte(source.find("three").unwrap()), 3);
        assert_eq!(source.line_count(), 3);
    }

    #[test]
    fn test_find_empty_needle_is_none() {
        let source = SourceBuffer::with_text("abc");
        assert_eq!(source.find(""), None);
    }

    #[test]
    fn test_slice_out_of_range() {
        let source = SourceBuffer::with_text("abc");
        assert_eq!(source.slice(1..3).as_deref(), Some("bc"));
        assert_eq!(source.slice(2..9), None);
    }

    #[test]
    fn test_slice_rejects_split_character() {
        let source = SourceBuffer::with_text("héllo");
        assert_eq!(source.slice(0..2), None);
        assert_eq!(source.slice(0..3).as_deref(), Some("hé"));
        assert_eq!(source.slice(3..1), None);
    }

    #[test]
    fn test_only_newline_breaks_lines() {
        let source = SourceBuffer::with_text("<p>a\u{2028}b\rc\u{85}d</p>\n<div>Z</div>");
        assert_eq!(source.line_count(), 2);
        assert_eq!(source.line_of_byte(source.find("d</p>").unwrap()), 1);
        assert_eq!(source.line_of_byte(source.find("<div>").unwrap()), 2);
        assert_eq!(source.line_of_byte(usize::MAX), 2);
    }

    #[test]
    fn test_line_count_trailing_newline() {
        let source = SourceBuffer::with_text("a\nb\n");
        assert_eq!(source.line_count(), 3);
        assert_eq!(SourceBuffer::with_text("").line_count(), 1);
    }
}
