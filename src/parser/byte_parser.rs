//! Low-level byte-by-byte parser for ASCII text.
//!
//! This module provides [ByteParser], offering peeking, consuming, comment
//! skipping, and quote-aware label parsing. It is the foundation of the
//! [NewickParser](crate::newick::NewickParser).

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::ParsingError;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text.
///
/// # Features
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (single quotes, `''` as escaped quote)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use treedist::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("[ lh=-893.89 ] (A:1,B:2);");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert_eq!(parser.peek(), Some(b'('));
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new [ByteParser] over a copy of the given string.
    pub fn for_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new [ByteParser] over the full content of a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new [ByteParser] from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips all consecutive whitespace (space, tab, newline, carriage return).
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.next_byte();
            } else {
                break;
            }
        }
    }

    /// Skips a `[...]` comment if one starts at the current position.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * `Err(ParsingError)` - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if !self.consume_if(b'[') {
            return Ok(false);
        }

        while let Some(b) = self.next_byte() {
            if b == b']' {
                return Ok(true);
            }
        }

        Err(ParsingError::unclosed_comment(self))
    }

    /// Skips all consecutive whitespace and comments.
    ///
    /// A leading likelihood annotation such as `[ lh=-7360.433800 ]` is an
    /// ordinary comment and thus skipped here as well.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();
        while self.skip_comment()? {
            self.skip_whitespace();
        }
        Ok(())
    }

    /// Checks if the current byte is `ch`.
    #[inline]
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek() == Some(ch)
    }

    /// Consumes the current byte if it is `ch`.
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Returns whether the end of data has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns up to `k` bytes from the current position as (lossy) string,
    /// used as context in error messages.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.peek_slice(k)).into_owned()
    }

    /// Parses a label (quoted or unquoted), ended by any of `delimiters`.
    ///
    /// Leading comments and whitespace are skipped first.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek_is(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(self.parse_unquoted_label(delimiters))
        }
    }

    /// Parses a label enclosed in single quotes.
    ///
    /// Single quotes within the label are escaped by doubling them,
    /// e.g. `'Wilson''s'` becomes `Wilson's`.
    ///
    /// # Errors
    /// Returns an error if the closing quote is missing.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        self.next_byte(); // consume opening '

        let mut label = Vec::new();
        while let Some(b) = self.next_byte() {
            if b == b'\'' {
                if self.peek_is(b'\'') {
                    label.push(b'\'');
                    self.next_byte();
                } else {
                    return Ok(String::from_utf8_lossy(&label).into_owned());
                }
            } else {
                label.push(b);
            }
        }

        Err(ParsingError::unclosed_quote(self))
    }

    /// Parses an unquoted label until any of the given delimiters (or EOF).
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut label = Vec::new();
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            label.push(b);
            self.next_byte();
        }
        String::from_utf8_lossy(&label).into_owned()
    }

    /// Consumes the longest run of bytes that may form a float literal
    /// (digits, `.`, `-`, `+`, `e`, `E`) and returns it.
    pub fn take_number_literal(&mut self) -> String {
        let mut literal = String::new();
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                literal.push(b as char);
                self.next_byte();
            } else {
                break;
            }
        }
        literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_nested_whitespace_and_comments() {
        let mut parser = ByteParser::for_str("  [one] \n [two]\t(");
        parser.skip_comment_and_whitespace().unwrap();
        assert_eq!(parser.peek(), Some(b'('));
    }

    #[test]
    fn unclosed_comment_is_an_error() {
        let mut parser = ByteParser::for_str("[ lh=-1.0 (A,B);");
        assert!(parser.skip_comment_and_whitespace().is_err());
    }

    #[test]
    fn quoted_label_with_escaped_quote() {
        let mut parser = ByteParser::for_str("'Baillon''s crake':1.0");
        let label = parser.parse_label(b",:;()").unwrap();
        assert_eq!(label, "Baillon's crake");
        assert_eq!(parser.peek(), Some(b':'));
    }

    #[test]
    fn unclosed_quote_is_an_error() {
        let mut parser = ByteParser::for_str("'Kea:1.0");
        assert!(parser.parse_label(b",:;()").is_err());
    }

    #[test]
    fn number_literal_stops_at_delimiter() {
        let mut parser = ByteParser::for_str("1.5e-3,B");
        assert_eq!(parser.take_number_literal(), "1.5e-3");
        assert_eq!(parser.peek(), Some(b','));
    }
}
