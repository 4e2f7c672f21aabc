//! Character cursor over the source text.
//!
//! The scanner owns the single mutable offset into the input. It knows how
//! to skip whitespace, look at bytes relative to the cursor, and move the
//! cursor forward. It knows nothing about tokens.

/// A byte cursor over JSON source text.
///
/// The offset never decreases and always sits on a `char` boundary, since
/// it only moves past ASCII bytes or whole token slices.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Skip a run of JSON whitespace at the cursor.
    pub fn skip_whitespace(&mut self) {
        let skipped = self.rest().bytes().take_while(|&b| is_whitespace(b)).count();
        self.offset += skipped;
    }

    /// Byte `ahead` positions past the cursor, if any.
    pub fn byte_at(&self, ahead: usize) -> Option<u8> {
        self.source.as_bytes().get(self.offset + ahead).copied()
    }

    /// The character at the cursor, if any.
    pub fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Unconsumed input from the cursor on.
    pub fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Whether the cursor has reached the end of input.
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Move the cursor forward by `width` bytes.
    pub fn bump(&mut self, width: usize) {
        self.offset = (self.offset + width).min(self.source.len());
    }
}

/// JSON insignificant whitespace: space, tab, line feed, carriage return.
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_whitespace() {
        let mut scanner = Scanner::new(" \t\r\n [");
        scanner.skip_whitespace();
        assert_eq!(scanner.offset(), 5);
        assert_eq!(scanner.current_char(), Some('['));
    }

    #[test]
    fn test_skip_whitespace_is_idempotent() {
        let mut scanner = Scanner::new("  1");
        scanner.skip_whitespace();
        scanner.skip_whitespace();
        assert_eq!(scanner.offset(), 2);
    }

    #[test]
    fn test_byte_at_and_end() {
        let mut scanner = Scanner::new("ab");
        assert_eq!(scanner.byte_at(0), Some(b'a'));
        assert_eq!(scanner.byte_at(1), Some(b'b'));
        assert_eq!(scanner.byte_at(2), None);
        scanner.bump(2);
        assert!(scanner.is_at_end());
        assert_eq!(scanner.current_char(), None);
    }

    #[test]
    fn test_bump_clamps_to_end() {
        let mut scanner = Scanner::new("x");
        scanner.bump(10);
        assert_eq!(scanner.offset(), 1);
        assert_eq!(scanner.rest(), "");
    }

    #[test]
    fn test_non_ascii_current_char() {
        let scanner = Scanner::new("é");
        assert_eq!(scanner.current_char(), Some('é'));
    }
}
