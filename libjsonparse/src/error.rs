//! Error types for JSON parsing.

use thiserror::Error;

use crate::lexer::TokenKind;

/// Result type for JSON parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Parse context carrying a filename for error reporting.
#[derive(Clone, Debug, Default)]
pub struct ParseContext {
    pub filename: Option<String>,
}

impl ParseContext {
    /// Create a new parse context.
    pub fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(String::from),
        }
    }

    /// Format a location suffix for error messages.
    pub fn loc_suffix(&self, location: Location) -> String {
        match &self.filename {
            Some(name) => format!(" at {}:{} of <{}>", location.line, location.column, name),
            None => format!(" at {}:{}", location.line, location.column),
        }
    }

    /// Render an error against the input it was produced from.
    pub fn describe(&self, err: &ParseError, input: &str) -> String {
        let location = Location::from_offset(input, err.offset());
        format!("{}{}", err, self.loc_suffix(location))
    }
}

/// A 1-based line and column, counted in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Convert a byte offset into `input` to a line and column.
    ///
    /// Offsets past the end clamp to the end of input; offsets inside a
    /// multi-byte character resolve to that character.
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (i, ch) in input.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else if i + ch.len_utf8() <= offset {
                column += 1;
            }
        }
        Self { line, column }
    }
}

/// Error type for JSON parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The character at the cursor starts no token.
    #[error("Invalid token {found} (offset {offset})")]
    InvalidToken { found: Found, offset: usize },

    /// A specific token kind was required.
    #[error("Expected {expected} but found {found} (offset {offset})")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        offset: usize,
    },

    /// The token cannot begin a value.
    #[error("Unexpected {found} where a value was expected (offset {offset})")]
    UnexpectedValue { found: TokenKind, offset: usize },

    /// A number literal that is not valid JSON.
    #[error("Invalid number {literal:?} (offset {offset})")]
    InvalidNumber { literal: String, offset: usize },

    /// Input ended inside a string.
    #[error("Unterminated string (offset {offset})")]
    UnterminatedString { offset: usize },

    /// Input ended inside an array or object.
    #[error("Unterminated {} (offset {offset})", container_name(.open))]
    UnterminatedContainer { open: char, offset: usize },

    /// Bad backslash escape in a string.
    #[error("Invalid escape {sequence:?} (offset {offset})")]
    InvalidEscape { sequence: String, offset: usize },

    /// Unescaped control character in a string.
    #[error("Control character U+{code:04X} in string (offset {offset})")]
    ControlCharacter { code: u32, offset: usize },

    /// Content after the root value.
    #[error("Unexpected extra content (offset {offset})")]
    TrailingContent { offset: usize },

    /// Nesting deeper than the configured limit.
    #[error("Nesting exceeds depth limit of {limit} (offset {offset})")]
    DepthLimitExceeded { limit: usize, offset: usize },
}

impl ParseError {
    /// Byte offset into the input where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::InvalidToken { offset, .. }
            | ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnexpectedValue { offset, .. }
            | ParseError::InvalidNumber { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::UnterminatedContainer { offset, .. }
            | ParseError::InvalidEscape { offset, .. }
            | ParseError::ControlCharacter { offset, .. }
            | ParseError::TrailingContent { offset }
            | ParseError::DepthLimitExceeded { offset, .. } => *offset,
        }
    }
}

/// What the lexer saw where a token was required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    Char(char),
    EndOfInput,
}

impl std::fmt::Display for Found {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Found::Char(c) => write!(f, "{:?}", c),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

fn container_name(open: &char) -> &'static str {
    match open {
        '{' => "object",
        _ => "array",
    }
}
