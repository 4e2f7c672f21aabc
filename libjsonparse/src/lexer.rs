//! Token classification.
//!
//! The lexer sits on top of the [`Scanner`] and answers one question on
//! demand: what token is at the cursor right now. It never looks past the
//! current token. The parser drives all progress by calling [`Lexer::peek`]
//! to choose a grammar rule and [`Lexer::advance`] or [`Lexer::expect`] to
//! consume.
//!
//! Lexing is deliberately permissive about numbers and strings: a NUMBER is
//! any run of number-like characters and a STRING is the raw text between
//! quotes. Numeric grammar and escape decoding happen later, in
//! [`crate::literal`].

use std::fmt;

use tracing::trace;

use crate::error::{Found, ParseError, Result};
use crate::scanner::Scanner;

/// Kind of a JSON token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Colon,
    Comma,
    String,
    Number,
    True,
    False,
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
        };
        f.write_str(name)
    }
}

/// A classified fragment of input at a known offset.
///
/// Only `String` and `Number` tokens carry a literal. For strings the
/// literal excludes the quotes and is still escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub literal: Option<&'a str>,
    pub offset: usize,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, offset: usize) -> Self {
        Self {
            kind,
            literal: None,
            offset,
        }
    }

    fn with_literal(kind: TokenKind, literal: &'a str, offset: usize) -> Self {
        Self {
            kind,
            literal: Some(literal),
            offset,
        }
    }

    /// Number of source bytes the token occupies.
    pub fn width(&self) -> usize {
        match self.kind {
            TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Colon
            | TokenKind::Comma => 1,
            TokenKind::Null | TokenKind::True => 4,
            TokenKind::False => 5,
            TokenKind::Number => self.literal.map_or(0, str::len),
            TokenKind::String => self.literal.map_or(0, str::len) + 2,
        }
    }
}

/// On-demand tokenizer over a source string.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
        }
    }

    /// Current cursor offset.
    pub fn offset(&self) -> usize {
        self.scanner.offset()
    }

    /// Skip whitespace and report whether any input remains.
    pub fn is_exhausted(&mut self) -> bool {
        self.scanner.skip_whitespace();
        self.scanner.is_at_end()
    }

    /// Classify the token at the cursor without consuming it.
    ///
    /// Leading whitespace is skipped for good, so the cursor may move even
    /// though no token is consumed.
    pub fn peek(&mut self) -> Result<Token<'a>> {
        self.scanner.skip_whitespace();
        let offset = self.scanner.offset();

        let Some(first) = self.scanner.byte_at(0) else {
            return Err(ParseError::InvalidToken {
                found: Found::EndOfInput,
                offset,
            });
        };

        match first {
            b'{' => Ok(Token::new(TokenKind::LBrace, offset)),
            b'}' => Ok(Token::new(TokenKind::RBrace, offset)),
            b'[' => Ok(Token::new(TokenKind::LBracket, offset)),
            b']' => Ok(Token::new(TokenKind::RBracket, offset)),
            b':' => Ok(Token::new(TokenKind::Colon, offset)),
            b',' => Ok(Token::new(TokenKind::Comma, offset)),
            b't' => self.keyword("true", TokenKind::True),
            b'f' => self.keyword("false", TokenKind::False),
            b'n' => self.keyword("null", TokenKind::Null),
            b'-' | b'0'..=b'9' => Ok(self.number()),
            b'"' => self.string(),
            _ => Err(self.invalid_token()),
        }
    }

    /// Consume and return the token at the cursor.
    pub fn advance(&mut self) -> Result<Token<'a>> {
        let token = self.peek()?;
        self.scanner.bump(token.width());
        trace!(kind = ?token.kind, offset = token.offset, "token");
        Ok(token)
    }

    /// Consume the token at the cursor, requiring it to be of `kind`.
    ///
    /// On mismatch the cursor is left before the offending token.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>> {
        let token = self.peek()?;
        if token.kind != kind {
            return Err(ParseError::UnexpectedToken {
                expected: kind,
                found: token.kind,
                offset: token.offset,
            });
        }
        self.advance()
    }

    /// Match an exact keyword. A partial match is an invalid token.
    fn keyword(&self, word: &str, kind: TokenKind) -> Result<Token<'a>> {
        if self.scanner.rest().starts_with(word) {
            Ok(Token::new(kind, self.scanner.offset()))
        } else {
            Err(self.invalid_token())
        }
    }

    /// Take the maximal run of number-like characters.
    fn number(&self) -> Token<'a> {
        let rest = self.scanner.rest();
        let len = rest
            .bytes()
            .take_while(|b| matches!(b, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-'))
            .count();
        Token::with_literal(TokenKind::Number, &rest[..len], self.scanner.offset())
    }

    /// Take everything up to the closing quote. A backslash always takes the
    /// next character with it, so `\"` does not terminate.
    fn string(&self) -> Result<Token<'a>> {
        let offset = self.scanner.offset();
        let body = &self.scanner.rest()[1..];
        let bytes = body.as_bytes();

        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'"' => {
                    return Ok(Token::with_literal(TokenKind::String, &body[..i], offset));
                }
                b'\\' => i += 2,
                _ => i += 1,
            }
        }

        Err(ParseError::UnterminatedString { offset })
    }

    fn invalid_token(&self) -> ParseError {
        ParseError::InvalidToken {
            found: self
                .scanner
                .current_char()
                .map_or(Found::EndOfInput, Found::Char),
            offset: self.scanner.offset(),
        }
    }
}
