//! Recursive-descent value parser.
//!
//! The parser owns no cursor of its own. Each grammar rule peeks at the next
//! token through the [`Lexer`] to pick a branch, then consumes:
//! - Scalars: null, booleans, numbers, strings
//! - Compounds: arrays and objects, re-entering `parse_value` per element

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, TokenKind};
use crate::literal;
use crate::options::ParseOptions;
use crate::value::{Map, Value};

/// Parser state for a single document.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    max_depth: Option<usize>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source`.
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(source),
            max_depth: options.max_depth,
            depth: 0,
        }
    }

    /// Parse the whole input as a single JSON value.
    pub fn parse_root(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.ensure_at_end()?;
        Ok(value)
    }

    /// Verify no content remains after the root value.
    fn ensure_at_end(&mut self) -> Result<()> {
        if self.lexer.is_exhausted() {
            Ok(())
        } else {
            Err(ParseError::TrailingContent {
                offset: self.lexer.offset(),
            })
        }
    }

    /// Parse a single value at the cursor.
    pub fn parse_value(&mut self) -> Result<Value> {
        let token = self.lexer.peek()?;
        match token.kind {
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_object(),
            TokenKind::String => {
                let token = self.lexer.advance()?;
                let raw = token.literal.unwrap_or_default();
                Ok(Value::String(literal::parse_string(raw, token.offset)?))
            }
            TokenKind::Number => {
                let token = self.lexer.advance()?;
                let raw = token.literal.unwrap_or_default();
                Ok(Value::Number(literal::parse_number(raw, token.offset)?))
            }
            TokenKind::True => {
                self.lexer.advance()?;
                Ok(Value::Bool(true))
            }
            TokenKind::False => {
                self.lexer.advance()?;
                Ok(Value::Bool(false))
            }
            TokenKind::Null => {
                self.lexer.advance()?;
                Ok(Value::Null)
            }
            found => Err(ParseError::UnexpectedValue {
                found,
                offset: token.offset,
            }),
        }
    }

    /// Parse `[ value (, value)* ]` or `[]`.
    fn parse_array(&mut self) -> Result<Value> {
        let open = self.lexer.expect(TokenKind::LBracket)?;
        self.enter(open.offset)?;

        let mut items = Vec::new();
        self.require_more('[', open.offset)?;
        if self.lexer.peek()?.kind != TokenKind::RBracket {
            loop {
                items.push(self.parse_value()?);
                self.require_more('[', open.offset)?;
                if self.lexer.peek()?.kind == TokenKind::RBracket {
                    break;
                }
                self.lexer.expect(TokenKind::Comma)?;
                // A value must follow the comma, so `[1,]` is rejected
                self.require_more('[', open.offset)?;
            }
        }
        self.lexer.expect(TokenKind::RBracket)?;

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Parse `{ "key": value (, "key": value)* }` or `{}`.
    ///
    /// Duplicate keys keep their first position and take the last value.
    fn parse_object(&mut self) -> Result<Value> {
        let open = self.lexer.expect(TokenKind::LBrace)?;
        self.enter(open.offset)?;

        let mut obj = Map::new();
        self.require_more('{', open.offset)?;
        if self.lexer.peek()?.kind != TokenKind::RBrace {
            loop {
                let key_token = self.lexer.expect(TokenKind::String)?;
                let key = literal::parse_string(
                    key_token.literal.unwrap_or_default(),
                    key_token.offset,
                )?;
                self.require_more('{', open.offset)?;
                self.lexer.expect(TokenKind::Colon)?;
                self.require_more('{', open.offset)?;
                let value = self.parse_value()?;
                obj.insert(key, value);

                self.require_more('{', open.offset)?;
                if self.lexer.peek()?.kind == TokenKind::RBrace {
                    break;
                }
                self.lexer.expect(TokenKind::Comma)?;
                self.require_more('{', open.offset)?;
            }
        }
        self.lexer.expect(TokenKind::RBrace)?;

        self.depth -= 1;
        Ok(Value::Object(obj))
    }

    /// Fail with an unterminated-container error if input has run out.
    fn require_more(&mut self, open: char, offset: usize) -> Result<()> {
        if self.lexer.is_exhausted() {
            return Err(ParseError::UnterminatedContainer { open, offset });
        }
        Ok(())
    }

    /// Track entry into a container, enforcing the depth limit.
    fn enter(&mut self, offset: usize) -> Result<()> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => {
                Err(ParseError::DepthLimitExceeded { limit, offset })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Found;

    fn parse(source: &str) -> Result<Value> {
        Parser::new(source, &ParseOptions::default()).parse_root()
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse("null"), Ok(Value::Null));
        assert_eq!(parse("true"), Ok(Value::Bool(true)));
        assert_eq!(parse("false"), Ok(Value::Bool(false)));
        assert_eq!(parse("\"aaa\""), Ok(Value::String("aaa".into())));
        assert_eq!(parse("-123"), Ok(Value::Number(-123.0)));
    }

    #[test]
    fn test_parse_nested_empty_arrays() {
        let value = parse("[[[]]]").unwrap();
        assert_eq!(
            value,
            Value::Array(vec![Value::Array(vec![Value::Array(vec![])])])
        );
    }

    #[test]
    fn test_parse_array_elements() {
        let value = parse("[1, \"two\", [3], {\"four\": 4}]").unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr[1].as_str(), Some("two"));
        assert_eq!(arr[3]["four"].as_f64(), Some(4.0));
    }

    #[test]
    fn test_duplicate_keys_keep_first_position() {
        let value = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        let obj = value.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(obj["a"], Value::Number(3.0));
    }

    #[test]
    fn test_keys_are_unescaped() {
        let value = parse(r#"{"a\"b": 1}"#).unwrap();
        assert_eq!(value.get("a\"b"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert_eq!(
            parse("[1,]"),
            Err(ParseError::UnexpectedValue {
                found: TokenKind::RBracket,
                offset: 3,
            })
        );
        assert_eq!(
            parse(r#"{"a":1,}"#),
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::String,
                found: TokenKind::RBrace,
                offset: 7,
            })
        );
    }

    #[test]
    fn test_missing_comma() {
        assert_eq!(
            parse("[1 2]"),
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::Comma,
                found: TokenKind::Number,
                offset: 3,
            })
        );
    }

    #[test]
    fn test_non_string_key() {
        assert_eq!(
            parse("{1: 2}"),
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::String,
                found: TokenKind::Number,
                offset: 1,
            })
        );
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(
            parse(r#"{"a" 1}"#),
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::Colon,
                found: TokenKind::Number,
                offset: 5,
            })
        );
    }

    #[test]
    fn test_unterminated_containers() {
        assert_eq!(
            parse("["),
            Err(ParseError::UnterminatedContainer {
                open: '[',
                offset: 0,
            })
        );
        assert_eq!(
            parse("[[]"),
            Err(ParseError::UnterminatedContainer {
                open: '[',
                offset: 0,
            })
        );
        assert_eq!(
            parse("{"),
            Err(ParseError::UnterminatedContainer {
                open: '{',
                offset: 0,
            })
        );
        assert_eq!(
            parse(r#" {"a": [1, "#),
            Err(ParseError::UnterminatedContainer {
                open: '[',
                offset: 7,
            })
        );
        assert_eq!(
            parse(r#"{"a""#),
            Err(ParseError::UnterminatedContainer {
                open: '{',
                offset: 0,
            })
        );
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(
            parse("[]]"),
            Err(ParseError::TrailingContent { offset: 2 })
        );
        assert_eq!(
            parse("{}}"),
            Err(ParseError::TrailingContent { offset: 2 })
        );
        assert_eq!(parse("1 2"), Err(ParseError::TrailingContent { offset: 2 }));
    }

    #[test]
    fn test_object_in_key_position() {
        assert_eq!(
            parse("{{}"),
            Err(ParseError::UnexpectedToken {
                expected: TokenKind::String,
                found: TokenKind::LBrace,
                offset: 1,
            })
        );
    }

    #[test]
    fn test_unexpected_value() {
        assert_eq!(
            parse(":"),
            Err(ParseError::UnexpectedValue {
                found: TokenKind::Colon,
                offset: 0,
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse("  "),
            Err(ParseError::InvalidToken {
                found: Found::EndOfInput,
                offset: 2,
            })
        );
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        assert!(Parser::new("[[1]]", &options).parse_root().is_ok());
        assert_eq!(
            Parser::new("[[{}]]", &options).parse_root(),
            Err(ParseError::DepthLimitExceeded {
                limit: 2,
                offset: 2,
            })
        );
        // Siblings do not accumulate depth
        assert!(Parser::new("[[], [], {}]", &options).parse_root().is_ok());
    }
}
