//! Hand-written JSON parser.
//!
//! Converts JSON text into a dynamically-typed [`Value`] tree without any
//! grammar engine.
//!
//! # Parsing Pipeline
//!
//! 1. **Scanner**: Owns the cursor over the source text and skips
//!    whitespace.
//!
//! 2. **Lexer**: Classifies the token at the cursor on demand. It is
//!    permissive: a number is any run of number-like characters and a string
//!    is the raw text between quotes.
//!
//! 3. **Parser**: Recursive descent over the lexer, one procedure per grammar
//!    rule. Number grammar and string escapes are checked here, when literals
//!    are converted.
//!
//! Each call builds its own scanner, lexer and parser, so concurrent calls
//! share nothing.

mod error;
mod lexer;
mod literal;
mod options;
mod parser;
mod scanner;
mod value;

use tracing::debug;

pub use error::{Found, Location, ParseContext, ParseError, Result};
pub use lexer::TokenKind;
pub use options::ParseOptions;
pub use value::{Map, Value};

/// Parse a JSON document from a string.
///
/// # Example
///
/// ```
/// use libjsonparse::parse;
///
/// let value = parse(r#"{"hits": [{"title": "hello"}]}"#).unwrap();
/// assert_eq!(value["hits"][0]["title"].as_str(), Some("hello"));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse a JSON document from a string with explicit limits.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    debug!(len = input.len(), max_depth = ?options.max_depth, "parsing document");

    let result = parser::Parser::new(input, options).parse_root();

    match &result {
        Ok(value) => debug!(kind = value.kind_name(), "parsed document"),
        Err(err) => debug!(offset = err.offset(), error = %err, "parse failed"),
    }
    result
}
