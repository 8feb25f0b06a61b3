//! Block export parser
//!
//! Reads the JSON body of a block listing into a [`Document`].

use crate::ast::Document;
use serde_json::Value;
use thiserror::Error;

/// Parser errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON at line {line}, column {col}: {message}")]
    Syntax {
        message: String,
        line: usize,
        col: usize,
    },

    #[error("Unexpected document structure: {0}")]
    Structure(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Syntax | Category::Eof | Category::Io => ParseError::Syntax {
                line: err.line(),
                col: err.column(),
                message: err.to_string(),
            },
            Category::Data => ParseError::Structure(err.to_string()),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse a block export from JSON source
///
/// The top level must be an object; `results` and every block's `children`, if
/// present, must be arrays of objects. Other fields degrade to defaults instead
/// of failing.
pub fn parse(source: &str) -> ParseResult<Document> {
    Ok(serde_json::from_str(source)?)
}

/// Parse a block export from an already-decoded JSON value
pub fn parse_value(value: Value) -> ParseResult<Document> {
    Ok(serde_json::from_value(value)?)
}
