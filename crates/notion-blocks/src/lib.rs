//! notion-blocks: Block data model for Notion block exports
//!
//! This crate provides:
//! - Block tree types with a closed [`BlockKind`] sum type
//! - A lenient JSON parser: missing or malformed payload fields take
//!   documented defaults instead of failing
//!
//! # Example
//!
//! ```
//! use notion_blocks::{parse, BlockKind};
//!
//! let source = r#"{
//!   "results": [
//!     { "type": "divider", "divider": {} },
//!     { "type": "to_do", "to_do": { "checked": true } }
//!   ]
//! }"#;
//!
//! let doc = parse(source).unwrap();
//! assert_eq!(doc.results.len(), 2);
//! assert_eq!(doc.results[0].kind, BlockKind::Divider);
//! ```

pub mod ast;
mod de;
pub mod parser;

// Re-export main types for convenient access
pub use ast::{
    Annotations, Block, BlockKind, Bookmark, Callout, CodeBlock, Document, FileUrl, Icon, Media,
    RichText, TableRow, TextBlock, Titled, ToDo,
};
pub use parser::{ParseError, ParseResult, parse, parse_value};
