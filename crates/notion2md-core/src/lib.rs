//! notion2md-core: Core library for converting Notion block exports to Markdown
//!
//! This crate provides:
//! - Rich text to inline Markdown rendering
//! - Recursive block tree rendering
//! - Document assembly with the generated-file notice
//!
//! ## Example
//!
//! ```rust
//! use notion2md_core::convert;
//!
//! let md = convert(r#"{
//!   "results": [
//!     { "type": "heading_2", "heading_2": { "rich_text": [{ "plain_text": "Hello" }] } }
//!   ]
//! }"#).unwrap();
//!
//! assert!(md.ends_with("## Hello\n"));
//! ```

pub mod document;
pub mod inline;
pub mod render;

pub use document::{
    DocumentOptions, GENERATED_NOTICE, assemble_document, assemble_document_with_options,
    document_to_markdown,
};
pub use inline::{render_rich_text, render_span};
pub use notion_blocks::{Block, BlockKind, Document, ParseError, RichText, parse};
pub use render::render_block;

/// Parse a block export and render it as a Markdown document
pub fn convert(source: &str) -> Result<String, ParseError> {
    convert_with_options(source, &DocumentOptions::default())
}

/// Parse a block export and render it with options
pub fn convert_with_options(source: &str, options: &DocumentOptions) -> Result<String, ParseError> {
    let doc = parse(source)?;
    Ok(document_to_markdown(&doc, options))
}
