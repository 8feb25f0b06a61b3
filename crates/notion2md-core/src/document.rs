//! Document assembly
//!
//! Joins rendered top-level blocks into a complete Markdown file.

use crate::render::render_block;
use notion_blocks::{Block, BlockKind, Document};

/// Notice written at the top of every generated file
pub const GENERATED_NOTICE: &str = "<!-- Auto-generated from Notion. Do not edit directly. -->";

/// Options for document assembly
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Start the file with [`GENERATED_NOTICE`] and a blank line (default: true)
    pub notice: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self { notice: true }
    }
}

/// Assemble top-level blocks into a Markdown document
pub fn assemble_document(blocks: &[Block]) -> String {
    assemble_document_with_options(blocks, &DocumentOptions::default())
}

/// Assemble top-level blocks into a Markdown document with options
///
/// A blank separator line goes before a block whose type differs from the
/// previous block's type, unless the current block is list-like. Only the
/// current block is checked: a paragraph after a list item gets a separator,
/// a list item after a paragraph does not.
///
/// The result has surrounding whitespace trimmed and ends in exactly one newline.
pub fn assemble_document_with_options(blocks: &[Block], options: &DocumentOptions) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(blocks.len() * 2 + 1);

    if options.notice {
        lines.push(format!("{}\n\n", GENERATED_NOTICE));
    }

    let mut prev_type: Option<&str> = None;
    for block in blocks {
        let block_type = block.type_name();
        // A block without a type tag never triggers a separator for its successor
        if let Some(prev) = prev_type.filter(|prev| !prev.is_empty()) {
            if prev != block_type && !is_list_like(block) {
                lines.push(String::new());
            }
        }
        lines.push(render_block(block, 0));
        prev_type = Some(block_type);
    }

    format!("{}\n", lines.join("\n").trim())
}

/// Assemble a parsed export
pub fn document_to_markdown(doc: &Document, options: &DocumentOptions) -> String {
    assemble_document_with_options(&doc.results, options)
}

fn is_list_like(block: &Block) -> bool {
    matches!(
        block.kind,
        BlockKind::BulletedListItem(_) | BlockKind::NumberedListItem(_) | BlockKind::ToDo(_)
    )
}
