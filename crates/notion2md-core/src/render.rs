//! Block tree to Markdown rendering
//!
//! Converts a single block (and its attached children) into a Markdown fragment.
//! Rendering never fails: unknown block types and missing fields degrade to
//! minimal output.

use crate::inline::render_rich_text;
use notion_blocks::{Block, BlockKind, Bookmark, Callout, CodeBlock, Media, TableRow};

/// Indentation unit for nested blocks
const INDENT: &str = "  ";

/// Render a block at the given nesting depth
///
/// `depth` is 0 for top-level blocks and grows by one per level of children.
/// Children are rendered at `depth + 1` and joined with newlines; block types
/// that contain children decide where that joined text goes.
pub fn render_block(block: &Block, depth: usize) -> String {
    let text = render_rich_text(block.kind.rich_text());
    let children = render_children(block, depth);
    let indent = INDENT.repeat(depth);

    match &block.kind {
        BlockKind::Paragraph(_) => {
            if text.is_empty() {
                String::new()
            } else {
                format!("{}{}\n", indent, text)
            }
        }
        // Headings are never indented
        BlockKind::Heading1(_) => format!("# {}\n", text),
        BlockKind::Heading2(_) => format!("## {}\n", text),
        BlockKind::Heading3(_) => format!("### {}\n", text),
        BlockKind::BulletedListItem(_) => format!("{}- {}\n{}", indent, text, children),
        // Always "1." and left to the Markdown renderer to number
        BlockKind::NumberedListItem(_) => format!("{}1. {}\n{}", indent, text, children),
        BlockKind::ToDo(todo) => {
            let checkbox = if todo.checked { "[x]" } else { "[ ]" };
            format!("{}- {} {}\n", indent, checkbox, text)
        }
        BlockKind::Toggle(_) => render_toggle(&text, &children, &indent),
        BlockKind::Code(code) => render_code(code, &text),
        BlockKind::Quote(_) => render_quote(&text),
        BlockKind::Callout(callout) => render_callout(callout, &text),
        BlockKind::Divider => "---\n".to_string(),
        BlockKind::Image(media) => render_image(media),
        BlockKind::Bookmark(bookmark) => render_bookmark(bookmark),
        BlockKind::TableRow(row) => render_table_row(row),
        BlockKind::ChildPage(page) => format!("**[{}]**\n", page.title),
        BlockKind::ChildDatabase(db) => format!("**[Database: {}]**\n", db.title),
        // Pure containers: structure comes entirely from children
        BlockKind::Table | BlockKind::ColumnList | BlockKind::Column => children,
        BlockKind::Unsupported { .. } => {
            if text.is_empty() {
                String::new()
            } else {
                format!("{}\n", text)
            }
        }
    }
}

/// Render attached children one level deeper, joined by newlines
fn render_children(block: &Block, depth: usize) -> String {
    block
        .children()
        .iter()
        .map(|child| render_block(child, depth + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapsible `<details>` section
fn render_toggle(summary: &str, children: &str, indent: &str) -> String {
    format!(
        "{indent}<details>\n{indent}<summary>{summary}</summary>\n\n{children}\n{indent}</details>\n"
    )
}

fn render_code(code: &CodeBlock, text: &str) -> String {
    format!("```{}\n{}\n```\n", code.language, text)
}

fn render_quote(text: &str) -> String {
    let quoted: Vec<String> = text.split('\n').map(|line| format!("> {}", line)).collect();
    format!("{}\n", quoted.join("\n"))
}

fn render_callout(callout: &Callout, text: &str) -> String {
    let icon = callout
        .emoji()
        .map(|emoji| format!("{} ", emoji))
        .unwrap_or_default();
    format!("> {}{}\n", icon, text)
}

fn render_image(media: &Media) -> String {
    let caption = render_rich_text(&media.caption);
    let alt = if caption.is_empty() { "image" } else { caption.as_str() };
    format!("![{}]({})\n", alt, media.source_url())
}

fn render_bookmark(bookmark: &Bookmark) -> String {
    let caption = render_rich_text(&bookmark.caption);
    let label = if caption.is_empty() {
        bookmark.url.as_str()
    } else {
        caption.as_str()
    };
    format!("[{}]({})\n", label, bookmark.url)
}

/// One pipe-delimited row; no delimiter row is synthesized for tables
fn render_table_row(row: &TableRow) -> String {
    let cells: Vec<String> = row.cells.iter().map(|cell| render_rich_text(cell)).collect();
    format!("| {} |\n", cells.join(" | "))
}

#[cfg(test)]
mod tests;
