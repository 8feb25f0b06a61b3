use super::*;
use notion_blocks::{RichText, TextBlock, ToDo};
use serde_json::{Value, json};

fn block(value: Value) -> Block {
    serde_json::from_value(value).unwrap()
}

fn text(s: &str) -> Value {
    json!([{ "type": "text", "plain_text": s, "href": null }])
}

fn paragraph(s: &str) -> Block {
    Block::new(BlockKind::Paragraph(TextBlock::new(vec![RichText::plain(s)])))
}

#[test]
fn test_paragraph() {
    assert_eq!(render_block(&paragraph("Hello"), 0), "Hello\n");
    assert_eq!(render_block(&paragraph("Hello"), 2), "    Hello\n");
}

#[test]
fn test_empty_paragraph() {
    let empty = Block::new(BlockKind::Paragraph(TextBlock::default()));
    assert_eq!(render_block(&empty, 0), "");
    assert_eq!(render_block(&empty, 3), "");
}

#[test]
fn test_headings_never_indented() {
    for (tag, prefix) in [("heading_1", "#"), ("heading_2", "##"), ("heading_3", "###")] {
        let b = block(json!({ "type": tag, (tag): { "rich_text": text("Title") } }));
        for depth in 0..3 {
            assert_eq!(render_block(&b, depth), format!("{} Title\n", prefix));
        }
    }
}

#[test]
fn test_bulleted_list_with_children() {
    let b = block(json!({
        "type": "bulleted_list_item",
        "bulleted_list_item": { "rich_text": text("Parent") },
        "has_children": true,
        "children": [
            { "type": "bulleted_list_item", "bulleted_list_item": { "rich_text": text("Child") } }
        ]
    }));
    assert_eq!(render_block(&b, 0), "- Parent\n  - Child\n");
}

#[test]
fn test_list_children_joined_with_newline() {
    let b = block(json!({
        "type": "bulleted_list_item",
        "bulleted_list_item": { "rich_text": text("P") },
        "has_children": true,
        "children": [
            { "type": "bulleted_list_item", "bulleted_list_item": { "rich_text": text("a") } },
            { "type": "bulleted_list_item", "bulleted_list_item": { "rich_text": text("b") } }
        ]
    }));
    // Each fragment already ends in a newline, so joining leaves a blank line
    assert_eq!(render_block(&b, 0), "- P\n  - a\n\n  - b\n");
}

#[test]
fn test_children_ignored_without_flag() {
    let b = block(json!({
        "type": "bulleted_list_item",
        "bulleted_list_item": { "rich_text": text("P") },
        "has_children": false,
        "children": [
            { "type": "paragraph", "paragraph": { "rich_text": text("hidden") } }
        ]
    }));
    assert_eq!(render_block(&b, 0), "- P\n");
}

#[test]
fn test_numbered_list_marker_is_literal() {
    let item = |s: &str| {
        block(json!({ "type": "numbered_list_item", "numbered_list_item": { "rich_text": text(s) } }))
    };
    assert_eq!(render_block(&item("first"), 0), "1. first\n");
    assert_eq!(render_block(&item("second"), 1), "  1. second\n");
}

#[test]
fn test_nested_numbered_in_bulleted() {
    let b = block(json!({
        "type": "bulleted_list_item",
        "bulleted_list_item": { "rich_text": text("outer") },
        "has_children": true,
        "children": [{
            "type": "numbered_list_item",
            "numbered_list_item": { "rich_text": text("inner") },
            "has_children": true,
            "children": [
                { "type": "paragraph", "paragraph": { "rich_text": text("deep") } }
            ]
        }]
    }));
    assert_eq!(render_block(&b, 0), "- outer\n  1. inner\n    deep\n");
}

#[test]
fn test_to_do() {
    let todo = |checked| {
        Block::new(BlockKind::ToDo(ToDo {
            rich_text: vec![RichText::plain("Buy milk")],
            checked,
        }))
    };
    assert_eq!(render_block(&todo(false), 0), "- [ ] Buy milk\n");
    assert_eq!(render_block(&todo(true), 0), "- [x] Buy milk\n");
    assert_eq!(render_block(&todo(true), 1), "  - [x] Buy milk\n");
}

#[test]
fn test_to_do_children_not_rendered() {
    let b = Block::new(BlockKind::ToDo(ToDo::default())).with_children(vec![paragraph("sub")]);
    assert_eq!(render_block(&b, 0), "- [ ] \n");
}

#[test]
fn test_toggle() {
    let b = block(json!({
        "type": "toggle",
        "toggle": { "rich_text": text("Details") },
        "has_children": true,
        "children": [
            { "type": "paragraph", "paragraph": { "rich_text": text("Hi") } }
        ]
    }));
    assert_eq!(
        render_block(&b, 0),
        "<details>\n<summary>Details</summary>\n\n  Hi\n\n</details>\n"
    );
}

#[test]
fn test_nested_toggle_indent() {
    let b = block(json!({
        "type": "toggle",
        "toggle": { "rich_text": text("More") },
        "has_children": true,
        "children": [
            { "type": "paragraph", "paragraph": { "rich_text": text("Hi") } }
        ]
    }));
    assert_eq!(
        render_block(&b, 1),
        "  <details>\n  <summary>More</summary>\n\n    Hi\n\n  </details>\n"
    );
}

#[test]
fn test_toggle_without_children() {
    let b = block(json!({ "type": "toggle", "toggle": { "rich_text": text("Empty") } }));
    assert_eq!(
        render_block(&b, 0),
        "<details>\n<summary>Empty</summary>\n\n\n</details>\n"
    );
}

#[test]
fn test_code() {
    let b = block(json!({
        "type": "code",
        "code": { "rich_text": text("fn main() {}"), "language": "rust" }
    }));
    assert_eq!(render_block(&b, 0), "```rust\nfn main() {}\n```\n");
}

#[test]
fn test_code_without_language_not_indented() {
    let b = block(json!({ "type": "code", "code": { "rich_text": text("ls -la") } }));
    assert_eq!(render_block(&b, 2), "```\nls -la\n```\n");
}

#[test]
fn test_quote_multiline() {
    let b = block(json!({ "type": "quote", "quote": { "rich_text": text("one\ntwo") } }));
    assert_eq!(render_block(&b, 0), "> one\n> two\n");
}

#[test]
fn test_empty_quote() {
    let b = block(json!({ "type": "quote", "quote": {} }));
    assert_eq!(render_block(&b, 0), "> \n");
}

#[test]
fn test_callout_with_emoji() {
    let b = block(json!({
        "type": "callout",
        "callout": { "rich_text": text("Note this"), "icon": { "type": "emoji", "emoji": "💡" } }
    }));
    assert_eq!(render_block(&b, 0), "> 💡 Note this\n");
}

#[test]
fn test_callout_without_emoji() {
    let b = block(json!({
        "type": "callout",
        "callout": {
            "rich_text": text("Note this"),
            "icon": { "type": "external", "external": { "url": "http://i/x.png" } }
        }
    }));
    assert_eq!(render_block(&b, 0), "> Note this\n");

    let b = block(json!({ "type": "callout", "callout": { "rich_text": text("Plain") } }));
    assert_eq!(render_block(&b, 0), "> Plain\n");
}

#[test]
fn test_divider() {
    let b = block(json!({ "type": "divider", "divider": {} }));
    assert_eq!(render_block(&b, 0), "---\n");
    assert_eq!(render_block(&b, 2), "---\n");
}

#[test]
fn test_image_external_no_caption() {
    let b = block(json!({
        "type": "image",
        "image": { "type": "external", "external": { "url": "http://x/y.png" }, "caption": [] }
    }));
    assert_eq!(render_block(&b, 0), "![image](http://x/y.png)\n");
}

#[test]
fn test_image_file_with_caption() {
    let b = block(json!({
        "type": "image",
        "image": {
            "type": "file",
            "file": { "url": "https://s3/a.png", "expiry_time": "2024-01-01T00:00:00.000Z" },
            "caption": text("Architecture")
        }
    }));
    assert_eq!(render_block(&b, 0), "![Architecture](https://s3/a.png)\n");
}

#[test]
fn test_image_unknown_source() {
    let b = block(json!({ "type": "image", "image": {} }));
    assert_eq!(render_block(&b, 0), "![image]()\n");
}

#[test]
fn test_bookmark() {
    let b = block(json!({
        "type": "bookmark",
        "bookmark": { "url": "https://rust-lang.org", "caption": [] }
    }));
    assert_eq!(
        render_block(&b, 0),
        "[https://rust-lang.org](https://rust-lang.org)\n"
    );

    let b = block(json!({
        "type": "bookmark",
        "bookmark": { "url": "https://rust-lang.org", "caption": text("Rust") }
    }));
    assert_eq!(render_block(&b, 0), "[Rust](https://rust-lang.org)\n");
}

#[test]
fn test_table_rows_only() {
    let b = block(json!({
        "type": "table",
        "table": { "table_width": 2, "has_column_header": true },
        "has_children": true,
        "children": [
            { "type": "table_row", "table_row": { "cells": [text("a"), text("b")] } },
            { "type": "table_row", "table_row": { "cells": [text("c"), text("d")] } }
        ]
    }));
    // No delimiter row is synthesized
    assert_eq!(render_block(&b, 0), "| a | b |\n\n| c | d |\n");
}

#[test]
fn test_empty_table() {
    let b = block(json!({ "type": "table", "table": {}, "has_children": true }));
    assert_eq!(render_block(&b, 0), "");
}

#[test]
fn test_table_row_cells_use_inline_markup() {
    let b = block(json!({
        "type": "table_row",
        "table_row": {
            "cells": [
                [{ "plain_text": "id", "annotations": { "code": true } }],
                [],
                [{ "plain_text": "x", "annotations": { "bold": true } }, { "plain_text": "y" }]
            ]
        }
    }));
    assert_eq!(render_block(&b, 0), "| `id` |  | **x**y |\n");
}

#[test]
fn test_table_row_no_cells() {
    let b = block(json!({ "type": "table_row", "table_row": {} }));
    assert_eq!(render_block(&b, 0), "|  |\n");
}

#[test]
fn test_child_page_and_database() {
    let page = block(json!({ "type": "child_page", "child_page": { "title": "Roadmap" } }));
    assert_eq!(render_block(&page, 0), "**[Roadmap]**\n");

    let db = block(json!({ "type": "child_database", "child_database": { "title": "Tasks" } }));
    assert_eq!(render_block(&db, 0), "**[Database: Tasks]**\n");

    let untitled = block(json!({ "type": "child_page" }));
    assert_eq!(render_block(&untitled, 0), "**[]**\n");
}

#[test]
fn test_columns() {
    let b = block(json!({
        "type": "column_list",
        "column_list": {},
        "has_children": true,
        "children": [
            {
                "type": "column",
                "column": {},
                "has_children": true,
                "children": [
                    { "type": "paragraph", "paragraph": { "rich_text": text("left") } }
                ]
            },
            {
                "type": "column",
                "column": {},
                "has_children": true,
                "children": [
                    { "type": "paragraph", "paragraph": { "rich_text": text("right") } }
                ]
            }
        ]
    }));
    assert_eq!(render_block(&b, 0), "    left\n\n    right\n");
}

#[test]
fn test_empty_column_list() {
    let b = block(json!({ "type": "column_list", "column_list": {} }));
    assert_eq!(render_block(&b, 0), "");
}

#[test]
fn test_unknown_type_fallback() {
    let b = block(json!({
        "type": "equation_v2",
        "equation_v2": { "rich_text": text("E = mc^2") }
    }));
    assert_eq!(render_block(&b, 0), "E = mc^2\n");
    // Fallback text is not indented
    assert_eq!(render_block(&b, 2), "E = mc^2\n");

    let b = block(json!({ "type": "embed", "embed": { "url": "https://x" } }));
    assert_eq!(render_block(&b, 0), "");
}

#[test]
fn test_inline_markup_in_block() {
    let b = block(json!({
        "type": "paragraph",
        "paragraph": {
            "rich_text": [
                { "plain_text": "Run ", "href": null },
                { "plain_text": "make", "annotations": { "code": true, "bold": true } },
                { "plain_text": " " },
                { "plain_text": "now", "annotations": { "italic": true } }
            ]
        }
    }));
    assert_eq!(render_block(&b, 0), "Run **`make`** *now*\n");
}

#[test]
fn test_render_is_deterministic() {
    let b = block(json!({
        "type": "toggle",
        "toggle": { "rich_text": text("T") },
        "has_children": true,
        "children": [
            { "type": "to_do", "to_do": { "rich_text": text("x"), "checked": true } },
            { "type": "divider", "divider": {} }
        ]
    }));
    assert_eq!(render_block(&b, 0), render_block(&b, 0));
}
