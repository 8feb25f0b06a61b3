//! Notion block tree types
//!
//! This module defines the block tree as exported by the Notion block API.
//! Reference: https://developers.notion.com/reference/block
//!
//! Every payload field carries a documented default. A field that is missing,
//! `null`, or of the wrong JSON shape takes that default instead of failing
//! the parse, so partial exports still render.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::de::lenient;

/// A block export (the body of a `children` listing)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Top-level blocks in document order (default: empty)
    pub results: Vec<Block>,
}

/// A single block, owning its (optionally attached) children
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBlock")]
pub struct Block {
    /// Type-specific content, selected by the block's `type` tag
    pub kind: BlockKind,
    /// Whether the API reported children for this block (default: false)
    pub has_children: bool,
    /// Children attached by the exporter, if any (default: none)
    pub children: Option<Vec<Block>>,
}

impl Block {
    /// Create a childless block
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            has_children: false,
            children: None,
        }
    }

    /// Attach children and set `has_children`
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.has_children = true;
        self.children = Some(children);
        self
    }

    /// The block's `type` tag as it appeared in the export
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// Children to render
    ///
    /// Empty unless `has_children` is set *and* children were attached.
    pub fn children(&self) -> &[Block] {
        match (&self.children, self.has_children) {
            (Some(children), true) => children,
            _ => &[],
        }
    }
}

/// Block content, one variant per supported `type` tag
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    NumberedListItem(TextBlock),
    ToDo(ToDo),
    Toggle(TextBlock),
    Code(CodeBlock),
    Quote(TextBlock),
    Callout(Callout),
    Divider,
    Image(Media),
    Bookmark(Bookmark),
    /// Table structure lives entirely in `table_row` children
    Table,
    TableRow(TableRow),
    ChildPage(Titled),
    ChildDatabase(Titled),
    ColumnList,
    Column,
    /// Any tag not listed above (forward compatibility)
    Unsupported {
        type_name: String,
        /// The payload's `rich_text`, if it had one (default: empty)
        rich_text: Vec<RichText>,
    },
}

impl BlockKind {
    /// Build block content from a `type` tag and the payload stored under it
    pub fn from_payload(type_name: &str, payload: Value) -> Self {
        match type_name {
            "paragraph" => Self::Paragraph(decode(payload)),
            "heading_1" => Self::Heading1(decode(payload)),
            "heading_2" => Self::Heading2(decode(payload)),
            "heading_3" => Self::Heading3(decode(payload)),
            "bulleted_list_item" => Self::BulletedListItem(decode(payload)),
            "numbered_list_item" => Self::NumberedListItem(decode(payload)),
            "to_do" => Self::ToDo(decode(payload)),
            "toggle" => Self::Toggle(decode(payload)),
            "code" => Self::Code(decode(payload)),
            "quote" => Self::Quote(decode(payload)),
            "callout" => Self::Callout(decode(payload)),
            "divider" => Self::Divider,
            "image" => Self::Image(decode(payload)),
            "bookmark" => Self::Bookmark(decode(payload)),
            "table" => Self::Table,
            "table_row" => Self::TableRow(decode(payload)),
            "child_page" => Self::ChildPage(decode(payload)),
            "child_database" => Self::ChildDatabase(decode(payload)),
            "column_list" => Self::ColumnList,
            "column" => Self::Column,
            other => {
                let TextBlock { rich_text } = decode(payload);
                Self::Unsupported {
                    type_name: other.to_string(),
                    rich_text,
                }
            }
        }
    }

    /// Get the `type` tag as a string
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Heading1(_) => "heading_1",
            Self::Heading2(_) => "heading_2",
            Self::Heading3(_) => "heading_3",
            Self::BulletedListItem(_) => "bulleted_list_item",
            Self::NumberedListItem(_) => "numbered_list_item",
            Self::ToDo(_) => "to_do",
            Self::Toggle(_) => "toggle",
            Self::Code(_) => "code",
            Self::Quote(_) => "quote",
            Self::Callout(_) => "callout",
            Self::Divider => "divider",
            Self::Image(_) => "image",
            Self::Bookmark(_) => "bookmark",
            Self::Table => "table",
            Self::TableRow(_) => "table_row",
            Self::ChildPage(_) => "child_page",
            Self::ChildDatabase(_) => "child_database",
            Self::ColumnList => "column_list",
            Self::Column => "column",
            Self::Unsupported { type_name, .. } => type_name,
        }
    }

    /// The payload's rich text, or an empty slice for payloads without one
    pub fn rich_text(&self) -> &[RichText] {
        match self {
            Self::Paragraph(t)
            | Self::Heading1(t)
            | Self::Heading2(t)
            | Self::Heading3(t)
            | Self::BulletedListItem(t)
            | Self::NumberedListItem(t)
            | Self::Toggle(t)
            | Self::Quote(t) => &t.rich_text,
            Self::ToDo(t) => &t.rich_text,
            Self::Code(c) => &c.rich_text,
            Self::Callout(c) => &c.rich_text,
            Self::Unsupported { rich_text, .. } => rich_text,
            Self::Divider
            | Self::Image(_)
            | Self::Bookmark(_)
            | Self::Table
            | Self::TableRow(_)
            | Self::ChildPage(_)
            | Self::ChildDatabase(_)
            | Self::ColumnList
            | Self::Column => &[],
        }
    }
}

/// Decode a payload, falling back to its default when it is not an object
fn decode<T: DeserializeOwned + Default>(payload: Value) -> T {
    serde_json::from_value(payload).unwrap_or_default()
}

/// Wire shape of a block before its payload is resolved
#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    block_type: String,
    #[serde(default, deserialize_with = "lenient")]
    has_children: bool,
    /// Held to the same shape as `results`: a non-object child fails the parse
    #[serde(default)]
    children: Option<Vec<Block>>,
    /// Everything else, including the payload keyed by `type`
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl From<RawBlock> for Block {
    fn from(mut raw: RawBlock) -> Self {
        let payload = raw.fields.remove(&raw.block_type).unwrap_or(Value::Null);
        Self {
            kind: BlockKind::from_payload(&raw.block_type, payload),
            has_children: raw.has_children,
            children: raw.children,
        }
    }
}

/// Payload holding only rich text (paragraph, headings, list items, toggle, quote)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextBlock {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub rich_text: Vec<RichText>,
}

impl TextBlock {
    pub fn new(rich_text: Vec<RichText>) -> Self {
        Self { rich_text }
    }
}

/// `to_do` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToDo {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub rich_text: Vec<RichText>,
    /// Default: false
    #[serde(deserialize_with = "lenient")]
    pub checked: bool,
}

/// `code` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CodeBlock {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub rich_text: Vec<RichText>,
    /// Fence info string (default: empty)
    #[serde(deserialize_with = "lenient")]
    pub language: String,
}

/// `callout` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Callout {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub rich_text: Vec<RichText>,
    /// Default: none
    #[serde(deserialize_with = "lenient")]
    pub icon: Option<Icon>,
}

impl Callout {
    /// The emoji to show, if the icon is an emoji icon
    pub fn emoji(&self) -> Option<&str> {
        self.icon
            .as_ref()
            .filter(|icon| icon.icon_type == "emoji")
            .map(|icon| icon.emoji.as_str())
    }
}

/// Page or callout icon
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Icon {
    /// `emoji`, `external`, `file`, ... (default: empty)
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub icon_type: String,
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub emoji: String,
}

/// File-like payload (`image`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Media {
    /// `external` or `file` (default: empty)
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub media_type: String,
    /// Default: none
    #[serde(deserialize_with = "lenient")]
    pub external: Option<FileUrl>,
    /// Default: none
    #[serde(deserialize_with = "lenient")]
    pub file: Option<FileUrl>,
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub caption: Vec<RichText>,
}

impl Media {
    /// Source URL chosen by the payload's `type`, or `""` if unresolvable
    pub fn source_url(&self) -> &str {
        let location = match self.media_type.as_str() {
            "external" => self.external.as_ref(),
            "file" => self.file.as_ref(),
            _ => None,
        };
        location.map(|f| f.url.as_str()).unwrap_or("")
    }
}

/// `{ "url": ... }` object used by external and hosted files
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileUrl {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub url: String,
}

/// `bookmark` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bookmark {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub url: String,
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub caption: Vec<RichText>,
}

/// `table_row` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TableRow {
    /// One rich-text run list per cell (default: empty)
    #[serde(deserialize_with = "lenient")]
    pub cells: Vec<Vec<RichText>>,
}

/// `child_page` / `child_database` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Titled {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub title: String,
}

/// An annotated run of text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RichText {
    /// Default: empty
    #[serde(deserialize_with = "lenient")]
    pub plain_text: String,
    /// Default: no annotations
    #[serde(deserialize_with = "lenient")]
    pub annotations: Annotations,
    /// Link target (default: none)
    #[serde(deserialize_with = "lenient")]
    pub href: Option<String>,
}

impl RichText {
    /// Unannotated text
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.annotations.strikethrough = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    pub fn link(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// The link target, treating an empty `href` as no link
    pub fn link_target(&self) -> Option<&str> {
        self.href.as_deref().filter(|href| !href.is_empty())
    }
}

/// Formatting flags on a rich-text run (all default to false)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Annotations {
    #[serde(deserialize_with = "lenient")]
    pub bold: bool,
    #[serde(deserialize_with = "lenient")]
    pub italic: bool,
    #[serde(deserialize_with = "lenient")]
    pub strikethrough: bool,
    /// Render as inline code
    #[serde(deserialize_with = "lenient")]
    pub code: bool,
}
