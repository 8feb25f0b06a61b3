//! Rich text to inline Markdown

use notion_blocks::RichText;

/// Render a sequence of rich-text runs as inline Markdown
///
/// Runs are concatenated with no separator. An empty slice renders as `""`.
pub fn render_rich_text(spans: &[RichText]) -> String {
    spans.iter().map(render_span).collect()
}

/// Render a single rich-text run
///
/// Markup nests in a fixed order regardless of which annotations are set:
/// code innermost, then bold, italic, strikethrough, and the link outermost.
pub fn render_span(span: &RichText) -> String {
    let a = &span.annotations;
    let mut content = span.plain_text.clone();

    if a.code {
        content = format!("`{}`", content);
    }
    if a.bold {
        content = format!("**{}**", content);
    }
    if a.italic {
        content = format!("*{}*", content);
    }
    if a.strikethrough {
        content = format!("~~{}~~", content);
    }
    if let Some(href) = span.link_target() {
        content = format!("[{}]({})", content, href);
    }

    content
}
