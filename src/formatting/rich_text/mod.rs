// src/formatting/rich_text/mod.rs
//! Renders Notion rich text spans to markup.
//!
//! Each span is first turned into a structured `TextSegment` (content plus
//! style) and then rendered, so the two steps can be tested separately.

mod annotations;
mod handlers;
mod types;

pub use annotations::{annotations_to_style, sanitize_href, HtmlStyleRenderer};
pub use types::{MentionContent, TextContent, TextSegment, TextStyle};

use super::markup::MarkupNode;
use crate::types::{Link, RichTextItem, RichTextType};
use handlers::handle_mention;

/// Renders spans in input order, one node per non-empty span.
pub fn render_rich_text(items: &[RichTextItem]) -> Vec<MarkupNode> {
    items
        .iter()
        .filter_map(format_single_item)
        .map(|segment| render_segment(&segment))
        .collect()
}

/// Structured form of one span, or `None` when it has nothing to show.
pub fn format_single_item(item: &RichTextItem) -> Option<TextSegment> {
    let mut style = annotations_to_style(&item.annotations);

    if let Some(href) = &item.href {
        style.link = sanitize_href(href);
    }

    let content = match &item.text_type {
        RichTextType::Text { content, link } => {
            if let Some(Link { url }) = link {
                if let Some(url) = sanitize_href(url) {
                    style.link = Some(url);
                }
            }
            TextContent::Plain(content.clone())
        }
        RichTextType::Equation(equation) => {
            // The equation element is its own presentation
            style.link = None;
            TextContent::Equation(equation.expression.clone())
        }
        RichTextType::Mention(mention) => {
            let content = handle_mention(mention, &item.plain_text);
            if matches!(content, MentionContent::Page { .. } | MentionContent::Link { .. }) {
                style.link = None;
            }
            TextContent::Mention(content)
        }
    };

    let segment = TextSegment { content, style };
    (!segment.is_empty()).then_some(segment)
}

fn render_segment(segment: &TextSegment) -> MarkupNode {
    let content = match &segment.content {
        TextContent::Plain(text) => MarkupNode::text(text.as_str()),
        TextContent::Equation(expression) => MarkupNode::element("span")
            .attr("class", "equation")
            .child(MarkupNode::text(expression.as_str())),
        TextContent::Mention(mention) => render_mention(mention),
    };
    HtmlStyleRenderer::apply_styles(content, &segment.style)
}

fn render_mention(mention: &MentionContent) -> MarkupNode {
    match mention {
        MentionContent::User { name } => MarkupNode::element("span")
            .attr("class", "mention mention-user")
            .child(MarkupNode::text(format!("@{}", name))),
        MentionContent::Page { href, title } => MarkupNode::element("a")
            .attr("class", "mention mention-page")
            .attr("href", href.as_str())
            .child(MarkupNode::text(title.as_str())),
        MentionContent::Date { datetime, text } => MarkupNode::element("time")
            .attr("datetime", datetime.as_str())
            .child(MarkupNode::text(text.as_str())),
        MentionContent::Link { url, text } => match sanitize_href(url) {
            Some(href) => MarkupNode::element("a")
                .attr("class", "mention mention-link")
                .attr("href", href)
                .child(MarkupNode::text(text.as_str())),
            None => MarkupNode::text(text.as_str()),
        },
        MentionContent::Plain(text) => MarkupNode::text(text.as_str()),
    }
}

/// Renders spans straight to an HTML string.
pub fn rich_text_to_html(items: &[RichTextItem]) -> String {
    render_rich_text(items)
        .iter()
        .map(MarkupNode::to_html)
        .collect()
}
