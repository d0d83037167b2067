// src/formatting/rich_text/annotations.rs
//! Annotation handling for rich text.
//!
//! Converts Notion annotations into a `TextStyle` and wraps rendered content
//! in the matching HTML elements.

use super::types::TextStyle;
use crate::formatting::markup::MarkupNode;
use crate::types::{Annotations, ValidatedUrl};

/// Converts Notion annotations to a text style.
pub fn annotations_to_style(annotations: &Annotations) -> TextStyle {
    TextStyle {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
        color: annotations.color,
        link: None,
    }
}

/// Accepts absolute http(s) and mailto links and site-relative paths.
///
/// Anything else, such as `javascript:` URLs, is dropped.
pub fn sanitize_href(href: &str) -> Option<String> {
    let href = href.trim();
    if href.starts_with('/') && !href.starts_with("//") {
        return Some(href.to_string());
    }
    if let Some(address) = href.strip_prefix("mailto:") {
        return (!address.is_empty()).then(|| href.to_string());
    }
    ValidatedUrl::parse(href).ok().map(|url| url.as_str().to_string())
}

/// Wraps content in HTML elements for each style.
pub struct HtmlStyleRenderer;

impl HtmlStyleRenderer {
    /// Nesting order from the inside out: code, s, strong, em, u, color span, link.
    pub fn apply_styles(content: MarkupNode, style: &TextStyle) -> MarkupNode {
        let mut result = content;

        if style.code {
            result = MarkupNode::element("code").child(result);
        }

        if style.strikethrough {
            result = MarkupNode::element("s").child(result);
        }

        if style.bold {
            result = MarkupNode::element("strong").child(result);
        }

        if style.italic {
            result = MarkupNode::element("em").child(result);
        }

        if style.underline {
            result = MarkupNode::element("u").child(result);
        }

        if let Some(class) = style.color.css_class() {
            result = MarkupNode::element("span").attr("class", class).child(result);
        }

        if let Some(url) = &style.link {
            result = MarkupNode::element("a").attr("href", url.as_str()).child(result);
        }

        result
    }
}
