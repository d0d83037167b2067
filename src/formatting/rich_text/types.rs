// src/formatting/rich_text/types.rs
//! Structured representation of formatted rich text, kept apart from rendering.

use crate::types::Color;

/// A single span ready to render: what it says plus how it looks.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSegment {
    pub content: TextContent,
    pub style: TextStyle,
}

impl TextSegment {
    pub fn is_empty(&self) -> bool {
        match &self.content {
            TextContent::Plain(text) => text.is_empty(),
            TextContent::Equation(expression) => expression.is_empty(),
            TextContent::Mention(mention) => mention.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextContent {
    Plain(String),
    /// An inline equation, kept as its source expression.
    Equation(String),
    Mention(MentionContent),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MentionContent {
    User { name: String },
    /// A link to another page of the blog.
    Page { href: String, title: String },
    Date { datetime: String, text: String },
    Link { url: String, text: String },
    Plain(String),
}

impl MentionContent {
    pub fn is_empty(&self) -> bool {
        match self {
            MentionContent::User { name } => name.is_empty(),
            MentionContent::Page { title, .. } => title.is_empty(),
            MentionContent::Date { text, .. } => text.is_empty(),
            MentionContent::Link { text, url } => text.is_empty() && url.is_empty(),
            MentionContent::Plain(text) => text.is_empty(),
        }
    }
}

/// Inline styling of a span.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
    /// Sanitized link target.
    pub link: Option<String>,
}

impl TextStyle {
    pub fn has_styling(&self) -> bool {
        self.bold
            || self.italic
            || self.strikethrough
            || self.underline
            || self.code
            || self.color != Color::Default
            || self.link.is_some()
    }
}
