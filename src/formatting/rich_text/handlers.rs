// src/formatting/rich_text/handlers.rs
//! Mention handling: turns each mention kind into displayable content.

use super::types::MentionContent;
use crate::types::MentionKind;

/// Resolves a mention to what the reader sees.
///
/// `plain_text` is Notion's own rendering of the mention and is used as the
/// label wherever the mention data has none.
pub fn handle_mention(mention: &MentionKind, plain_text: &str) -> MentionContent {
    match mention {
        MentionKind::User { name } => MentionContent::User {
            name: if name.is_empty() {
                plain_text.trim_start_matches('@').to_string()
            } else {
                name.clone()
            },
        },
        MentionKind::Page { id } => MentionContent::Page {
            href: format!("/{}", id.as_str()),
            title: plain_text.to_string(),
        },
        MentionKind::Date { start, end } => MentionContent::Date {
            datetime: start.clone(),
            text: if plain_text.is_empty() {
                match end {
                    Some(end) => format!("{} → {}", start, end),
                    None => start.clone(),
                }
            } else {
                plain_text.to_string()
            },
        },
        MentionKind::Link { url } => MentionContent::Link {
            url: url.clone(),
            text: if plain_text.is_empty() {
                url.clone()
            } else {
                plain_text.to_string()
            },
        },
        MentionKind::Other(_) => MentionContent::Plain(plain_text.to_string()),
    }
}
