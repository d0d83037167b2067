// src/api/adapter.rs
//! Adapter layer converting content API wire types into the domain model.

use super::responses::{
    RecordMapResponse, WireAnnotations, WireBlock, WireBlockPayload, WireExternal, WireFile,
    WireHostedFile, WireIcon, WireRichText,
};
use crate::error::AppError;
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::{Block, PageSnapshot};
use crate::types::{
    Annotations, BlockId, Color, EquationData, Link, MentionKind, PageId, RichTextItem,
    RichTextType,
};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashSet;

/// Block kinds with a dedicated domain variant.
static KNOWN_BLOCK_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "paragraph",
        "heading_1",
        "heading_2",
        "heading_3",
        "bulleted_list_item",
        "numbered_list_item",
        "to_do",
        "toggle",
        "quote",
        "callout",
        "code",
        "equation",
        "divider",
        "image",
        "video",
        "file",
        "pdf",
        "bookmark",
        "embed",
        "child_page",
        "table",
        "table_row",
        "column_list",
        "column",
    ]
    .into_iter()
    .collect()
});

/// Convert a record map response into a snapshot, keeping `raw` as its source JSON.
pub fn convert_record_map(
    response: RecordMapResponse,
    raw: Value,
) -> Result<PageSnapshot, AppError> {
    let page_id = PageId::parse(&response.id)?;
    let title = convert_rich_text_array(response.title);
    let cover = response.cover.and_then(convert_file);
    let blocks = response
        .blocks
        .into_iter()
        .map(convert_block)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PageSnapshot::new(page_id, title, cover, blocks, raw))
}

/// Convert a wire block and its nested children to a domain block.
pub fn convert_block(wire: WireBlock) -> Result<Block, AppError> {
    let id = BlockId::parse(&wire.id)?;

    if !KNOWN_BLOCK_TYPES.contains(wire.block_type.as_str()) {
        log::debug!("Block {} has unsupported type '{}'", id, wire.block_type);
        let mut common = BlockCommon::new(id);
        common.has_children = wire.has_children;
        common.archived = wire.archived;
        return Ok(Block::Unsupported(UnsupportedBlock {
            common,
            block_type: wire.block_type,
        }));
    }

    let payload: WireBlockPayload = match wire.payload() {
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            AppError::MalformedResponse(format!(
                "Invalid '{}' payload for block {}: {}",
                wire.block_type, id, e
            ))
        })?,
        None => WireBlockPayload::default(),
    };

    let children = payload
        .children
        .into_iter()
        .map(convert_block)
        .collect::<Result<Vec<_>, _>>()?;

    let common = BlockCommon {
        id,
        has_children: wire.has_children || !children.is_empty(),
        children,
        archived: wire.archived,
    };

    let content = TextBlockContent {
        rich_text: convert_rich_text_array(payload.rich_text),
        color: payload
            .color
            .as_deref()
            .map(Color::from_wire)
            .unwrap_or_default(),
    };

    let block = match wire.block_type.as_str() {
        "paragraph" => Block::Paragraph(ParagraphBlock { common, content }),
        "heading_1" => Block::Heading1(HeadingBlock {
            common,
            content,
            is_toggleable: payload.is_toggleable,
        }),
        "heading_2" => Block::Heading2(HeadingBlock {
            common,
            content,
            is_toggleable: payload.is_toggleable,
        }),
        "heading_3" => Block::Heading3(HeadingBlock {
            common,
            content,
            is_toggleable: payload.is_toggleable,
        }),
        "bulleted_list_item" => Block::BulletedListItem(BulletedListItemBlock { common, content }),
        "numbered_list_item" => Block::NumberedListItem(NumberedListItemBlock { common, content }),
        "to_do" => Block::ToDo(ToDoBlock {
            common,
            content,
            checked: payload.checked,
        }),
        "toggle" => Block::Toggle(ToggleBlock { common, content }),
        "quote" => Block::Quote(QuoteBlock { common, content }),
        "callout" => Block::Callout(CalloutBlock {
            common,
            icon: payload.icon.and_then(convert_icon),
            content,
        }),
        "code" => Block::Code(CodeBlock {
            common,
            language: payload.language.unwrap_or_else(|| "plain text".to_string()),
            caption: convert_rich_text_array(payload.caption),
            content,
        }),
        "equation" => Block::Equation(EquationBlock {
            common,
            expression: payload.expression.unwrap_or_default(),
        }),
        "divider" => Block::Divider(DividerBlock { common }),
        "image" | "video" | "file" | "pdf" => {
            let Some(source) = file_from_parts(payload.external, payload.file) else {
                log::warn!(
                    "{} block {} has no file source, rendering as unsupported",
                    wire.block_type,
                    common.id
                );
                return Ok(Block::Unsupported(UnsupportedBlock {
                    common,
                    block_type: wire.block_type.clone(),
                }));
            };
            let media = MediaBlock {
                common,
                source,
                caption: convert_rich_text_array(payload.caption),
            };
            match wire.block_type.as_str() {
                "image" => Block::Image(media),
                "video" => Block::Video(media),
                "file" => Block::File(media),
                _ => Block::Pdf(media),
            }
        }
        "bookmark" => Block::Bookmark(BookmarkBlock {
            common,
            url: payload.url.unwrap_or_default(),
            caption: convert_rich_text_array(payload.caption),
        }),
        "embed" => Block::Embed(EmbedBlock {
            common,
            url: payload.url.unwrap_or_default(),
        }),
        "child_page" => Block::ChildPage(ChildPageBlock {
            // A child page block's ID is the child page's ID.
            page_id: PageId::from_normalized(common.id.as_str().to_string()),
            title: payload.title.unwrap_or_default(),
            common,
        }),
        "table" => Block::Table(TableBlock {
            common,
            table_width: payload.table_width,
            has_column_header: payload.has_column_header,
            has_row_header: payload.has_row_header,
        }),
        "table_row" => Block::TableRow(TableRowBlock {
            common,
            cells: payload
                .cells
                .into_iter()
                .map(convert_rich_text_array)
                .collect(),
        }),
        "column_list" => Block::ColumnList(ColumnListBlock { common }),
        "column" => Block::Column(ColumnBlock { common }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: other.to_string(),
        }),
    };

    Ok(block)
}

/// Convert array of rich text items
pub fn convert_rich_text_array(rich_texts: Vec<WireRichText>) -> Vec<RichTextItem> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

/// Convert single rich text item
pub fn convert_rich_text(wire: WireRichText) -> RichTextItem {
    let annotations = convert_annotations(&wire.annotations);
    let plain_text = wire.plain_text;
    let href = wire.href;

    let text_type = match (wire.text_type.as_str(), wire.text, wire.equation, wire.mention) {
        ("text", Some(text), _, _) => RichTextType::Text {
            content: text.content,
            link: text.link.map(|link| Link { url: link.url }),
        },
        ("equation", _, Some(equation), _) => RichTextType::Equation(EquationData {
            expression: equation.expression,
        }),
        ("mention", _, _, Some(mention)) => {
            RichTextType::Mention(convert_mention(&mention, &plain_text, href.as_deref()))
        }
        (other, _, _, _) => {
            log::debug!("Rich text type '{}' rendered as plain text", other);
            RichTextType::Text {
                content: plain_text.clone(),
                link: None,
            }
        }
    };

    RichTextItem {
        text_type,
        annotations,
        plain_text,
        href,
    }
}

fn convert_annotations(annotations: &WireAnnotations) -> Annotations {
    Annotations {
        bold: annotations.bold,
        italic: annotations.italic,
        strikethrough: annotations.strikethrough,
        underline: annotations.underline,
        code: annotations.code,
        color: annotations
            .color
            .as_deref()
            .map(Color::from_wire)
            .unwrap_or_default(),
    }
}

fn convert_mention(mention: &Value, plain_text: &str, href: Option<&str>) -> MentionKind {
    let mention_type = mention.get("type").and_then(Value::as_str).unwrap_or_default();
    let body = mention.get(mention_type);
    let field = |name: &str| {
        body.and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    match mention_type {
        "user" => MentionKind::User {
            name: field("name").unwrap_or_else(|| plain_text.trim_start_matches('@').to_string()),
        },
        "page" => match field("id").map(|id| PageId::parse(&id)) {
            Some(Ok(id)) => MentionKind::Page { id },
            _ => MentionKind::Other(mention_type.to_string()),
        },
        "date" => match field("start") {
            Some(start) => MentionKind::Date {
                start,
                end: field("end"),
            },
            None => MentionKind::Other(mention_type.to_string()),
        },
        "link_mention" | "link_preview" => match field("href").or_else(|| field("url")) {
            Some(url) => MentionKind::Link { url },
            None => href
                .map(|url| MentionKind::Link {
                    url: url.to_string(),
                })
                .unwrap_or_else(|| MentionKind::Other(mention_type.to_string())),
        },
        other => MentionKind::Other(other.to_string()),
    }
}

/// Convert a standalone file object such as a page cover.
pub fn convert_file(file: WireFile) -> Option<FileObject> {
    file_from_parts(file.external, file.file)
}

fn file_from_parts(
    external: Option<WireExternal>,
    hosted: Option<WireHostedFile>,
) -> Option<FileObject> {
    match (external, hosted) {
        (Some(external), _) => Some(FileObject::External { url: external.url }),
        (None, Some(hosted)) => Some(FileObject::Hosted {
            url: hosted.url,
            expiry_time: hosted.expiry_time,
        }),
        (None, None) => None,
    }
}

fn convert_icon(icon: WireIcon) -> Option<Icon> {
    match icon.icon_type.as_str() {
        "emoji" => icon.emoji.map(Icon::Emoji),
        _ => file_from_parts(icon.external, icon.file).map(Icon::Image),
    }
}
