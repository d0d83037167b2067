// src/formatting/block_mappers.rs
//! One mapper per block kind.
//!
//! Every mapper is a pure function of the block, its depth and the render
//! context. Block wrappers carry `data-depth` so nesting is visible in the
//! output.

use super::block_renderer::{render_children, toggle_outer, Nesting, RenderContext};
use super::markup::MarkupNode;
use super::rich_text::{render_rich_text, sanitize_href};
use crate::constants::HEADING_LEVEL_OFFSET;
use crate::model::*;
use crate::types::{plain_text_of, Color, RichTextItem};

// --- Shared pieces ---

/// The outer element of a block: `<tag class="block {kind} [color]" data-depth=d>`.
fn block_wrapper(tag: &'static str, kind: &str, color: Color, depth: usize) -> MarkupNode {
    let class = match color.css_class() {
        Some(color_class) => format!("block {} {}", kind, color_class),
        None => format!("block {}", kind),
    };
    MarkupNode::element(tag)
        .attr("class", class)
        .attr("data-depth", depth.to_string())
}

fn spans(rich_text: &[RichTextItem]) -> Vec<MarkupNode> {
    render_rich_text(rich_text)
}

fn caption(items: &[RichTextItem]) -> Option<MarkupNode> {
    if items.is_empty() {
        return None;
    }
    Some(MarkupNode::element("figcaption").children(spans(items)))
}

fn with_caption(node: MarkupNode, items: &[RichTextItem]) -> MarkupNode {
    match caption(items) {
        Some(caption) => node.child(caption),
        None => node,
    }
}

/// HTML heading element for a logical heading level.
pub fn heading_tag(level: u8) -> &'static str {
    match level.saturating_add(HEADING_LEVEL_OFFSET) {
        0 | 1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

// --- Text blocks ---

pub fn paragraph(block: &ParagraphBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    let label = MarkupNode::element("p").children(spans(&block.content.rich_text));
    block_wrapper("div", "paragraph", block.content.color, depth).child(toggle_outer(
        &block.common.id,
        label,
        &block.common.children,
        Nesting::Indented,
        depth,
        ctx,
    ))
}

fn heading(level: u8, block: &HeadingBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    let label = MarkupNode::element(heading_tag(level))
        .attr("id", block.common.id.as_str())
        .children(spans(&block.content.rich_text));

    // Children of a plain heading only exist while it was toggleable in Notion
    let nesting = if block.is_toggleable {
        Nesting::Collapsible
    } else {
        Nesting::Hidden
    };

    block_wrapper(
        "div",
        &format!("heading heading-{}", level),
        block.content.color,
        depth,
    )
    .child(toggle_outer(
        &block.common.id,
        label,
        &block.common.children,
        nesting,
        depth,
        ctx,
    ))
}

pub fn heading_1(block: &HeadingBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    heading(1, block, depth, ctx)
}

pub fn heading_2(block: &HeadingBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    heading(2, block, depth, ctx)
}

pub fn heading_3(block: &HeadingBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    heading(3, block, depth, ctx)
}

pub fn bulleted_list_item(
    block: &BulletedListItemBlock,
    depth: usize,
    ctx: &RenderContext,
) -> MarkupNode {
    list_item("bulleted-list-item", &block.common, &block.content, depth, ctx)
}

pub fn numbered_list_item(
    block: &NumberedListItemBlock,
    depth: usize,
    ctx: &RenderContext,
) -> MarkupNode {
    list_item("numbered-list-item", &block.common, &block.content, depth, ctx)
}

fn list_item(
    kind: &str,
    common: &BlockCommon,
    content: &TextBlockContent,
    depth: usize,
    ctx: &RenderContext,
) -> MarkupNode {
    let label = MarkupNode::Fragment(spans(&content.rich_text));
    block_wrapper("li", kind, content.color, depth).child(toggle_outer(
        &common.id,
        label,
        &common.children,
        Nesting::Indented,
        depth,
        ctx,
    ))
}

pub fn to_do(block: &ToDoBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    let text_class = if block.checked {
        "to-do-text checked"
    } else {
        "to-do-text"
    };
    let label = MarkupNode::element("label")
        .child(
            MarkupNode::element("input")
                .attr("type", "checkbox")
                .flag("disabled", true)
                .flag("checked", block.checked),
        )
        .child(
            MarkupNode::element("span")
                .attr("class", text_class)
                .children(spans(&block.content.rich_text)),
        );

    block_wrapper("div", "to-do", block.content.color, depth).child(toggle_outer(
        &block.common.id,
        label,
        &block.common.children,
        Nesting::Indented,
        depth,
        ctx,
    ))
}

pub fn toggle(block: &ToggleBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    let label = MarkupNode::element("span")
        .attr("class", "toggle-label")
        .children(spans(&block.content.rich_text));
    block_wrapper("div", "toggle-block", block.content.color, depth).child(toggle_outer(
        &block.common.id,
        label,
        &block.common.children,
        Nesting::Collapsible,
        depth,
        ctx,
    ))
}

pub fn quote(block: &QuoteBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    let label = MarkupNode::Fragment(spans(&block.content.rich_text));
    block_wrapper("blockquote", "quote", block.content.color, depth).child(toggle_outer(
        &block.common.id,
        label,
        &block.common.children,
        Nesting::Indented,
        depth,
        ctx,
    ))
}

pub fn callout(block: &CalloutBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    let icon = match &block.icon {
        Some(Icon::Emoji(emoji)) => Some(MarkupNode::text(emoji.as_str())),
        Some(Icon::Image(file)) => sanitize_href(file.url()).map(|src| {
            MarkupNode::element("img")
                .attr("src", src)
                .attr("alt", "")
                .attr("loading", "lazy")
        }),
        None => None,
    };

    let mut wrapper = block_wrapper("div", "callout", block.content.color, depth);
    if let Some(icon) = icon {
        wrapper = wrapper.child(
            MarkupNode::element("span")
                .attr("class", "callout-icon")
                .child(icon),
        );
    }

    let label = MarkupNode::element("div")
        .attr("class", "callout-content")
        .children(spans(&block.content.rich_text));
    wrapper.child(toggle_outer(
        &block.common.id,
        label,
        &block.common.children,
        Nesting::Indented,
        depth,
        ctx,
    ))
}

// --- Code and equations ---

/// Normalizes a Notion language name into a `language-*` class suffix.
fn language_class(language: &str) -> String {
    let slug: String = language
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '+' || c == '#' { c } else { '-' })
        .collect();
    format!("language-{}", slug)
}

pub fn code(block: &CodeBlock, depth: usize) -> MarkupNode {
    let source = plain_text_of(&block.content.rich_text);
    let pre = MarkupNode::element("pre").child(
        MarkupNode::element("code")
            .attr("class", language_class(&block.language))
            .child(MarkupNode::text(source)),
    );
    with_caption(
        block_wrapper("div", "code", Color::Default, depth).child(pre),
        &block.caption,
    )
}

pub fn equation(block: &EquationBlock, depth: usize) -> MarkupNode {
    block_wrapper("div", "equation", Color::Default, depth).child(
        MarkupNode::element("span")
            .attr("class", "equation")
            .child(MarkupNode::text(block.expression.as_str())),
    )
}

pub fn divider(_block: &DividerBlock, depth: usize) -> MarkupNode {
    block_wrapper("hr", "divider", Color::Default, depth)
}

// --- Media ---

/// File name shown for a file link: caption text, else the URL's last path segment.
fn file_label(block: &MediaBlock) -> String {
    let caption = plain_text_of(&block.caption);
    if !caption.trim().is_empty() {
        return caption;
    }
    let url = block.source.url();
    let path = url.split(|c| c == '?' || c == '#').next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(url)
        .to_string()
}

pub fn image(block: &MediaBlock, depth: usize) -> MarkupNode {
    // Image URLs are used exactly as the API returned them
    let img = MarkupNode::element("img")
        .attr("src", block.source.url())
        .attr("alt", plain_text_of(&block.caption))
        .attr("loading", "lazy");
    with_caption(
        block_wrapper("figure", "image", Color::Default, depth).child(img),
        &block.caption,
    )
}

pub fn video(block: &MediaBlock, depth: usize) -> MarkupNode {
    let video = match sanitize_href(block.source.url()) {
        Some(src) => MarkupNode::element("video")
            .attr("src", src)
            .flag("controls", true)
            .attr("preload", "metadata"),
        None => MarkupNode::text(file_label(block)),
    };
    with_caption(
        block_wrapper("figure", "video", Color::Default, depth).child(video),
        &block.caption,
    )
}

fn file_link(kind: &str, block: &MediaBlock, depth: usize) -> MarkupNode {
    let label = MarkupNode::text(file_label(block));
    let link = match sanitize_href(block.source.url()) {
        Some(href) => MarkupNode::element("a")
            .attr("class", "file-link")
            .attr("href", href)
            .child(label),
        None => label,
    };
    block_wrapper("div", kind, Color::Default, depth).child(link)
}

pub fn file(block: &MediaBlock, depth: usize) -> MarkupNode {
    file_link("file", block, depth)
}

pub fn pdf(block: &MediaBlock, depth: usize) -> MarkupNode {
    file_link("pdf", block, depth)
}

pub fn bookmark(block: &BookmarkBlock, depth: usize) -> MarkupNode {
    let text = MarkupNode::text(block.url.as_str());
    let link = match sanitize_href(&block.url) {
        Some(href) => MarkupNode::element("a")
            .attr("class", "bookmark-link")
            .attr("href", href)
            .child(text),
        None => text,
    };
    with_caption(
        block_wrapper("div", "bookmark", Color::Default, depth).child(link),
        &block.caption,
    )
}

pub fn embed(block: &EmbedBlock, depth: usize) -> MarkupNode {
    let wrapper = block_wrapper("div", "embed", Color::Default, depth);
    match sanitize_href(&block.url) {
        Some(src) if !src.starts_with('/') => wrapper.child(
            MarkupNode::element("iframe")
                .attr("src", src)
                .attr("loading", "lazy"),
        ),
        _ => wrapper.child(MarkupNode::text(block.url.as_str())),
    }
}

pub fn child_page(block: &ChildPageBlock, depth: usize) -> MarkupNode {
    block_wrapper("div", "child-page", Color::Default, depth).child(
        MarkupNode::element("a")
            .attr("href", format!("/{}", block.page_id.as_str()))
            .child(MarkupNode::text(block.title.as_str())),
    )
}

// --- Tables ---

fn table_cells(cells: &[Vec<RichTextItem>], header_row: bool, row_header: bool) -> MarkupNode {
    let cells = cells.iter().enumerate().map(|(i, cell)| {
        let tag = if header_row || (row_header && i == 0) {
            "th"
        } else {
            "td"
        };
        MarkupNode::element(tag).children(spans(cell))
    });
    MarkupNode::element("tr").children(cells)
}

pub fn table(block: &TableBlock, depth: usize) -> MarkupNode {
    let rows = block
        .common
        .children
        .iter()
        .filter_map(|child| match child {
            Block::TableRow(row) => Some(row),
            _ => None,
        })
        .enumerate()
        .map(|(i, row)| {
            table_cells(
                &row.cells,
                block.has_column_header && i == 0,
                block.has_row_header,
            )
        });

    block_wrapper("div", "table", Color::Default, depth)
        .child(MarkupNode::element("table").child(MarkupNode::element("tbody").children(rows)))
}

pub fn table_row(block: &TableRowBlock) -> MarkupNode {
    table_cells(&block.cells, false, false)
}

// --- Layout ---

pub fn column_list(block: &ColumnListBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    block_wrapper("div", "column-list", Color::Default, depth)
        .child(render_children(&block.common.children, depth + 1, ctx))
}

pub fn column(block: &ColumnBlock, depth: usize, ctx: &RenderContext) -> MarkupNode {
    block_wrapper("div", "column", Color::Default, depth)
        .child(render_children(&block.common.children, depth + 1, ctx))
}

pub fn unsupported(block: &UnsupportedBlock, depth: usize) -> MarkupNode {
    log::debug!(
        "Rendering placeholder for unsupported block type '{}'",
        block.block_type
    );
    block_wrapper("div", "unsupported", Color::Default, depth)
        .attr("data-block-type", block.block_type.as_str())
}

