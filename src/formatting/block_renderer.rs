// src/formatting/block_renderer.rs
//! Block rendering engine: converts Notion blocks to markup.
//!
//! `render_block` dispatches on the block variant to one mapper per kind.
//! Mappers that have nested content hand their children to `toggle_outer`,
//! which decides whether the children are collapsible, plainly indented, or
//! not shown at all.

use super::block_mappers as mappers;
use super::markup::MarkupNode;
use crate::constants::BLOCK_MAX_RENDER_DEPTH;
use crate::model::{Block, PageSnapshot};
use crate::types::BlockId;
use std::collections::HashSet;

// --- Core Types ---

/// Options that apply to a whole render pass.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    expand_all: bool,
    expanded: HashSet<BlockId>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every collapsible block renders open.
    pub fn expand_all() -> Self {
        Self {
            expand_all: true,
            expanded: HashSet::new(),
        }
    }

    /// Render the collapsible block `id` open.
    pub fn with_expanded(mut self, id: BlockId) -> Self {
        self.expanded.insert(id);
        self
    }

    pub fn is_expanded(&self, id: &BlockId) -> bool {
        self.expand_all || self.expanded.contains(id)
    }
}

/// How a block presents its nested children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Children sit behind a disclosure control.
    Collapsible,
    /// Children follow the label, indented, with no control.
    Indented,
    /// Children are not rendered.
    Hidden,
}

// --- Public API ---

/// Renders one block at `depth`.
pub fn render_block(block: &Block, depth: usize, ctx: &RenderContext) -> MarkupNode {
    match block {
        Block::Paragraph(b) => mappers::paragraph(b, depth, ctx),
        Block::Heading1(b) => mappers::heading_1(b, depth, ctx),
        Block::Heading2(b) => mappers::heading_2(b, depth, ctx),
        Block::Heading3(b) => mappers::heading_3(b, depth, ctx),
        Block::BulletedListItem(b) => mappers::bulleted_list_item(b, depth, ctx),
        Block::NumberedListItem(b) => mappers::numbered_list_item(b, depth, ctx),
        Block::ToDo(b) => mappers::to_do(b, depth, ctx),
        Block::Toggle(b) => mappers::toggle(b, depth, ctx),
        Block::Quote(b) => mappers::quote(b, depth, ctx),
        Block::Callout(b) => mappers::callout(b, depth, ctx),
        Block::Code(b) => mappers::code(b, depth),
        Block::Equation(b) => mappers::equation(b, depth),
        Block::Divider(b) => mappers::divider(b, depth),
        Block::Image(b) => mappers::image(b, depth),
        Block::Video(b) => mappers::video(b, depth),
        Block::File(b) => mappers::file(b, depth),
        Block::Pdf(b) => mappers::pdf(b, depth),
        Block::Bookmark(b) => mappers::bookmark(b, depth),
        Block::Embed(b) => mappers::embed(b, depth),
        Block::ChildPage(b) => mappers::child_page(b, depth),
        Block::Table(b) => mappers::table(b, depth),
        Block::TableRow(b) => mappers::table_row(b),
        Block::ColumnList(b) => mappers::column_list(b, depth, ctx),
        Block::Column(b) => mappers::column(b, depth, ctx),
        Block::Unsupported(b) => mappers::unsupported(b, depth),
    }
}

/// Renders sibling blocks at `depth`.
///
/// Consecutive bulleted items are grouped into one `<ul>` and consecutive
/// numbered items into one `<ol>`.
pub fn render_blocks<'a>(
    blocks: impl IntoIterator<Item = &'a Block>,
    depth: usize,
    ctx: &RenderContext,
) -> MarkupNode {
    let mut iter = blocks.into_iter().peekable();
    let mut nodes = Vec::with_capacity(iter.size_hint().0);

    while let Some(block) = iter.next() {
        let list_tag = match block {
            Block::BulletedListItem(_) => "ul",
            Block::NumberedListItem(_) => "ol",
            _ => {
                nodes.push(render_block(block, depth, ctx));
                continue;
            }
        };

        let kind = std::mem::discriminant(block);
        let mut items = vec![render_block(block, depth, ctx)];
        while let Some(next) = iter.next_if(|next| std::mem::discriminant(*next) == kind) {
            items.push(render_block(next, depth, ctx));
        }

        let class = if list_tag == "ul" {
            "bulleted-list"
        } else {
            "numbered-list"
        };
        nodes.push(
            MarkupNode::element(list_tag)
                .attr("class", class)
                .attr("data-depth", depth.to_string())
                .children(items),
        );
    }

    MarkupNode::Fragment(nodes)
}

/// Renders a label together with a block's children according to `nesting`.
///
/// `depth` is the depth of the block that owns the label; children render
/// one level deeper.
pub fn toggle_outer(
    id: &BlockId,
    label: MarkupNode,
    children: &[Block],
    nesting: Nesting,
    depth: usize,
    ctx: &RenderContext,
) -> MarkupNode {
    match nesting {
        Nesting::Collapsible => MarkupNode::element("details")
            .attr("class", "toggle")
            .attr("data-depth", depth.to_string())
            .flag("open", ctx.is_expanded(id))
            .child(MarkupNode::element("summary").child(label))
            .child(
                MarkupNode::element("div")
                    .attr("class", "toggle-children")
                    .child(render_children(children, depth + 1, ctx)),
            ),
        Nesting::Indented if children.is_empty() => label,
        Nesting::Indented => MarkupNode::Fragment(vec![
            label,
            MarkupNode::element("div")
                .attr("class", "block-children")
                .child(render_children(children, depth + 1, ctx)),
        ]),
        Nesting::Hidden => label,
    }
}

/// Renders children at `depth`, dropping them past the render depth limit.
pub(crate) fn render_children(children: &[Block], depth: usize, ctx: &RenderContext) -> MarkupNode {
    if children.is_empty() {
        return MarkupNode::empty();
    }
    if depth > BLOCK_MAX_RENDER_DEPTH {
        log::warn!(
            "Dropping {} block(s) nested deeper than {} levels",
            children.len(),
            BLOCK_MAX_RENDER_DEPTH
        );
        return MarkupNode::empty();
    }
    render_blocks(children, depth, ctx)
}

// --- Page-Level Rendering ---

/// Renders every top-level block of a snapshot into the page body.
pub fn render_page_body(snapshot: &PageSnapshot, ctx: &RenderContext) -> MarkupNode {
    log::debug!(
        "Rendering {} top-level blocks of page {}",
        snapshot.block_count(),
        snapshot.page_id()
    );
    MarkupNode::element("article")
        .attr("class", "notion-page")
        .child(render_blocks(snapshot.blocks(), 0, ctx))
}
