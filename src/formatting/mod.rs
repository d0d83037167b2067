// src/formatting/mod.rs
//! Renders Notion blocks into HTML and composes full pages.

mod block_mappers;
pub mod block_renderer;
pub mod markup;
pub mod page;
pub mod rich_text;

pub use block_mappers::heading_tag;
pub use block_renderer::{
    render_block, render_blocks, render_page_body, toggle_outer, Nesting, RenderContext,
};
pub use markup::MarkupNode;
pub use page::PageComposer;
pub use rich_text::{render_rich_text, rich_text_to_html};
