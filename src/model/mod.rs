mod block;
pub mod blocks;
pub mod common;
mod snapshot;

pub use block::{Block, BlockVisitor};
pub use blocks::*;
pub use common::*;
pub use snapshot::{extract_image_urls, extract_title, PageSnapshot, UNTITLED_PAGE};
