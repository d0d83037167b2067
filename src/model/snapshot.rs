use super::blocks::{FileObject, MediaBlock};
use super::{Block, BlockVisitor};
use crate::types::{plain_text_of, BlockId, ImageUrl, PageId, RichTextItem};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// Title used when a page has no title text at all.
pub const UNTITLED_PAGE: &str = "Untitled";

/// One page's record map: metadata plus its top-level blocks in document order.
///
/// Nested blocks live inside their parents. The raw JSON the snapshot was parsed
/// from is kept so a build artifact can carry it verbatim and be re-parsed later.
/// A snapshot is never mutated; a refresh replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    page_id: PageId,
    title: Vec<RichTextItem>,
    cover: Option<FileObject>,
    blocks: IndexMap<BlockId, Block>,
    record_map: Value,
}

impl PageSnapshot {
    pub fn new(
        page_id: PageId,
        title: Vec<RichTextItem>,
        cover: Option<FileObject>,
        blocks: Vec<Block>,
        record_map: Value,
    ) -> Self {
        let blocks = blocks
            .into_iter()
            .map(|block| (block.id().clone(), block))
            .collect();
        Self {
            page_id,
            title,
            cover,
            blocks,
            record_map,
        }
    }

    pub fn page_id(&self) -> &PageId {
        &self.page_id
    }

    pub fn cover(&self) -> Option<&FileObject> {
        self.cover.as_ref()
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.values()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The JSON this snapshot was parsed from.
    pub fn record_map(&self) -> &Value {
        &self.record_map
    }
}

/// Display title of a page: the plain text of its title spans, trimmed.
pub fn extract_title(snapshot: &PageSnapshot) -> String {
    let title = plain_text_of(&snapshot.title);
    let title = title.trim();
    if title.is_empty() {
        UNTITLED_PAGE.to_string()
    } else {
        title.to_string()
    }
}

/// Every image URL a snapshot references.
///
/// The cover comes first, then image blocks in depth-first document order.
/// Duplicates keep their first position.
pub fn extract_image_urls(snapshot: &PageSnapshot) -> Vec<ImageUrl> {
    let mut collector = ImageCollector::default();

    if let Some(cover) = &snapshot.cover {
        collector.push(cover.url());
    }

    for block in snapshot.blocks() {
        block.walk(&mut |b| b.accept(&mut collector));
    }

    collector.urls.into_iter().collect()
}

#[derive(Default)]
struct ImageCollector {
    urls: IndexSet<ImageUrl>,
}

impl ImageCollector {
    fn push(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        self.urls.insert(ImageUrl::new(url));
    }
}

impl BlockVisitor for ImageCollector {
    type Output = ();

    fn visit_image(&mut self, block: &MediaBlock) {
        self.push(block.source.url());
    }
}
