// tests/common/mod.rs
//! Shared fixtures: deterministic block constructors and in-memory fakes for
//! the content API and the image checker.

#![allow(dead_code)]

use notion_blog::{
    AppError, ApiErrorCode, Block, BlockCommon, BlockId, Color, FileObject, HeadingBlock,
    ImageUrl, ImageValidator, MediaBlock, PageId, PageSnapshot, ParagraphBlock, PostId,
    PostRepository, RichTextItem, TextBlockContent, ToggleBlock,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A block ID whose last hex digits are `n`.
pub fn block_id(n: u32) -> BlockId {
    BlockId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn page_id(n: u32) -> PageId {
    PageId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn post_id(id: &str) -> PostId {
    PostId::new(id).unwrap()
}

pub fn text(content: &str) -> TextBlockContent {
    TextBlockContent {
        rich_text: vec![RichTextItem::plain_text(content)],
        color: Color::Default,
    }
}

pub fn paragraph(n: u32, content: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::new(block_id(n)),
        content: text(content),
    })
}

pub fn heading_1(n: u32, content: &str, is_toggleable: bool, children: Vec<Block>) -> Block {
    Block::Heading1(HeadingBlock {
        common: BlockCommon::new(block_id(n)).with_children(children),
        content: text(content),
        is_toggleable,
    })
}

pub fn toggle(n: u32, content: &str, children: Vec<Block>) -> Block {
    Block::Toggle(ToggleBlock {
        common: BlockCommon::new(block_id(n)).with_children(children),
        content: text(content),
    })
}

pub fn image(n: u32, url: &str) -> Block {
    Block::Image(MediaBlock {
        common: BlockCommon::new(block_id(n)),
        source: FileObject::external(url),
        caption: vec![],
    })
}

pub fn snapshot(title: &str, blocks: Vec<Block>) -> PageSnapshot {
    PageSnapshot::new(
        page_id(0xfeed),
        vec![RichTextItem::plain_text(title)],
        None,
        blocks,
        Value::Null,
    )
}

/// A record map as `GET /api/post/{postId}` returns it.
pub fn record_map_json(title: &str, paragraph_text: &str) -> Value {
    serde_json::json!({
        "id": "0123456789abcdef0123456789abcdef",
        "title": [{
            "type": "text",
            "text": { "content": title },
            "plain_text": title
        }],
        "blocks": [{
            "id": "aaaaaaaa-0000-0000-0000-000000000001",
            "type": "paragraph",
            "has_children": false,
            "archived": false,
            "paragraph": {
                "rich_text": [{
                    "type": "text",
                    "text": { "content": paragraph_text },
                    "plain_text": paragraph_text
                }],
                "color": "default"
            }
        }]
    })
}

/// In-memory content API that records every snapshot fetch.
#[derive(Default)]
pub struct FakeRepository {
    posts: Mutex<HashMap<String, PageSnapshot>>,
    failing: Mutex<HashSet<String>>,
    list_fails: bool,
    fetches: Mutex<Vec<String>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(self, id: &str, snapshot: PageSnapshot) -> Self {
        self.posts.lock().insert(id.to_string(), snapshot);
        self
    }

    /// Listed as a post, but every fetch fails.
    pub fn with_failing_post(self, id: &str) -> Self {
        self.failing.lock().insert(id.to_string());
        self
    }

    pub fn with_failing_list(mut self) -> Self {
        self.list_fails = true;
        self
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.lock().clone()
    }
}

#[async_trait::async_trait]
impl PostRepository for FakeRepository {
    async fn list_post_ids(&self) -> Result<Vec<PostId>, AppError> {
        if self.list_fails {
            return Err(AppError::ApiService {
                code: ApiErrorCode::ServiceUnavailable,
                message: "upstream unavailable".to_string(),
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        let mut ids: Vec<String> = self.posts.lock().keys().cloned().collect();
        ids.extend(self.failing.lock().iter().cloned());
        ids.sort();
        Ok(ids.into_iter().map(|id| PostId::new(id).unwrap()).collect())
    }

    async fn fetch_snapshot(&self, id: &PostId) -> Result<PageSnapshot, AppError> {
        self.fetches.lock().push(id.to_string());
        if self.failing.lock().contains(id.as_str()) {
            return Err(AppError::ApiService {
                code: ApiErrorCode::InternalError,
                message: format!("failed to load {}", id),
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            });
        }
        self.posts
            .lock()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| AppError::ApiService {
                code: ApiErrorCode::NotFound,
                message: format!("no post {}", id),
                status: reqwest::StatusCode::NOT_FOUND,
            })
    }
}

/// Image checker that fails a fixed set of URLs and counts every check.
#[derive(Default)]
pub struct FakeImageValidator {
    broken: HashSet<String>,
    checks: AtomicUsize,
}

impl FakeImageValidator {
    pub fn with_broken(urls: &[&str]) -> Self {
        Self {
            broken: urls.iter().map(|u| u.to_string()).collect(),
            checks: AtomicUsize::new(0),
        }
    }

    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ImageValidator for FakeImageValidator {
    async fn check(&self, url: &ImageUrl) -> Result<(), AppError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.broken.contains(url.as_str()) {
            Err(AppError::ImageUnavailable {
                url: url.to_string(),
                reason: "HTTP 403".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
