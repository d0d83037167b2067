// src/api/mod.rs
//! Content API interaction: the ability to list posts and fetch their record maps.
//!
//! I/O (`client`), parsing (`parser`) and wire-to-domain conversion (`adapter`)
//! are kept apart so each can be tested on its own.

pub mod adapter;
pub mod client;
pub mod parser;
pub mod responses;

use crate::error::AppError;
use crate::model::PageSnapshot;
use crate::types::PostId;

/// The ability to retrieve blog content.
///
/// Page views and the static site builder depend on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post a build should generate a page for.
    async fn list_post_ids(&self) -> Result<Vec<PostId>, AppError>;

    /// The current record map of one post.
    async fn fetch_snapshot(&self, id: &PostId) -> Result<PageSnapshot, AppError>;
}

#[async_trait::async_trait]
impl<R: PostRepository + ?Sized> PostRepository for std::sync::Arc<R> {
    async fn list_post_ids(&self) -> Result<Vec<PostId>, AppError> {
        (**self).list_post_ids().await
    }

    async fn fetch_snapshot(&self, id: &PostId) -> Result<PageSnapshot, AppError> {
        (**self).fetch_snapshot(id).await
    }
}

pub use client::BlogHttpClient;
pub use parser::parse_record_map;
