// src/lib.rs
//! notion-blog library: renders Notion-backed blog posts to HTML and keeps
//! mounted pages fresh.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ApiErrorCode`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `SiteConfig`
//! - **Domain model**: `Block`, `PageSnapshot`, block structs, `BlockVisitor`
//! - **Domain types**: `PostId`, `BlockId`, `PageId`, `RichTextItem`, etc.
//! - **Content API**: `PostRepository`, `BlogHttpClient`, parsers
//! - **Formatting**: `render_block`, `render_blocks`, `toggle_outer`, `PageComposer`
//! - **Page view**: `PageView`, `ImageValidator`, `ExpiredImageFlag`
//! - **Static site**: `StaticSiteBuilder`, `PageArtifact`

mod analytics;
mod api;
mod config;
mod constants;
mod error;

#[cfg(feature = "bench")]
pub mod formatting;
#[cfg(not(feature = "bench"))]
mod formatting;

#[cfg(feature = "bench")]
pub mod model;
#[cfg(not(feature = "bench"))]
mod model;

mod output;
mod site;

#[cfg(feature = "bench")]
pub mod types;
#[cfg(not(feature = "bench"))]
mod types;

mod view;

// --- Error Handling ---
pub use crate::error::{ApiErrorCode, AppError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{parse_post_id, Command, CommandLineInput, SiteConfig, API_URL_ENV};
pub use crate::constants::{
    BLOCK_MAX_RENDER_DEPTH, HEADING_LEVEL_OFFSET, IMAGE_CHECK_CONCURRENCY, REFRESH_DELAY,
    REVALIDATE_INTERVAL_SECS,
};

// --- Domain Model ---
pub use crate::model::{
    extract_image_urls, extract_title, Block, BlockCommon, BlockVisitor, PageSnapshot,
    UNTITLED_PAGE,
};

// --- Block Types ---
pub use crate::model::{
    BookmarkBlock, BulletedListItemBlock, CalloutBlock, ChildPageBlock, CodeBlock, ColumnBlock,
    ColumnListBlock, DividerBlock, EmbedBlock, EquationBlock, FileObject, HeadingBlock, Icon,
    MediaBlock, NumberedListItemBlock, ParagraphBlock, QuoteBlock, TableBlock, TableRowBlock,
    TextBlockContent, ToDoBlock, ToggleBlock, UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{
    Annotations, BlockId, Color, EquationData, ImageUrl, Link, MentionKind, PageId, PostId,
    RenderedPage, RichTextItem, RichTextType, ValidatedUrl,
};

// --- Content API ---
pub use crate::api::{
    client::ApiResponse,
    parser::{parse_post_list, parse_snapshot_response},
    parse_record_map, BlogHttpClient, PostRepository,
};

// --- Formatting ---
pub use crate::formatting::{
    heading_tag, render_block, render_blocks, render_page_body, render_rich_text,
    rich_text_to_html, toggle_outer, MarkupNode, Nesting, PageComposer, RenderContext,
};

// --- Output ---
pub use crate::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};

// --- Analytics ---
pub use crate::analytics::{measure_snapshot, ContentMeasurement};

// --- Page View ---
pub use crate::view::{
    check_images, ExpiredImageFlag, HttpImageValidator, ImageValidator, PageView, ViewState,
};

// --- Static Site ---
pub use crate::site::{
    artifact_path, page_path, BuildReport, PageArtifact, PostFailure, StaticSiteBuilder,
};
