// src/api/responses.rs
//! Wire types for the content API.
//!
//! Block objects follow Notion's shape: an envelope with `id` and `type`, plus
//! a payload keyed by the type name. Payload fields are all optional here so a
//! single struct covers every block kind; the adapter picks what each kind needs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of `GET /api/post`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRef {
    pub id: String,
}

/// Body of `GET /api/post/{postId}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMapResponse {
    pub id: String,
    #[serde(default)]
    pub title: Vec<WireRichText>,
    #[serde(default)]
    pub cover: Option<WireFile>,
    #[serde(default)]
    pub blocks: Vec<WireBlock>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(default)]
    pub archived: bool,
    /// Everything else, including the type-keyed payload.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl WireBlock {
    /// The payload object keyed by this block's type, if present.
    pub fn payload(&self) -> Option<&Value> {
        self.rest.get(&self.block_type)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireBlockPayload {
    pub rich_text: Vec<WireRichText>,
    pub color: Option<String>,
    pub is_toggleable: bool,
    pub checked: bool,
    pub language: Option<String>,
    pub caption: Vec<WireRichText>,
    pub expression: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub icon: Option<WireIcon>,
    pub external: Option<WireExternal>,
    pub file: Option<WireHostedFile>,
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
    pub cells: Vec<Vec<WireRichText>>,
    pub children: Vec<WireBlock>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRichText {
    #[serde(rename = "type")]
    pub text_type: String,
    #[serde(default)]
    pub text: Option<WireTextContent>,
    #[serde(default)]
    pub mention: Option<Value>,
    #[serde(default)]
    pub equation: Option<WireEquation>,
    #[serde(default)]
    pub annotations: WireAnnotations,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTextContent {
    pub content: String,
    #[serde(default)]
    pub link: Option<WireLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireLink {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEquation {
    pub expression: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WireAnnotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Option<String>,
}

/// A file object: `{ "type": "external", "external": { "url" } }` or
/// `{ "type": "file", "file": { "url", "expiry_time" } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFile {
    #[serde(rename = "type", default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub external: Option<WireExternal>,
    #[serde(default)]
    pub file: Option<WireHostedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireExternal {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireHostedFile {
    pub url: String,
    #[serde(default)]
    pub expiry_time: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireIcon {
    #[serde(rename = "type")]
    pub icon_type: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub external: Option<WireExternal>,
    #[serde(default)]
    pub file: Option<WireHostedFile>,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, crate::error::AppError>;
}

impl ToDomain<crate::model::Block> for WireBlock {
    fn to_domain(self) -> Result<crate::model::Block, crate::error::AppError> {
        super::adapter::convert_block(self)
    }
}

impl ToDomain<crate::types::RichTextItem> for WireRichText {
    fn to_domain(self) -> Result<crate::types::RichTextItem, crate::error::AppError> {
        Ok(super::adapter::convert_rich_text(self))
    }
}
