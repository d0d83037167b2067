// src/api/client.rs
//! Thin HTTP client for the blog content API.
//!
//! Handles request construction and response capture only. Parsing lives in
//! `parser`, conversion in `adapter`.

use super::parser;
use super::PostRepository;
use crate::constants::API_REQUEST_TIMEOUT;
use crate::error::AppError;
use crate::model::PageSnapshot;
use crate::types::{PostId, ValidatedUrl};
use reqwest::{header, Client, Response};

/// A thin wrapper around reqwest Client for content API requests.
#[derive(Clone)]
pub struct BlogHttpClient {
    client: Client,
    base: ValidatedUrl,
}

impl BlogHttpClient {
    /// Creates a client rooted at the API base URL.
    pub fn new(base: ValidatedUrl) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(API_REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    pub fn base_url(&self) -> &ValidatedUrl {
        &self.base
    }

    /// Makes a GET request to an API path such as `api/post`.
    pub async fn get(&self, path: &str) -> Result<Response, AppError> {
        let url = self.base.join_path(path);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl PostRepository for BlogHttpClient {
    async fn list_post_ids(&self) -> Result<Vec<PostId>, AppError> {
        let response = self.get("api/post").await?;
        let result = extract_response_text(response).await?;
        parser::parse_post_list(result)
    }

    async fn fetch_snapshot(&self, id: &PostId) -> Result<PageSnapshot, AppError> {
        let response = self.get(&format!("api/post/{}", id.as_str())).await?;
        let result = extract_response_text(response).await?;
        parser::parse_snapshot_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with status and URL.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
