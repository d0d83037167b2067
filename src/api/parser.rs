// src/api/parser.rs
//! Response parsing: status handling, error bodies, and record maps.

use super::adapter::convert_record_map;
use super::client::ApiResponse;
use super::responses::{ApiErrorBody, PostRef, RecordMapResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{ApiErrorCode, AppError};
use crate::model::PageSnapshot;
use crate::types::PostId;
use reqwest::StatusCode;
use serde_json::Value;

/// Parse any API response, turning non-2xx statuses into `AppError::ApiService`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_body(&result.data, &result.url)
    } else {
        parse_error(&result.data, result.status, &result.url)
    }
}

fn parse_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error<T>(body: &str, status: StatusCode, url: &str) -> Result<T, AppError> {
    if let Ok(error) = serde_json::from_str::<ApiErrorBody>(body) {
        return Err(AppError::ApiService {
            code: ApiErrorCode::from_api_response(&error.code),
            message: error.message,
            status,
        });
    }

    // Fallback to generic error with HTTP status code
    Err(AppError::ApiService {
        code: ApiErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    })
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Parse the `GET /api/post` response into validated post IDs.
///
/// Entries whose ID cannot name a page are logged and skipped.
pub fn parse_post_list(result: ApiResponse<String>) -> Result<Vec<PostId>, AppError> {
    let refs: Vec<PostRef> = parse_api_response(result)?;
    let ids = refs
        .into_iter()
        .filter_map(|r| match PostId::new(r.id.as_str()) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Skipping post '{}' from the listing: {}", r.id, e);
                None
            }
        })
        .collect();
    Ok(ids)
}

/// Parse the `GET /api/post/{postId}` response into a snapshot.
pub fn parse_snapshot_response(result: ApiResponse<String>) -> Result<PageSnapshot, AppError> {
    let raw: Value = parse_api_response(result)?;
    parse_record_map(raw)
}

/// Build a snapshot from a record map value, such as one stored in a build artifact.
pub fn parse_record_map(raw: Value) -> Result<PageSnapshot, AppError> {
    let response: RecordMapResponse = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::MalformedResponse(format!("Invalid record map: {}", e)))?;
    convert_record_map(response, raw)
}
