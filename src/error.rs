// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names what went wrong and where, so callers can decide
//! whether a failure is fatal (the post list), local to one post (a snapshot
//! fetch during a build), or merely logged (a refresh or an image check).

use std::fmt;
use thiserror::Error;

/// Error codes reported by the blog content API.
///
/// The API answers failures with a `{ "code", "message" }` body. When the body
/// is missing or unparseable the HTTP status is classified instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// The post does not exist or is not published
    NotFound,
    /// The request was malformed (bad post ID, bad query)
    BadRequest,
    /// The API rejected the integration's credentials
    Unauthorized,
    /// The upstream Notion API is rate limiting the content API
    RateLimited,
    /// The content API failed internally
    InternalError,
    /// The content API or Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback for statuses without a dedicated variant
    HttpStatus(u16),
    /// An error code this client doesn't recognize
    Unknown(String),
}

impl ApiErrorCode {
    /// Parse an error code string from an API error body.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "not_found" | "object_not_found" => Self::NotFound,
            "bad_request" | "validation_error" => Self::BadRequest,
            "unauthorized" => Self::Unauthorized,
            "rate_limited" => Self::RateLimited,
            "internal_error" | "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Classify a bare HTTP status when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 | 403 => Self::Unauthorized,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500 => Self::InternalError,
            502..=504 => Self::ServiceUnavailable,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error means the post simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RateLimited => write!(f, "rate_limited"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Content API returned an error ({code}): {message}")]
    ApiService {
        code: ApiErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template file not found at {path}: {source}")]
    TemplateNotFound {
        path: String,
        source: std::io::Error,
    },

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error("Image {url} failed to load: {reason}")]
    ImageUnavailable { url: String, reason: String },

    #[error("Output delivery failed: {}", failures.join(", "))]
    DeliveryFailed { failures: Vec<String> },

    #[error("Build finished with {} failed post(s): {}", failed.len(), failed.join(", "))]
    PartialBuild { failed: Vec<String> },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether the content API reported that the requested post doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ApiService { code, .. } if code.is_not_found())
    }
}

// Allow converting from anyhow::Error, preserving the message
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError {
            message: "Background task failed".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_from_body() {
        assert_eq!(ApiErrorCode::from_api_response("not_found"), ApiErrorCode::NotFound);
        assert_eq!(
            ApiErrorCode::from_api_response("teapot"),
            ApiErrorCode::Unknown("teapot".to_string())
        );
    }

    #[test]
    fn test_error_code_from_status() {
        assert!(ApiErrorCode::from_http_status(404).is_not_found());
        assert_eq!(
            ApiErrorCode::from_http_status(503),
            ApiErrorCode::ServiceUnavailable
        );
        assert_eq!(ApiErrorCode::from_http_status(418), ApiErrorCode::HttpStatus(418));
        assert_eq!(ApiErrorCode::from_http_status(418).to_string(), "http_418");
    }

    #[test]
    fn test_app_error_not_found() {
        let err = AppError::ApiService {
            code: ApiErrorCode::NotFound,
            message: "no such post".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert!(err.is_not_found());
        assert!(!AppError::MalformedResponse("x".to_string()).is_not_found());
    }
}
