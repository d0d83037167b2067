// src/view/images.rs
//! Image liveness checks.
//!
//! Notion-hosted image URLs are signed and expire. A page that still shows an
//! old snapshot can reference URLs that no longer load; checking them lets the
//! view flag the page without touching the snapshot.

use super::latch::ExpiredImageFlag;
use crate::constants::{IMAGE_CHECK_CONCURRENCY, IMAGE_CHECK_TIMEOUT};
use crate::error::AppError;
use crate::types::ImageUrl;
use futures::stream::{self, StreamExt};
use reqwest::{header, Client};
use std::sync::Arc;

/// The ability to tell whether an image still loads.
#[async_trait::async_trait]
pub trait ImageValidator: Send + Sync {
    async fn check(&self, url: &ImageUrl) -> Result<(), AppError>;
}

/// Checks images over HTTP with a one-byte ranged GET.
///
/// Signed storage URLs are usually only valid for GET, so HEAD is not used.
#[derive(Clone)]
pub struct HttpImageValidator {
    client: Client,
}

impl HttpImageValidator {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder().timeout(IMAGE_CHECK_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ImageValidator for HttpImageValidator {
    async fn check(&self, url: &ImageUrl) -> Result<(), AppError> {
        let response = self
            .client
            .get(url.as_str())
            .header(header::RANGE, "bytes=0-0")
            .send()
            .await
            .map_err(|e| AppError::ImageUnavailable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::ImageUnavailable {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            })
        }
    }
}

/// Checks every URL, at most `IMAGE_CHECK_CONCURRENCY` at a time, marking
/// `flag` for each failure. Returns the number of failed images.
pub async fn check_images(
    validator: Arc<dyn ImageValidator>,
    urls: Vec<ImageUrl>,
    flag: ExpiredImageFlag,
) -> usize {
    let total = urls.len();
    let mut checks = stream::iter(urls)
        .map(|url| {
            let validator = Arc::clone(&validator);
            async move {
                let result = validator.check(&url).await;
                (url, result)
            }
        })
        .buffer_unordered(IMAGE_CHECK_CONCURRENCY);

    let mut failures = 0;
    while let Some((url, result)) = checks.next().await {
        if let Err(e) = result {
            failures += 1;
            log::warn!("Image failed to load: {} ({})", url, e);
            if flag.mark_expired() {
                log::info!("Page marked as having expired images");
            }
        }
    }

    log::debug!("Checked {} image(s), {} failed", total, failures);
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FailingSet(HashSet<&'static str>);

    #[async_trait::async_trait]
    impl ImageValidator for FailingSet {
        async fn check(&self, url: &ImageUrl) -> Result<(), AppError> {
            if self.0.contains(url.as_str()) {
                Err(AppError::ImageUnavailable {
                    url: url.to_string(),
                    reason: "gone".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn urls(list: &[&str]) -> Vec<ImageUrl> {
        list.iter().map(|u| ImageUrl::new(*u)).collect()
    }

    #[tokio::test]
    async fn test_two_failures_set_flag_once() {
        let validator: Arc<dyn ImageValidator> =
            Arc::new(FailingSet(["https://img/a", "https://img/c"].into_iter().collect()));
        let flag = ExpiredImageFlag::new();

        let failures = check_images(
            validator,
            urls(&["https://img/a", "https://img/b", "https://img/c"]),
            flag.clone(),
        )
        .await;

        assert_eq!(failures, 2);
        assert!(flag.is_expired());
        // Already set by the checks above
        assert!(!flag.mark_expired());
    }

    #[tokio::test]
    async fn test_all_images_load() {
        let validator: Arc<dyn ImageValidator> = Arc::new(FailingSet(HashSet::new()));
        let flag = ExpiredImageFlag::new();
        let failures = check_images(validator, urls(&["https://img/a"]), flag.clone()).await;
        assert_eq!(failures, 0);
        assert!(!flag.is_expired());
    }
}
