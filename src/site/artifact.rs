// src/site/artifact.rs
use crate::api::parse_record_map;
use crate::constants::REVALIDATE_INTERVAL_SECS;
use crate::error::AppError;
use crate::model::{extract_title, PageSnapshot};
use crate::types::PostId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The build-time data of one post page.
///
/// `initialPageData` is the record map exactly as the content API returned it,
/// so a page view can be mounted from an artifact without a network round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageArtifact {
    pub post_id: PostId,
    pub title: String,
    pub initial_page_data: Value,
    /// Staleness window in seconds.
    pub revalidate: u64,
    pub generated_at: DateTime<Utc>,
}

impl PageArtifact {
    pub fn from_snapshot(
        post_id: PostId,
        snapshot: &PageSnapshot,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id,
            title: extract_title(snapshot),
            initial_page_data: snapshot.record_map().clone(),
            revalidate: REVALIDATE_INTERVAL_SECS,
            generated_at,
        }
    }

    /// When the artifact stops being fresh, or `None` if that is past the
    /// representable range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let window = Duration::try_seconds(i64::try_from(self.revalidate).ok()?)?;
        self.generated_at.checked_add_signed(window)
    }

    /// True once `generatedAt + revalidate` is at or before `now`.
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expiry| expiry <= now)
    }

    /// Re-parses the stored record map.
    pub fn to_snapshot(&self) -> Result<PageSnapshot, AppError> {
        parse_record_map(self.initial_page_data.clone())
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| AppError::JsonParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// `{out_dir}/{postId}.json`
pub fn artifact_path(out_dir: &Path, post_id: &PostId) -> PathBuf {
    out_dir.join(format!("{}.json", post_id))
}

/// `{out_dir}/{postId}.html`
pub fn page_path(out_dir: &Path, post_id: &PostId) -> PathBuf {
    out_dir.join(format!("{}.html", post_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn artifact(generated_at: DateTime<Utc>) -> PageArtifact {
        PageArtifact {
            post_id: PostId::new("hello-world").unwrap(),
            title: "Hello".to_string(),
            initial_page_data: json!({
                "id": "0123456789abcdef0123456789abcdef",
                "title": [],
                "blocks": []
            }),
            revalidate: 10,
            generated_at,
        }
    }

    #[test]
    fn test_staleness_flips_at_window_end() {
        let generated = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let artifact = artifact(generated);

        assert!(!artifact.is_stale(generated));
        assert!(!artifact.is_stale(generated + Duration::milliseconds(9_999)));
        assert!(artifact.is_stale(generated + Duration::seconds(10)));
        assert!(artifact.is_stale(generated + Duration::days(1)));
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let generated = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(artifact(generated)).unwrap();

        assert_eq!(value["postId"], "hello-world");
        assert_eq!(value["revalidate"], 10);
        assert!(value["initialPageData"].is_object());
        assert_eq!(value["generatedAt"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_load_roundtrip_and_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let original = artifact(Utc::now());
        let path = artifact_path(dir.path(), &original.post_id);
        std::fs::write(&path, original.to_json().unwrap()).unwrap();

        let loaded = PageArtifact::load(&path).unwrap();
        assert_eq!(loaded, original);
        assert_eq!(loaded.to_snapshot().unwrap().block_count(), 0);
    }

    #[test]
    fn test_load_reports_bad_json_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        match PageArtifact::load(&path) {
            Err(AppError::JsonParseError { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected JsonParseError, got {:?}", other),
        }
    }
}
