// src/site/builder.rs
//! Build-time generation of post pages.
//!
//! A build lists every post, fetches the snapshots of posts whose artifacts are
//! missing or stale, and writes `{postId}.json` plus `{postId}.html` for each.
//! Failing to list posts aborts the build. A post that fails to fetch or render
//! is recorded and the build carries on with the others.

use super::artifact::{artifact_path, page_path, PageArtifact};
use crate::api::PostRepository;
use crate::constants::BUILD_FETCH_CONCURRENCY;
use crate::error::AppError;
use crate::formatting::{PageComposer, RenderContext};
use crate::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};
use crate::types::PostId;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};

/// A post that could not be generated.
#[derive(Debug, Clone)]
pub struct PostFailure {
    pub post_id: PostId,
    pub error: String,
}

/// Outcome of one build.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub generated: Vec<PostId>,
    /// Posts whose artifacts were still inside their revalidation window.
    pub skipped: Vec<PostId>,
    pub failed: Vec<PostFailure>,
    pub output: OutputReport,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.output.is_success()
    }

    /// Turns recorded failures into an error.
    pub fn check(&self) -> Result<(), AppError> {
        if !self.output.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: self.output.failure_messages(),
            });
        }
        if !self.failed.is_empty() {
            return Err(AppError::PartialBuild {
                failed: self.failed.iter().map(|f| f.post_id.to_string()).collect(),
            });
        }
        Ok(())
    }
}

/// Generates the static pages of every post.
pub struct StaticSiteBuilder<R> {
    repository: R,
    composer: PageComposer,
    out_dir: PathBuf,
    force: bool,
    render_context: RenderContext,
}

impl<R: PostRepository> StaticSiteBuilder<R> {
    pub fn new(repository: R, composer: PageComposer, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository,
            composer,
            out_dir: out_dir.into(),
            force: false,
            render_context: RenderContext::new(),
        }
    }

    /// Regenerate artifacts even when they are still fresh.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// The posts a build would generate.
    pub async fn list_paths(&self) -> Result<Vec<PostId>, AppError> {
        self.repository.list_post_ids().await
    }

    /// Runs a build, stamping new artifacts with `now`.
    pub async fn build(&self, now: DateTime<Utc>) -> Result<BuildReport, AppError> {
        let post_ids = self.list_paths().await?;
        log::info!("Building {} post(s) into {}", post_ids.len(), self.out_dir.display());

        let mut report = BuildReport::default();
        let (fresh, due): (Vec<PostId>, Vec<PostId>) = post_ids
            .into_iter()
            .partition(|id| !self.force && self.has_fresh_artifact(id, now));
        for id in &fresh {
            log::debug!("Artifact for '{}' is still fresh, skipping", id);
        }
        report.skipped = fresh;

        let fetched: Vec<_> = stream::iter(due)
            .map(|id| async move {
                let result = self.repository.fetch_snapshot(&id).await;
                (id, result)
            })
            .buffered(BUILD_FETCH_CONCURRENCY)
            .collect()
            .await;

        let mut plan = OutputPlan::new();
        for (post_id, result) in fetched {
            match self.plan_post(&post_id, result, now) {
                Ok(operations) => {
                    operations.into_iter().for_each(|op| plan.push(op));
                    report.generated.push(post_id);
                }
                Err(e) => {
                    log::error!("Failed to generate post '{}': {}", post_id, e);
                    report.failed.push(PostFailure {
                        post_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        report.output = deliver(plan);

        log::info!(
            "Build finished: {} generated, {} fresh, {} failed",
            report.generated.len(),
            report.skipped.len(),
            report.failed.len()
        );
        Ok(report)
    }

    fn plan_post(
        &self,
        post_id: &PostId,
        fetched: Result<crate::model::PageSnapshot, AppError>,
        now: DateTime<Utc>,
    ) -> Result<[DeliveryTarget; 2], AppError> {
        let snapshot = fetched?;
        let page = self.composer.compose(&snapshot, &self.render_context)?;
        let artifact = PageArtifact::from_snapshot(post_id.clone(), &snapshot, now);

        Ok([
            DeliveryTarget::WriteFile {
                path: artifact_path(&self.out_dir, post_id),
                content: artifact.to_json()?,
            },
            DeliveryTarget::WriteFile {
                path: page_path(&self.out_dir, post_id),
                content: page.into_string(),
            },
        ])
    }

    fn has_fresh_artifact(&self, post_id: &PostId, now: DateTime<Utc>) -> bool {
        let path = artifact_path(&self.out_dir, post_id);
        if !path.exists() || !page_path(&self.out_dir, post_id).exists() {
            return false;
        }
        match PageArtifact::load(&path) {
            Ok(artifact) => !artifact.is_stale(now),
            Err(e) => {
                log::warn!("Ignoring unreadable artifact {}: {}", path.display(), e);
                false
            }
        }
    }
}
