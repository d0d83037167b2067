// src/view/page_view.rs
//! The page-level data flow of one mounted post page.
//!
//! A view shows the build-time snapshot first, refreshes it once from the live
//! API after `REFRESH_DELAY`, and runs an image liveness pass over every
//! snapshot it installs.

use super::images::{check_images, ImageValidator};
use super::latch::ExpiredImageFlag;
use crate::api::PostRepository;
use crate::constants::REFRESH_DELAY;
use crate::error::AppError;
use crate::model::{extract_image_urls, PageSnapshot};
use crate::types::PostId;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};

/// Where a view is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing mounted, or mounted without a post ID.
    Uninitialized,
    /// The build-time snapshot is installed.
    InitialSnapshotLoaded,
    /// The refresh timer is armed.
    RefreshScheduled,
    /// The refresh ran. Terminal until the next navigation.
    RefreshComplete,
}

/// State shared between the view and its background tasks.
struct ViewShared {
    repository: Arc<dyn PostRepository>,
    validator: Arc<dyn ImageValidator>,
    /// Bumped on every mount, navigation and unmount. Results carrying an older
    /// generation are discarded.
    generation: Mutex<u64>,
    snapshot: watch::Sender<Option<Arc<PageSnapshot>>>,
    state: watch::Sender<ViewState>,
    expired: ExpiredImageFlag,
    image_checks: Mutex<JoinSet<usize>>,
}

impl ViewShared {
    /// Installs a snapshot. The caller holds the generation lock.
    fn install_locked(&self, snapshot: PageSnapshot) {
        let urls = extract_image_urls(&snapshot);
        self.snapshot.send_replace(Some(Arc::new(snapshot)));

        if urls.is_empty() {
            return;
        }
        log::debug!("Scheduling liveness checks for {} image(s)", urls.len());
        self.image_checks.lock().spawn(check_images(
            Arc::clone(&self.validator),
            urls,
            self.expired.clone(),
        ));
    }

    fn finish_refresh(
        &self,
        generation: u64,
        post_id: &PostId,
        result: Result<PageSnapshot, AppError>,
    ) {
        let current = self.generation.lock();
        if *current != generation {
            log::debug!("Discarding refresh of '{}' from a superseded navigation", post_id);
            return;
        }

        match result {
            Ok(snapshot) => {
                log::info!("Refreshed post '{}'", post_id);
                self.install_locked(snapshot);
            }
            Err(e) => {
                log::warn!(
                    "Refresh of post '{}' failed, keeping current snapshot: {}",
                    post_id,
                    e
                );
            }
        }
        self.state.send_replace(ViewState::RefreshComplete);
    }
}

/// One mounted post page.
pub struct PageView {
    shared: Arc<ViewShared>,
    post_id: Option<PostId>,
    refresh_task: Option<JoinHandle<()>>,
}

impl PageView {
    pub fn new(repository: Arc<dyn PostRepository>, validator: Arc<dyn ImageValidator>) -> Self {
        let (snapshot, _) = watch::channel(None);
        let (state, _) = watch::channel(ViewState::Uninitialized);
        Self {
            shared: Arc::new(ViewShared {
                repository,
                validator,
                generation: Mutex::new(0),
                snapshot,
                state,
                expired: ExpiredImageFlag::new(),
                image_checks: Mutex::new(JoinSet::new()),
            }),
            post_id: None,
            refresh_task: None,
        }
    }

    /// Mounts the view for `post_id`, showing `initial` until the refresh lands.
    ///
    /// Without a post ID nothing is scheduled and the view stays uninitialized.
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self, post_id: Option<PostId>, initial: Option<PageSnapshot>) {
        let generation = self.reset();

        let Some(post_id) = post_id else {
            log::debug!("Mounted without a post ID; nothing to refresh");
            return;
        };

        if let Some(snapshot) = initial {
            let current = self.shared.generation.lock();
            if *current == generation {
                self.shared.install_locked(snapshot);
                self.shared.state.send_replace(ViewState::InitialSnapshotLoaded);
            }
        }

        self.schedule_refresh(generation, post_id.clone());
        self.post_id = Some(post_id);
    }

    /// Switches the view to another post.
    ///
    /// Navigating to the post already shown does nothing. Otherwise any pending
    /// refresh is cancelled and the view mounts the new post from scratch.
    pub fn navigate(&mut self, post_id: PostId, initial: Option<PageSnapshot>) {
        if self.post_id.as_ref() == Some(&post_id) {
            log::debug!("Already showing '{}'", post_id);
            return;
        }
        log::info!(
            "Navigating from {:?} to '{}'",
            self.post_id.as_ref().map(PostId::as_str),
            post_id
        );
        self.mount(Some(post_id), initial);
    }

    /// Cancels the pending refresh and any running image checks and clears the
    /// shown snapshot.
    pub fn unmount(&mut self) {
        self.reset();
    }

    fn schedule_refresh(&mut self, generation: u64, post_id: PostId) {
        let shared = Arc::clone(&self.shared);

        self.shared.state.send_replace(ViewState::RefreshScheduled);
        log::debug!("Refresh of '{}' scheduled in {:?}", post_id, REFRESH_DELAY);

        self.refresh_task = Some(tokio::spawn(async move {
            tokio::time::sleep(REFRESH_DELAY).await;
            let result = shared.repository.fetch_snapshot(&post_id).await;
            shared.finish_refresh(generation, &post_id, result);
        }));
    }

    /// Cancels all background work, clears the shown snapshot and returns the
    /// new generation.
    fn reset(&mut self) -> u64 {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
        self.shared.image_checks.lock().abort_all();
        self.post_id = None;

        let mut generation = self.shared.generation.lock();
        *generation += 1;
        self.shared.snapshot.send_replace(None);
        self.shared.state.send_replace(ViewState::Uninitialized);
        *generation
    }

    pub fn post_id(&self) -> Option<&PostId> {
        self.post_id.as_ref()
    }

    pub fn state(&self) -> ViewState {
        *self.shared.state.borrow()
    }

    /// The snapshot currently shown, if any.
    pub fn snapshot(&self) -> Option<Arc<PageSnapshot>> {
        self.shared.snapshot.borrow().clone()
    }

    pub fn subscribe_snapshot(&self) -> watch::Receiver<Option<Arc<PageSnapshot>>> {
        self.shared.snapshot.subscribe()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ViewState> {
        self.shared.state.subscribe()
    }

    /// Whether any image of any snapshot this view showed failed to load.
    pub fn is_image_expired(&self) -> bool {
        self.shared.expired.is_expired()
    }

    pub fn expired_flag(&self) -> &ExpiredImageFlag {
        &self.shared.expired
    }

    /// Waits until the refresh has run.
    pub async fn wait_for_refresh(&self) {
        let mut state = self.subscribe_state();
        loop {
            if *state.borrow_and_update() == ViewState::RefreshComplete {
                return;
            }
            if state.changed().await.is_err() {
                return;
            }
        }
    }

    /// Waits for the image checks started so far and returns how many images failed.
    pub async fn wait_for_image_checks(&self) -> usize {
        let mut checks = std::mem::take(&mut *self.shared.image_checks.lock());
        let mut failures = 0;
        while let Some(result) = checks.join_next().await {
            match result {
                Ok(failed) => failures += failed,
                Err(e) if e.is_cancelled() => {}
                Err(e) => log::warn!("Image check task failed: {}", e),
            }
        }
        failures
    }
}

impl Drop for PageView {
    fn drop(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
        self.shared.image_checks.lock().abort_all();
        *self.shared.generation.lock() += 1;
    }
}
