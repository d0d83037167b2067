// src/view/latch.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Set once any image of a page fails to load.
///
/// The flag only ever goes from unset to set. Clones share the same flag, so
/// background image checks can mark it while the view reads it.
#[derive(Debug, Clone, Default)]
pub struct ExpiredImageFlag(Arc<AtomicBool>);

impl ExpiredImageFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the page as having an expired image.
    ///
    /// Returns `true` only for the call that actually set the flag.
    pub fn mark_expired(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_expired(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
