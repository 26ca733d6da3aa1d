//! Debounce of search-term changes.
//!
//! Every term change takes a new token; a delayed search only acts while
//! its token is still the latest one. A superseded search that is already
//! on the wire is not aborted, its completion is ignored.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchToken(u64);

#[derive(Clone, Debug, Default)]
pub struct SearchDebounce {
    generation: Arc<AtomicU64>,
}

impl SearchDebounce {
    /// Starts a new search generation, superseding all earlier tokens
    pub fn begin(&self) -> SearchToken {
        SearchToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersedes the pending search without starting a new one
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, token: SearchToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }
}

#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, ms: u32);
}

/// Browser timer (`setTimeout`)
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}
