//! Holding a deep link between page load and the module that consumes it.
//!
//! A deep link is parsed as soon as the app starts, but the module it
//! targets may take a moment to mount. The link waits here in between.
//! Links only stay usable for a short window: if the user navigates away
//! and comes back later, a leftover link must not pre-load a sequence
//! they have long since moved on from.
//!
//! ```text
//!  store() ──→ [Pending] ──(take within window)──→ Some(link)
//!                 │
//!                 └──(window elapsed)──→ take() → None, slot cleared
//! ```
//!
//! Time comes from `tokio::time::Instant`, so tests can drive the window
//! with a paused clock.

use std::time::Duration;

use tokio::time::Instant;

use crate::{DeepLink, LinkConfig};

/// Single-slot store for a pending deep link.
///
/// Not thread-safe on its own:
/// callers that share it wrap it in a mutex.
#[derive(Debug)]
pub struct PendingLinkStore {
    pending: Option<(DeepLink, Instant)>,
    stale_after: Duration,
}

impl PendingLinkStore {
    /// Creates an empty store with the given staleness window.
    pub fn new(stale_after: Duration) -> Self {
        Self {
            pending: None,
            stale_after,
        }
    }

    /// Creates an empty store using `config.stale_after`.
    pub fn from_config(config: &LinkConfig) -> Self {
        Self::new(config.stale_after)
    }

    /// Stores a link, replacing any link already pending.
    pub fn store(&mut self, link: DeepLink) {
        if self.pending.is_some() {
            tracing::debug!("replacing pending deep link");
        }
        self.pending = Some((link, Instant::now()));
    }

    /// Removes and returns the pending link if it is still fresh.
    ///
    /// A stale link is discarded and reported as absent.
    pub fn take(&mut self) -> Option<DeepLink> {
        let (link, stored_at) = self.pending.take()?;
        let age = stored_at.elapsed();
        if age > self.stale_after {
            tracing::debug!(
                ?age,
                module = %link.module,
                "discarding stale deep link"
            );
            return None;
        }
        Some(link)
    }

    /// `true` if a link is stored and still fresh.
    pub fn has_fresh(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() <= self.stale_after)
    }

    /// Drops any pending link.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
