//! Debounced URL sync for a sequence that is being edited.
//!
//! While a user edits, every change would otherwise re-encode the whole
//! sequence and rewrite the address bar. [`UrlSync`] waits for a quiet
//! period first. Each new edit cancels the previous pending encode, so
//! there is at most one pending write and the last edit always wins.
//!
//! ```text
//! schedule(a) ──┐
//! schedule(b) ──┼─ aborts a
//! schedule(c) ──┘  aborts b ── (debounce) ──→ publish(url(c))
//! ```
//!
//! Published URLs go out on a `tokio::sync::watch` channel; whoever owns
//! the address bar subscribes to it.

use std::time::Duration;

use beatlink_protocol::SequenceData;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::{LinkBuilder, LinkConfig, LinkError};

/// Debounces share-URL encoding for one module's editor.
///
/// Must be used from inside a Tokio runtime: [`schedule`](Self::schedule)
/// spawns a task.
pub struct UrlSync {
    builder: LinkBuilder,
    module: String,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    tx: watch::Sender<Option<String>>,
}

impl UrlSync {
    /// Creates a sync for `module` with the config's debounce delay.
    ///
    /// # Errors
    /// [`LinkError::InvalidOrigin`] if the config's origin is unusable.
    pub fn new(config: &LinkConfig, module: impl Into<String>) -> Result<Self, LinkError> {
        Ok(Self::with_builder(
            LinkBuilder::new(config)?,
            module,
            config.debounce,
        ))
    }

    /// Creates a sync from an existing builder.
    pub fn with_builder(
        builder: LinkBuilder,
        module: impl Into<String>,
        delay: Duration,
    ) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            builder,
            module: module.into(),
            delay,
            pending: None,
            tx,
        }
    }

    /// Receives every URL this sync publishes (latest value only).
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }

    /// The most recently published URL, if any.
    pub fn latest(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    /// Queues an encode of `sequence` after the debounce delay,
    /// cancelling whatever was queued before.
    pub fn schedule(&mut self, sequence: SequenceData) {
        self.cancel();

        let builder = self.builder.clone();
        let module = self.module.clone();
        let tx = self.tx.clone();
        // Counted from the edit, not from when the task first runs.
        let deadline = Instant::now() + self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            match builder.share_url(&sequence, &module) {
                Ok(url) => {
                    tracing::trace!(%module, len = url.len(), "url synced");
                    tx.send_replace(Some(url));
                }
                Err(e) => tracing::warn!(%module, error = %e, "url sync failed"),
            }
        }));
    }

    /// Cancels the pending encode, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// `true` while an encode is queued and hasn't run yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for UrlSync {
    fn drop(&mut self) {
        self.cancel();
    }
}
