//! Cancellation for in-flight page fetches.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::{Error, Result};

/// Signals that the owner of a fetch has gone away.
///
/// Clones share the same flag. Once cancelled, a handle stays cancelled.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    /// Create a fresh, uncancelled handle.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the handle is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Drive `fut` unless cancelled first.
    ///
    /// A result that arrives after cancellation is dropped and replaced with
    /// `Error::Cancelled`.
    pub async fn run<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Error::Cancelled),
            result = fut => {
                if self.is_cancelled() {
                    log::debug!("discarding result that arrived after cancellation");
                    Err(Error::Cancelled)
                } else {
                    result
                }
            }
        }
    }

    /// Guard that cancels this handle when dropped.
    pub fn drop_guard(&self) -> CancelOnDrop {
        CancelOnDrop {
            handle: self.clone(),
        }
    }
}

/// Cancels its handle on drop. Hold one for the lifetime of a view.
#[derive(Debug)]
pub struct CancelOnDrop {
    handle: CancelHandle,
}

impl CancelOnDrop {
    pub fn handle(&self) -> &CancelHandle {
        &self.handle
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}
