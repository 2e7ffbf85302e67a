//! Expiry sweeper background task
//!
//! This module provides ExpirySweeper, a tokio task that periodically
//! reclaims objects whose expiry deadline has passed.
//!
//! # Design Notes
//!
//! - Reads already hide expired objects; the sweeper only reclaims memory
//! - Sleeps first, so nothing is purged on start
//! - Graceful shutdown via atomic flag plus `Notify`, so a long interval
//!   does not delay termination

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::memory::MemoryStore;
use crate::store::{StoreError, StoreResult};

/// Background expiry sweeper
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use std::time::Duration;
/// use geocatalog_storage::{ExpirySweeper, MemoryStore};
///
/// let store = Arc::new(MemoryStore::new());
/// let sweeper = ExpirySweeper::new(Arc::clone(&store), Duration::from_millis(50));
/// let handle = sweeper.start()?;
///
/// // ... use the store ...
///
/// sweeper.shutdown();
/// handle.await.unwrap();
/// ```
#[derive(Debug)]
pub struct ExpirySweeper {
    store: Arc<MemoryStore>,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl ExpirySweeper {
    /// Create a sweeper for `store` running every `interval`
    pub fn new(store: Arc<MemoryStore>, interval: Duration) -> Self {
        Self {
            store,
            interval,
            shutdown: Arc::new(AtomicBool::new(false)),
            wake: Arc::new(Notify::new()),
        }
    }

    /// Spawn the sweep loop on the current tokio runtime
    ///
    /// The task runs until `shutdown()` is called.
    ///
    /// # Errors
    ///
    /// `Unavailable` when called outside a tokio runtime.
    pub fn start(&self) -> StoreResult<JoinHandle<()>> {
        let runtime = Handle::try_current().map_err(|e| {
            StoreError::Unavailable(format!("expiry sweeper needs a tokio runtime: {}", e))
        })?;
        let store = Arc::clone(&self.store);
        let shutdown = Arc::clone(&self.shutdown);
        let wake = Arc::clone(&self.wake);
        let interval = self.interval;

        Ok(runtime.spawn(async move {
            debug!(interval_ms = interval.as_millis() as u64, "expiry sweeper started");
            while !shutdown.load(Ordering::Acquire) {
                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = wake.notified() => {}
                }
                if shutdown.load(Ordering::Acquire) {
                    break;
                }
                let removed = store.purge_expired(Instant::now());
                trace!(removed, "expiry sweep");
            }
            debug!("expiry sweeper stopped");
        }))
    }

    /// Signal shutdown and wake the task
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.wake.notify_one();
    }

    /// Check if shutdown has been signaled
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }
}
