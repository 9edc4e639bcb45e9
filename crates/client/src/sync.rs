//! Synchronization layer: keeps the stores in step with the backing store.
//!
//! Every refresh fetches tables, menu items, and orders and replaces the local
//! collections with whatever the backend returned. The last fetch wins; there
//! is no merging with local edits.
//!
//! A failed fetch on a later cycle keeps the last known collection. A failed
//! fetch on the very first load leaves that collection empty. Either way the
//! layer reports itself initialized once the first attempt has settled.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::backend::Backend;
use crate::catalog::CatalogStore;
use crate::error::BackendError;
use crate::orders::OrderStore;

/// Periodically refreshes a [`CatalogStore`] and an [`OrderStore`].
pub struct SyncLayer {
    backend: Arc<dyn Backend>,
    catalog: Arc<CatalogStore>,
    orders: Arc<OrderStore>,
    initialized: watch::Sender<bool>,
}

impl std::fmt::Debug for SyncLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncLayer")
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

impl SyncLayer {
    #[must_use]
    pub fn new(
        backend: Arc<dyn Backend>,
        catalog: Arc<CatalogStore>,
        orders: Arc<OrderStore>,
    ) -> Self {
        Self {
            backend,
            catalog,
            orders,
            initialized: watch::channel(false).0,
        }
    }

    /// Whether the first refresh has settled.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        *self.initialized.borrow()
    }

    /// Wait until the first refresh has settled, successfully or not.
    pub async fn wait_initialized(&self) {
        let mut rx = self.initialized.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    /// Fetch all three collections and replace the local copies.
    ///
    /// Errors are logged, never returned.
    #[instrument(skip(self))]
    pub async fn refresh(&self) {
        let first_load = !self.is_initialized();

        let (tables, menu_items, orders) = tokio::join!(
            self.backend.list_tables(),
            self.backend.list_menu_items(),
            self.backend.list_orders(),
        );

        if let Some(tables) = settle("tables", tables, first_load) {
            self.catalog.replace_tables(tables).await;
        }
        if let Some(items) = settle("menu items", menu_items, first_load) {
            self.catalog.replace_menu_items(items).await;
        }
        if let Some(orders) = settle("orders", orders, first_load) {
            self.orders.replace_orders(orders).await;
        }

        // Flip exactly once.
        self.initialized.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        });
    }

    /// Spawn the poll loop: one refresh now, then one every `interval`.
    ///
    /// The loop runs until the returned handle is stopped or dropped.
    #[must_use = "dropping the handle stops the sync loop"]
    pub fn start(self: &Arc<Self>, interval: Duration) -> SyncHandle {
        let token = CancellationToken::new();
        let layer = Arc::clone(self);
        let cancel = token.clone();

        let task = tokio::spawn(async move {
            info!(interval = ?interval, "Sync loop started");

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            () = cancel.cancelled() => break,
                            () = layer.refresh() => {}
                        }
                    }
                }
            }

            info!("Sync loop stopped");
        });

        SyncHandle {
            token,
            task: Some(task),
        }
    }
}

/// Decide what replaces a local collection after a fetch.
///
/// `None` keeps the current collection.
fn settle<T>(
    what: &str,
    result: Result<Vec<T>, BackendError>,
    first_load: bool,
) -> Option<Vec<T>> {
    match result {
        Ok(records) => {
            debug!(what, count = records.len(), "Fetched");
            Some(records)
        }
        Err(e) if first_load => {
            warn!(what, error = %e, "Initial fetch failed, starting empty");
            Some(Vec::new())
        }
        Err(e) => {
            warn!(what, error = %e, "Refresh failed, keeping last known state");
            None
        }
    }
}

/// Owner of a running sync loop.
///
/// Dropping the handle cancels the loop; [`SyncHandle::stop`] also waits for
/// it to finish.
#[derive(Debug)]
pub struct SyncHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SyncHandle {
    /// Cancel the loop and wait for it to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::error!(error = %e, "Sync loop panicked");
        }
    }

    /// Returns true once the loop has been cancelled.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
