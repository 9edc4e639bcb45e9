//! Tableside Client - State stores and synchronization.
//!
//! This crate holds a session's view of the restaurant:
//! - [`CatalogStore`] - tables and menu items, with duplicate and validation checks
//! - [`OrderStore`] - orders, totals, and the status lifecycle
//! - [`SyncLayer`] - the poll loop that replaces local state from the backend
//! - [`Cart`] - the customer's not-yet-submitted selection
//! - [`TableSession`] - a resolved table link that gates checkout
//!
//! All writes go through a [`Backend`]; [`HttpBackend`] talks to the REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use tableside_client::{ClientConfig, Tableside};
//!
//! let client = Tableside::connect(&ClientConfig::from_env()?)?;
//! let sync = client.sync.start(client.config.poll_interval);
//! client.sync.wait_initialized().await;
//!
//! let table = client.catalog.add_table("5").await?;
//! println!("{}", table.menu_url(&client.config.public_url)?);
//! sync.stop().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod session;
pub mod sync;

use std::sync::Arc;

pub use backend::{Backend, BackendResult, HttpBackend};
pub use cart::{Cart, CartFile};
pub use catalog::CatalogStore;
pub use config::{ClientConfig, ConfigError};
pub use error::{BackendError, CartFileError, SessionError, StoreError};
pub use orders::OrderStore;
pub use session::TableSession;
pub use sync::{SyncHandle, SyncLayer};

/// The stores and sync layer wired to one backend.
#[derive(Debug, Clone)]
pub struct Tableside {
    pub config: ClientConfig,
    pub catalog: Arc<CatalogStore>,
    pub orders: Arc<OrderStore>,
    pub sync: Arc<SyncLayer>,
}

impl Tableside {
    /// Wire stores to an existing backend.
    #[must_use]
    pub fn with_backend(config: ClientConfig, backend: Arc<dyn Backend>) -> Self {
        let catalog = Arc::new(CatalogStore::new(Arc::clone(&backend)));
        let orders = Arc::new(OrderStore::new(Arc::clone(&backend)));
        let sync = Arc::new(SyncLayer::new(
            backend,
            Arc::clone(&catalog),
            Arc::clone(&orders),
        ));
        Self {
            config,
            catalog,
            orders,
            sync,
        }
    }

    /// Wire stores to the REST API at `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn connect(config: &ClientConfig) -> Result<Self, BackendError> {
        let backend = HttpBackend::new(config)?;
        Ok(Self::with_backend(config.clone(), Arc::new(backend)))
    }
}
