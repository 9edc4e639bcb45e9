//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::{MemoryRepository, Repository};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    repository: Arc<dyn Repository>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create state backed by `repository`.
    #[must_use]
    pub fn new(config: ServerConfig, repository: Arc<dyn Repository>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, repository }),
        }
    }

    /// Create state backed by a fresh in-memory repository.
    #[must_use]
    pub fn in_memory(config: ServerConfig) -> Self {
        Self::new(config, Arc::new(MemoryRepository::new()))
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn repository(&self) -> &dyn Repository {
        self.inner.repository.as_ref()
    }
}
