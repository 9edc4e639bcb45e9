//! Integration tests for Tableside.
//!
//! Each test starts its own reference server on an ephemeral port and talks
//! to it through the real `HttpBackend`, so no external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tableside-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `contract` - raw REST contract checks with `reqwest`
//! - `catalog` - tables and menu items across sessions
//! - `orders` - checkout and the order lifecycle
//! - `sync` - the polling layer, including an unreachable backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tableside_client::{BackendError, ClientConfig, Tableside};
use tableside_server::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use url::Url;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A reference server running on `127.0.0.1` with an empty repository.
///
/// Dropping it signals shutdown; [`TestServer::stop`] also waits for it.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    api_url: Url,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<io::Result<()>>>,
}

impl TestServer {
    /// Bind an ephemeral port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound.
    pub async fn start() -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let api_url = Url::parse(&format!("http://{addr}/api")).map_err(io::Error::other)?;

        let (tx, rx) = oneshot::channel::<()>();
        let state = AppState::in_memory(ServerConfig::default());
        let task = tokio::spawn(tableside_server::serve(listener, state, async move {
            let _ = rx.await;
        }));

        Ok(Self {
            addr,
            api_url,
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the REST API, ending in `/api`.
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Absolute URL of `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Client configuration pointing at this server with a short poll period.
    #[must_use]
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.api_url.clone());
        config.poll_interval = Duration::from_millis(100);
        config.request_timeout = Duration::from_secs(2);
        config
    }

    /// A fresh session: its own stores, sharing only the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn session(&self) -> Result<Tableside, BackendError> {
        Tableside::connect(&self.config())
    }

    /// Shut down gracefully and wait for open connections to close.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
                Ok(Ok(Ok(()))) => {}
                Ok(Ok(Err(e))) => tracing::error!(error = %e, "Test server failed"),
                Ok(Err(e)) => tracing::error!(error = %e, "Test server panicked"),
                Err(_) => tracing::warn!("Test server did not shut down in time"),
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A listener that accepts connections and never answers them.
///
/// Requests against it end in the client's request timeout.
#[derive(Debug)]
pub struct SilentServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl SilentServer {
    /// Listen on `addr`; use port 0 for an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(addr: SocketAddr) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => held.push(socket),
                    Err(e) => {
                        tracing::warn!(error = %e, "Silent listener stopped accepting");
                        break;
                    }
                }
            }
        });
        Ok(Self { addr, task })
    }

    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL of the (unanswered) REST API.
    ///
    /// # Errors
    ///
    /// Returns an error if the address does not form a URL.
    pub fn api_url(&self) -> io::Result<Url> {
        Url::parse(&format!("http://{}/api", self.addr)).map_err(io::Error::other)
    }
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// An API URL on a local port nothing listens on.
///
/// # Errors
///
/// Returns an error if no port can be bound to find a free one.
pub async fn unreachable_api_url() -> io::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Url::parse(&format!("http://{addr}/api")).map_err(io::Error::other)
}
