//! Session-scoped connection cache
//!
//! Front-end actions never hold a socket themselves. Every action asks the
//! cache for a connection to the endpoint it targets; the cache hands out
//! the live cached connection when endpoint and liveness still match, and
//! otherwise replaces it.

use super::connection::Connection;
use super::settings::ConnectionSettings;
use std::sync::Arc;
use tokio::sync::Mutex;
use xbdm_core::{Endpoint, XbdmResult};

/// Holds at most one live [`Connection`]
#[derive(Debug, Default)]
pub struct ConnectionCache {
    settings: ConnectionSettings,
    current: Mutex<Option<Arc<Connection>>>,
}

impl ConnectionCache {
    /// Create an empty cache; connections are opened with `settings`
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            settings,
            current: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Get a connection to `endpoint`
    ///
    /// Reuses the cached connection if it is bound to an equal endpoint and
    /// still reports connected. Otherwise the cached connection is closed
    /// (faults ignored) and a fresh one is opened and remembered. Concurrent
    /// calls are serialized, so the check-and-replace is atomic.
    pub async fn acquire(&self, endpoint: &Endpoint) -> XbdmResult<Arc<Connection>> {
        let mut current = self.current.lock().await;

        if let Some(conn) = current.as_ref() {
            if conn.endpoint() == endpoint && conn.is_connected() {
                return Ok(conn.clone());
            }
        }

        if let Some(stale) = current.take() {
            log::debug!("Replacing cached connection to {}", stale.endpoint());
            if let Err(e) = stale.close().await {
                log::warn!("Error closing connection to {}: {}", stale.endpoint(), e);
            }
        }

        let conn = Arc::new(Connection::open(endpoint.clone(), self.settings.clone()).await?);
        *current = Some(conn.clone());
        Ok(conn)
    }

    /// Endpoint of the cached connection, if any
    pub async fn current(&self) -> Option<Endpoint> {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|conn| conn.endpoint().clone())
    }

    /// Close and forget the cached connection
    pub async fn release(&self) -> XbdmResult<()> {
        let stale = self.current.lock().await.take();
        match stale {
            Some(conn) => conn.close().await,
            None => Ok(()),
        }
    }
}
