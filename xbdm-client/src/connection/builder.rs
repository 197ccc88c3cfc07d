//! Connection builder for XBDM
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use xbdm_client::ConnectionBuilder;
//!
//! # async fn demo() -> xbdm_core::XbdmResult<()> {
//! let conn = ConnectionBuilder::new("10.0.0.17")
//!     .port(730)
//!     .read_timeout(Duration::from_secs(2))
//!     .connect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use super::cache::ConnectionCache;
use super::connection::Connection;
use super::settings::ConnectionSettings;
use std::time::Duration;
use xbdm_core::{DEFAULT_PORT, Endpoint, XbdmResult};

/// Fluent construction of connections and caches
#[derive(Debug, Clone)]
pub struct ConnectionBuilder {
    host: String,
    port: u16,
    settings: ConnectionSettings,
}

impl ConnectionBuilder {
    /// Start a builder for `host` on the default control port
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            settings: ConnectionSettings::default(),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.settings.read_timeout = timeout;
        self
    }

    pub fn banner_timeout(mut self, timeout: Duration) -> Self {
        self.settings.banner_timeout = timeout;
        self
    }

    /// Port whose service sends a greeting line, `None` to never expect one
    pub fn banner_port(mut self, port: Option<u16>) -> Self {
        self.settings.banner_port = port;
        self
    }

    /// Replace all settings at once
    pub fn settings(mut self, settings: ConnectionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    /// Open a standalone connection
    pub async fn connect(self) -> XbdmResult<Connection> {
        Connection::open(self.endpoint(), self.settings).await
    }

    /// Build an empty cache using these settings
    pub fn build_cache(self) -> ConnectionCache {
        ConnectionCache::new(self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockConsole;

    #[test]
    fn test_builder_defaults() {
        let builder = ConnectionBuilder::new("10.0.0.17");
        assert_eq!(builder.endpoint(), Endpoint::with_default_port("10.0.0.17"));
    }

    #[tokio::test]
    async fn test_builder_connects() {
        let console = MockConsole::start(Some("201- connected\r\n"), |_| {
            Some("200- OK\r\n".to_string())
        })
        .await;
        let port = console.endpoint.port();

        let conn = ConnectionBuilder::new("127.0.0.1")
            .port(port)
            .banner_port(Some(port))
            .read_timeout(Duration::from_millis(500))
            .connect()
            .await
            .unwrap();
        assert_eq!(conn.settings().read_timeout, Duration::from_millis(500));
        assert_eq!(conn.send("dbgname").await.unwrap().status, "200- OK");

        let cache = ConnectionBuilder::new("127.0.0.1").banner_port(None).build_cache();
        assert_eq!(cache.settings().banner_port, None);
    }
}
