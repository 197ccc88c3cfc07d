//! Connection settings

use serde::{Deserialize, Serialize};
use std::time::Duration;
use xbdm_core::{DEFAULT_PORT, Endpoint};
use xbdm_transport::TcpSettings;

/// Tunables for one XBDM connection
///
/// The endpoint is not part of the settings; it is supplied per call so the
/// same settings can be reused for every console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Upper bound for TCP connection establishment
    pub connect_timeout: Duration,
    /// Read deadline for every reply line
    pub read_timeout: Duration,
    /// How long to wait for the greeting line after connecting
    pub banner_timeout: Duration,
    /// Port whose service greets new connections with a banner line
    ///
    /// `None` disables banner handling entirely.
    pub banner_port: Option<u16>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
            banner_timeout: Duration::from_secs(2),
            banner_port: Some(DEFAULT_PORT),
        }
    }
}

impl ConnectionSettings {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_banner_timeout(mut self, timeout: Duration) -> Self {
        self.banner_timeout = timeout;
        self
    }

    pub fn with_banner_port(mut self, port: Option<u16>) -> Self {
        self.banner_port = port;
        self
    }

    /// Whether a banner line is expected when connecting to `endpoint`
    pub fn expects_banner(&self, endpoint: &Endpoint) -> bool {
        self.banner_port == Some(endpoint.port())
    }

    /// Transport settings for `endpoint`
    pub fn tcp_settings(&self, endpoint: Endpoint) -> TcpSettings {
        TcpSettings {
            endpoint,
            connect_timeout: Some(self.connect_timeout),
            timeout: Some(self.read_timeout),
        }
    }
}
