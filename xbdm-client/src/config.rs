//! Client configuration

use crate::connection::ConnectionSettings;
use crate::dispatcher::DEFAULT_MAX_WORKERS;
use serde::{Deserialize, Serialize};

/// Configuration of an [`XbdmClient`](crate::XbdmClient)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Settings used for every connection the client opens
    pub connection: ConnectionSettings,
    /// Upper bound on concurrently running actions
    pub max_workers: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings::default(),
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl ClientConfig {
    pub fn with_connection(mut self, connection: ConnectionSettings) -> Self {
        self.connection = connection;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.max_workers, 8);
        assert_eq!(config.connection, ConnectionSettings::default());
    }

    #[test]
    fn test_setters() {
        let config = ClientConfig::default()
            .with_max_workers(2)
            .with_connection(ConnectionSettings::default().with_read_timeout(Duration::from_secs(1)));
        assert_eq!(config.max_workers, 2);
        assert_eq!(config.connection.read_timeout, Duration::from_secs(1));
    }
}
