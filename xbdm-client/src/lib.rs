//! XBDM client
//!
//! Connections with banner handling and reconnect-on-fault, a
//! session-scoped connection cache, the console operations built on top of
//! them and a bounded worker pool for running those operations off the
//! caller's task.

pub mod config;
pub mod connection;
pub mod console;
pub mod dispatcher;

#[cfg(test)]
mod mock;

pub use config::ClientConfig;
pub use connection::{Connection, ConnectionBuilder, ConnectionCache, ConnectionSettings};
pub use console::{MemoryRead, XbdmClient};
pub use dispatcher::{DEFAULT_MAX_WORKERS, Dispatcher, JobHandle};
