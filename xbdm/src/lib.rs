//! xbdm - Rust client for the XBDM remote-management protocol
//!
//! XBDM is the line-oriented, status-coded TCP service a development
//! console exposes for querying device state, reading and writing process
//! memory, power actions and on-screen notifications.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `xbdm-core`: Error type, endpoints, byte/hex codec and text encoding
//! - `xbdm-transport`: Line-framed TCP transport
//! - `xbdm-application`: Command builder, response parser, memory views, notification icons
//! - `xbdm-client`: Connections, connection cache, console operations and worker pool
//!
//! # Usage
//!
//! ```no_run
//! use xbdm::client::{ClientConfig, XbdmClient};
//! use xbdm::Endpoint;
//!
//! # async fn demo() -> xbdm::XbdmResult<()> {
//! let client = XbdmClient::new(ClientConfig::default());
//! let endpoint: Endpoint = "192.168.1.20:730".parse()?;
//! println!("{}", client.console_info(&endpoint).await?);
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use xbdm_core::{DEFAULT_PORT, Endpoint, XbdmError, XbdmResult};
pub use xbdm_core::{codec, text};

// Re-export client API
pub mod client {
    pub use xbdm_client::*;
}

// Re-export transport layer
pub mod transport {
    pub use xbdm_transport::*;
}

// Re-export commands, replies and views
pub mod application {
    pub use xbdm_application::*;
}
