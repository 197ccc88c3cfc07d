//! Transport layer module for the XBDM protocol
//!
//! This crate provides the TCP transport and the CRLF line framing that the
//! XBDM text protocol runs on.

pub mod stream;
pub mod tcp;

pub use stream::{LineTransport, StreamAccessor, TransportLayer, terminate_line};
pub use tcp::{TcpSettings, TcpTransport};
pub use xbdm_core::{MAX_LINE_LENGTH, XbdmError, XbdmResult};
