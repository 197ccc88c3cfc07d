//! Core types and utilities for the XBDM protocol
//!
//! This crate provides the error model, the target endpoint type and the
//! pure byte/hex and text codecs used throughout the XBDM client.

pub mod codec;
pub mod endpoint;
pub mod error;
pub mod text;

pub use endpoint::{Endpoint, DEFAULT_PORT};
pub use error::{XbdmError, XbdmResult};

/// Longest reply line accepted before the stream is considered corrupt
pub const MAX_LINE_LENGTH: usize = 64 * 1024;
