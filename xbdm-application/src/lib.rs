//! Application layer module for the XBDM protocol
//!
//! This crate builds command lines, parses replies and projects memory
//! reads into display views. Everything here is pure; the client crate does
//! the I/O.

pub mod command;
pub mod info;
pub mod memory;
pub mod notify;
pub mod response;

pub use command::{
    Command, ConsoleFeature, MAX_READ_LENGTH, NotificationRequest, parse_address, parse_length,
};
pub use info::{ConsoleInfo, Temperature};
pub use memory::{MemorySpan, MemoryView};
pub use notify::{NOTIFY_LOGO_COUNT, NotifyLogo};
pub use response::{
    Response, announces_continuation, extract_data_field, extract_value, parse_dir_listing,
};
