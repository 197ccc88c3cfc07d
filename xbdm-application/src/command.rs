//! Command builder for XBDM
//!
//! Every operation the client performs is a single command line. This module
//! produces those lines from typed parameters and rejects malformed caller
//! input before anything touches the network.
//!
//! # Usage
//!
//! ```rust
//! use xbdm_application::command::{Command, ConsoleFeature};
//!
//! let cmd = Command::console_feature(ConsoleFeature::KernelVersion);
//! assert_eq!(cmd.as_str(), r#"consolefeatures ver=2 type=13 params="A\0\A\0\""#);
//!
//! let cmd = Command::get_memory(0x8200_0000, 16).unwrap();
//! assert_eq!(cmd.as_str(), "getmem addr=0x82000000 length=16");
//! ```

use crate::notify::NotifyLogo;
use serde::{Deserialize, Serialize};
use std::fmt;
use xbdm_core::codec::{bytes_to_hex, hex_to_bytes};
use xbdm_core::text::encode_cp1252;
use xbdm_core::{MAX_LINE_LENGTH, XbdmError, XbdmResult};

/// Parameter block shared by the plain console-feature queries
const EMPTY_PARAMS: &str = r"A\0\A\0\";

/// Console-feature type used for notifications
const NOTIFY_TYPE: u8 = 12;

/// Console-feature type used for shutdown
const SHUTDOWN_TYPE: u8 = 11;

/// Room left on a `getmem` reply line for the status text around `data=`
const READ_REPLY_OVERHEAD: usize = 256;

/// Largest `getmem` length whose hex payload fits on one reply line
pub const MAX_READ_LENGTH: u32 = ((MAX_LINE_LENGTH - READ_REPLY_OVERHEAD) / 2) as u32;

/// Queryable console attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleFeature {
    KernelVersion,
    ConsoleType,
    CpuKey,
    TitleId,
    CpuTemperature,
    GpuTemperature,
}

impl ConsoleFeature {
    /// All queryable features, in display order
    pub const ALL: [ConsoleFeature; 6] = [
        ConsoleFeature::KernelVersion,
        ConsoleFeature::ConsoleType,
        ConsoleFeature::CpuKey,
        ConsoleFeature::TitleId,
        ConsoleFeature::CpuTemperature,
        ConsoleFeature::GpuTemperature,
    ];

    /// Console-feature type code
    pub fn type_id(&self) -> u8 {
        match self {
            ConsoleFeature::KernelVersion => 13,
            ConsoleFeature::ConsoleType => 17,
            ConsoleFeature::CpuKey => 10,
            ConsoleFeature::TitleId => 16,
            ConsoleFeature::CpuTemperature | ConsoleFeature::GpuTemperature => 15,
        }
    }

    /// Parameter block sent with the query
    pub fn params(&self) -> &'static str {
        match self {
            // Temperature sensors are selected by the trailing index
            ConsoleFeature::CpuTemperature => r"A\0\A\1\0\",
            ConsoleFeature::GpuTemperature => r"A\0\A\1\1\",
            _ => EMPTY_PARAMS,
        }
    }

    /// Whether the reply is a hexadecimal temperature reading
    pub fn is_temperature(&self) -> bool {
        matches!(
            self,
            ConsoleFeature::CpuTemperature | ConsoleFeature::GpuTemperature
        )
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            ConsoleFeature::KernelVersion => "Kernel Version",
            ConsoleFeature::ConsoleType => "Console Type",
            ConsoleFeature::CpuKey => "CPU Key",
            ConsoleFeature::TitleId => "Current Title ID",
            ConsoleFeature::CpuTemperature => "CPU Temp",
            ConsoleFeature::GpuTemperature => "GPU Temp",
        }
    }
}

/// On-screen notification to post on the console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub message: String,
    pub logo: NotifyLogo,
}

impl NotificationRequest {
    /// Create a new notification request
    pub fn new(message: impl Into<String>, logo: NotifyLogo) -> Self {
        Self {
            message: message.into(),
            logo,
        }
    }
}

/// A single XBDM command line
///
/// The stored text carries no line terminator; the transport appends CRLF
/// when the command is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command(String);

impl Command {
    /// Wrap arbitrary command text
    ///
    /// Trailing line terminators are dropped so the wire form always ends
    /// with exactly one CRLF.
    pub fn raw(text: impl Into<String>) -> Self {
        let text = text.into();
        Command(text.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Query one console attribute
    pub fn console_feature(feature: ConsoleFeature) -> Self {
        Self::console_features(feature.type_id(), feature.params())
    }

    fn console_features(type_id: u8, params: &str) -> Self {
        Command(format!(
            "consolefeatures ver=2 type={} params=\"{}\"",
            type_id, params
        ))
    }

    /// Read `length` bytes of memory at `address`
    ///
    /// `length` is capped at [`MAX_READ_LENGTH`] so the reply fits on one
    /// line.
    pub fn get_memory(address: u64, length: u32) -> XbdmResult<Self> {
        if length > MAX_READ_LENGTH {
            return Err(XbdmError::InvalidInput(format!(
                "Read length {} exceeds the maximum of {} bytes",
                length, MAX_READ_LENGTH
            )));
        }
        Ok(Command(format!("getmem addr=0x{:x} length={}", address, length)))
    }

    /// Read memory from user-entered address (hex) and length (decimal) text
    pub fn get_memory_from_input(address: &str, length: &str) -> XbdmResult<Self> {
        Self::get_memory(parse_address(address)?, parse_length(length)?)
    }

    /// Write hex-encoded bytes to memory at `address`
    ///
    /// The payload must be non-empty, of even length and consist of hex
    /// digits only.
    pub fn set_memory(address: u64, data_hex: &str) -> XbdmResult<Self> {
        let data_hex = data_hex.trim();
        if data_hex.is_empty() {
            return Err(XbdmError::InvalidInput(
                "Memory write payload must not be empty".to_string(),
            ));
        }
        hex_to_bytes(data_hex)?;
        Ok(Command(format!("setmem addr=0x{:x} data={}", address, data_hex)))
    }

    /// Write raw bytes to memory at `address`
    pub fn set_memory_bytes(address: u64, data: &[u8]) -> XbdmResult<Self> {
        Self::set_memory(address, &bytes_to_hex(data))
    }

    /// Write memory from user-entered address (hex) and payload (hex) text
    pub fn set_memory_from_input(address: &str, data_hex: &str) -> XbdmResult<Self> {
        Self::set_memory(parse_address(address)?, data_hex)
    }

    /// Post an on-screen notification
    ///
    /// The message is sent as the uppercase hex of its Windows-1252 bytes,
    /// preceded by the encoded byte count.
    pub fn notify(request: &NotificationRequest) -> XbdmResult<Self> {
        let encoded = encode_cp1252(&request.message)?;
        // Ends in a single `\"`; no extra closing quote follows the params
        let params = format!(
            r"A\0\A\2\2/{}\{}\1\{}\",
            encoded.len(),
            bytes_to_hex(&encoded),
            request.logo.id()
        );
        Ok(Self::console_features(NOTIFY_TYPE, &params))
    }

    /// Reload the running title
    pub fn soft_reboot() -> Self {
        Command("magicboot title=0".to_string())
    }

    /// Power the console off
    pub fn shutdown() -> Self {
        Self::console_features(SHUTDOWN_TYPE, EMPTY_PARAMS)
    }

    /// Command text without terminator
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Command {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Command> for String {
    fn from(command: Command) -> Self {
        command.0
    }
}

/// Parse a hexadecimal memory address, with or without a `0x` prefix
pub fn parse_address(text: &str) -> XbdmResult<u64> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(XbdmError::InvalidInput(format!("Invalid address: {}", text)));
    }
    u64::from_str_radix(digits, 16)
        .map_err(|_| XbdmError::InvalidInput(format!("Address out of range: {}", text)))
}

/// Parse a decimal byte count
pub fn parse_length(text: &str) -> XbdmResult<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(XbdmError::InvalidInput(format!("Invalid length: {}", text)));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| XbdmError::InvalidInput(format!("Length out of range: {}", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_feature_commands() {
        let expected = [
            r#"consolefeatures ver=2 type=13 params="A\0\A\0\""#,
            r#"consolefeatures ver=2 type=17 params="A\0\A\0\""#,
            r#"consolefeatures ver=2 type=10 params="A\0\A\0\""#,
            r#"consolefeatures ver=2 type=16 params="A\0\A\0\""#,
            r#"consolefeatures ver=2 type=15 params="A\0\A\1\0\""#,
            r#"consolefeatures ver=2 type=15 params="A\0\A\1\1\""#,
        ];
        for (feature, line) in ConsoleFeature::ALL.iter().zip(expected) {
            assert_eq!(Command::console_feature(*feature).as_str(), line);
        }
    }

    #[test]
    fn test_memory_commands() {
        assert_eq!(
            Command::get_memory(0xC0000000, 32).unwrap().as_str(),
            "getmem addr=0xc0000000 length=32"
        );
        assert_eq!(
            Command::get_memory_from_input("0x8200ABCD", " 4 ").unwrap().as_str(),
            "getmem addr=0x8200abcd length=4"
        );
        assert_eq!(
            Command::set_memory(0x82000000, "60000000").unwrap().as_str(),
            "setmem addr=0x82000000 data=60000000"
        );
        assert_eq!(
            Command::set_memory_bytes(0x10, &[0xDE, 0xAD]).unwrap().as_str(),
            "setmem addr=0x10 data=DEAD"
        );
    }

    #[test]
    fn test_memory_input_rejected() {
        assert!(matches!(
            Command::set_memory(0x82000000, "ABC"),
            Err(XbdmError::InvalidInput(_))
        ));
        assert!(Command::set_memory(0x82000000, "").is_err());
        assert!(Command::set_memory(0x82000000, "GG").is_err());
        assert!(Command::get_memory_from_input("8200XYZ", "16").is_err());
        assert!(Command::get_memory_from_input("82000000", "-1").is_err());
        assert!(Command::get_memory_from_input("", "16").is_err());
        assert!(Command::set_memory_from_input("0x", "00").is_err());
        assert!(parse_address("1FFFFFFFFFFFFFFFF").is_err());
    }

    #[test]
    fn test_read_length_fits_reply_line() {
        let command = Command::get_memory(0, MAX_READ_LENGTH).unwrap();
        assert!(command.as_str().ends_with("length=32640"));
        assert!(10 + 2 * MAX_READ_LENGTH as usize <= MAX_LINE_LENGTH);

        assert!(matches!(
            Command::get_memory(0, MAX_READ_LENGTH + 1),
            Err(XbdmError::InvalidInput(_))
        ));
        assert!(matches!(
            Command::get_memory_from_input("0x82000000", "40000"),
            Err(XbdmError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_notify_command() {
        let request = NotificationRequest::new("Hi", NotifyLogo::AchievementUnlocked);
        assert_eq!(
            Command::notify(&request).unwrap().as_str(),
            r#"consolefeatures ver=2 type=12 params="A\0\A\2\2/2\4869\1\27\""#
        );
    }

    #[test]
    fn test_notify_counts_encoded_bytes() {
        let request = NotificationRequest::new("€5", NotifyLogo::XboxLogo);
        assert_eq!(
            Command::notify(&request).unwrap().as_str(),
            r#"consolefeatures ver=2 type=12 params="A\0\A\2\2/2\8035\1\0\""#
        );
        let request = NotificationRequest::new("日本", NotifyLogo::XboxLogo);
        assert!(Command::notify(&request).is_err());
    }

    #[test]
    fn test_power_commands() {
        assert_eq!(Command::soft_reboot().as_str(), "magicboot title=0");
        assert_eq!(
            Command::shutdown().as_str(),
            r#"consolefeatures ver=2 type=11 params="A\0\A\0\""#
        );
    }

    #[test]
    fn test_raw_strips_terminator() {
        assert_eq!(Command::raw("dbgname\r\n").as_str(), "dbgname");
        assert_eq!(Command::raw("dbgname\n").to_string(), "dbgname");
    }
}
