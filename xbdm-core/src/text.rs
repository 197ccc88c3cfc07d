//! Notification text encoding
//!
//! Notification messages travel as uppercase hex of their Windows-1252
//! bytes. The code page is fixed rather than taken from the platform so the
//! same text always produces the same command.

use crate::codec::bytes_to_hex;
use crate::error::{XbdmError, XbdmResult};
use encoding_rs::WINDOWS_1252;

/// Encode text to Windows-1252 bytes
///
/// Characters without a Windows-1252 mapping are rejected instead of being
/// replaced.
pub fn encode_cp1252(text: &str) -> XbdmResult<Vec<u8>> {
    let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
    if unmappable {
        return Err(XbdmError::InvalidInput(format!(
            "Text contains characters outside Windows-1252: {}",
            text
        )));
    }
    Ok(bytes.into_owned())
}

/// Encode text to Windows-1252 and render it as uppercase hex with no
/// separators
pub fn to_hex_upper(text: &str) -> XbdmResult<String> {
    Ok(bytes_to_hex(&encode_cp1252(text)?))
}
