//! Byte and hexadecimal codecs
//!
//! Pure conversions between hex text and raw bytes, plus little-endian
//! reinterpretation of 4-byte groups. Memory replies carry their payload as
//! a hex string; these helpers turn it into bytes and back into the views
//! shown to the user.

use crate::error::{XbdmError, XbdmResult};
use std::fmt::Write;

/// Number of bytes per row in [`bytes_to_hex_display`]
pub const HEX_DISPLAY_ROW: usize = 16;

/// Decode a hex string into bytes
///
/// The input must have an even number of characters, all of them hex digits
/// (either case). Each pair decodes to one byte, most significant nibble
/// first.
pub fn hex_to_bytes(hex: &str) -> XbdmResult<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return Err(XbdmError::InvalidInput(format!(
            "Hex string must have even length, got {}",
            hex.len()
        )));
    }
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(XbdmError::InvalidInput(format!(
            "Invalid hex digit '{}' in {}",
            c, hex
        )));
    }

    Ok(hex
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1]))
        .collect())
}

fn nibble(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// Encode bytes as contiguous uppercase hex
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02X}", byte);
    }
    out
}

/// Render bytes as a hex dump
///
/// Two uppercase digits per byte separated by single spaces, with a line
/// break after every 16th byte.
pub fn bytes_to_hex_display(bytes: &[u8]) -> String {
    bytes
        .chunks(HEX_DISPLAY_ROW)
        .map(|row| {
            row.iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn word_at(bytes: &[u8], offset: usize) -> XbdmResult<[u8; 4]> {
    offset
        .checked_add(4)
        .and_then(|end| bytes.get(offset..end))
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| {
            XbdmError::InvalidInput(format!(
                "Need 4 bytes at offset {}, buffer has {}",
                offset,
                bytes.len()
            ))
        })
}

/// Read a little-endian signed 32-bit integer at `offset`
pub fn to_int32_le(bytes: &[u8], offset: usize) -> XbdmResult<i32> {
    Ok(i32::from_le_bytes(word_at(bytes, offset)?))
}

/// Reinterpret the little-endian 4-byte pattern at `offset` as an IEEE-754
/// binary32 value
pub fn to_float32(bytes: &[u8], offset: usize) -> XbdmResult<f32> {
    Ok(f32::from_bits(u32::from_le_bytes(word_at(bytes, offset)?)))
}

/// Render bytes as ASCII, replacing anything outside 0x20..=0x7E with `.`
pub fn to_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if (0x20..=0x7E).contains(&b) { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("DEADbeef").unwrap(), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_rejects_bad_input() {
        assert!(matches!(hex_to_bytes("ABC"), Err(XbdmError::InvalidInput(_))));
        assert!(matches!(hex_to_bytes("ZZ"), Err(XbdmError::InvalidInput(_))));
        assert!(hex_to_bytes("+F").is_err());
        assert!(hex_to_bytes("é0").is_err());
    }

    #[test]
    fn test_hex_round_trip_normalizes_case() {
        for s in ["00", "0a1B2c3D", "ffFFffFF", "7f80"] {
            assert_eq!(bytes_to_hex(&hex_to_bytes(s).unwrap()), s.to_uppercase());
        }
    }

    #[test]
    fn test_hex_display_layout() {
        let bytes: Vec<u8> = (0u8..18).collect();
        let display = bytes_to_hex_display(&bytes);
        let rows: Vec<&str> = display.split('\n').collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F");
        assert_eq!(rows[1], "10 11");
        assert_eq!(bytes_to_hex_display(&[]), "");
    }

    #[test]
    fn test_int32_little_endian() {
        let bytes = [0x78, 0x56, 0x34, 0x12, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(to_int32_le(&bytes, 0).unwrap(), 0x12345678);
        assert_eq!(to_int32_le(&bytes, 4).unwrap(), -1);
        assert_eq!(to_int32_le(&bytes, 2).unwrap(), i32::from_le_bytes([0x34, 0x12, 0xFF, 0xFF]));
        assert!(to_int32_le(&bytes, 5).is_err());
        assert!(to_int32_le(&bytes, usize::MAX).is_err());
    }

    #[test]
    fn test_float32_bit_reinterpretation() {
        let one = 1.0f32.to_le_bytes();
        assert_eq!(to_float32(&one, 0).unwrap(), 1.0);

        let bytes = [0x00, 0x00, 0xC0, 0x7F];
        assert!(to_float32(&bytes, 0).unwrap().is_nan());

        let pi = std::f32::consts::PI.to_bits().to_le_bytes();
        assert_eq!(to_float32(&pi, 0).unwrap().to_bits(), std::f32::consts::PI.to_bits());
    }

    #[test]
    fn test_ascii_rendering() {
        assert_eq!(to_ascii(b"Hi!\x00\x1F\x7F~ "), "Hi!...~ ");
        assert_eq!(to_ascii(&[0x80, 0xFF, 0x41]), "..A");
    }
}
