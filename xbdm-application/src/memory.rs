//! Memory spans and their display views

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use xbdm_core::codec::{bytes_to_hex_display, hex_to_bytes, to_ascii, to_float32, to_int32_le};
use xbdm_core::{XbdmError, XbdmResult};

/// Bytes read from one range of the target's memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySpan {
    pub address: u64,
    pub bytes: Vec<u8>,
}

impl MemorySpan {
    /// Create a new span
    pub fn new(address: u64, bytes: Vec<u8>) -> Self {
        Self { address, bytes }
    }

    /// Build a span from the hex payload of a `getmem` reply
    pub fn from_hex(address: u64, data_hex: &str) -> XbdmResult<Self> {
        Ok(Self::new(address, hex_to_bytes(data_hex)?))
    }

    /// Number of bytes in the span
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Little-endian 32-bit integers; 1-3 trailing bytes are ignored
    pub fn int32_values(&self) -> Vec<i32> {
        (0..self.bytes.len() / 4)
            .filter_map(|i| to_int32_le(&self.bytes, i * 4).ok())
            .collect()
    }

    /// Little-endian binary32 floats; 1-3 trailing bytes are ignored
    pub fn float_values(&self) -> Vec<f32> {
        (0..self.bytes.len() / 4)
            .filter_map(|i| to_float32(&self.bytes, i * 4).ok())
            .collect()
    }

    /// Render the span in the given view
    pub fn render(&self, view: MemoryView) -> String {
        match view {
            MemoryView::Hex => bytes_to_hex_display(&self.bytes),
            MemoryView::Ascii => to_ascii(&self.bytes),
            MemoryView::Int32 => self
                .int32_values()
                .iter()
                .map(|v| format!("0x{:08X}", *v as u32))
                .collect::<Vec<_>>()
                .join(" "),
            MemoryView::Float => self
                .float_values()
                .iter()
                .map(|v| format!("{:.6}", v))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// How a memory span is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MemoryView {
    #[default]
    Hex,
    Ascii,
    Int32,
    Float,
}

impl MemoryView {
    pub const ALL: [MemoryView; 4] = [
        MemoryView::Hex,
        MemoryView::Ascii,
        MemoryView::Int32,
        MemoryView::Float,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MemoryView::Hex => "Hex",
            MemoryView::Ascii => "ASCII",
            MemoryView::Int32 => "Int32",
            MemoryView::Float => "Float",
        }
    }
}

impl FromStr for MemoryView {
    type Err = XbdmError;

    fn from_str(s: &str) -> XbdmResult<Self> {
        MemoryView::ALL
            .into_iter()
            .find(|view| view.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| XbdmError::InvalidInput(format!("Unknown memory view: {}", s)))
    }
}

impl fmt::Display for MemoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> MemorySpan {
        // 1, -2, 1.5f32, then two trailing bytes
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1i32.to_le_bytes());
        bytes.extend_from_slice(&(-2i32).to_le_bytes());
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        bytes.extend_from_slice(b"Hi");
        MemorySpan::new(0x82000000, bytes)
    }

    #[test]
    fn test_int32_view_ignores_tail() {
        let span = span();
        assert_eq!(span.len(), 14);
        assert_eq!(span.int32_values(), vec![1, -2, 0x3FC00000]);
        assert_eq!(
            span.render(MemoryView::Int32),
            "0x00000001 0xFFFFFFFE 0x3FC00000"
        );
    }

    #[test]
    fn test_float_view() {
        let span = span();
        assert_eq!(span.float_values()[2], 1.5);
        assert!(span.render(MemoryView::Float).ends_with("1.500000"));
    }

    #[test]
    fn test_ascii_and_hex_views() {
        let span = MemorySpan::from_hex(0x10, "48656C6C6F00").unwrap();
        assert_eq!(span.render(MemoryView::Ascii), "Hello.");
        assert_eq!(span.render(MemoryView::Hex), "48 65 6C 6C 6F 00");
        assert!(MemorySpan::from_hex(0x10, "486").is_err());
    }

    #[test]
    fn test_short_span_has_no_words() {
        let span = MemorySpan::new(0, vec![1, 2, 3]);
        assert!(span.int32_values().is_empty());
        assert_eq!(span.render(MemoryView::Float), "");
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("ascii".parse::<MemoryView>().unwrap(), MemoryView::Ascii);
        assert_eq!("Int32".parse::<MemoryView>().unwrap(), MemoryView::Int32);
        assert!("binary".parse::<MemoryView>().is_err());
    }
}
