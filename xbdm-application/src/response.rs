//! Response model and parsers for XBDM replies
//!
//! A reply is a status line (`<code>- <text>`) optionally followed by a
//! continuation block that ends with a lone `.` line. The helpers here pull
//! the useful fields out of that text; a missing field is reported as
//! `None` rather than an error so callers can show the raw reply instead.

use std::fmt;

/// Status-line markers announcing a continuation block
const CONTINUATION_MARKERS: [&str; 2] = ["response follows", "send binary data"];

/// Line that terminates a continuation block
pub const BLOCK_TERMINATOR: &str = ".";

/// Whether a status line announces a continuation block (case-insensitive)
pub fn announces_continuation(status: &str) -> bool {
    let lower = status.to_ascii_lowercase();
    CONTINUATION_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Reply to one command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    /// First line of the reply
    pub status: String,
    /// Continuation lines, terminator excluded
    pub body: Vec<String>,
}

impl Response {
    /// Create a single-line response
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            body: Vec::new(),
        }
    }

    /// Create a response with a continuation block
    pub fn with_body(status: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            status: status.into(),
            body,
        }
    }

    /// Parse a raw reply as read off the wire
    ///
    /// Lines may be separated by `\r\n` or `\n`. When the status line
    /// announces a continuation block, lines up to the first lone `.` form
    /// the body; anything after the terminator is ignored.
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw.lines();
        let status = lines.next().unwrap_or_default().to_string();
        let body = if announces_continuation(&status) {
            lines
                .take_while(|line| *line != BLOCK_TERMINATOR)
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };
        Self { status, body }
    }

    /// Numeric status code (e.g. 200, 202, 402) if the status line has one
    pub fn status_code(&self) -> Option<u16> {
        let digits: String = self
            .status
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.len() != 3 {
            return None;
        }
        digits.parse().ok()
    }

    /// Whether the console reported success (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self.status_code(), Some(200..=299))
    }

    /// Whether the status line announced a continuation block
    pub fn is_multiline(&self) -> bool {
        announces_continuation(&self.status)
    }

    /// Status line, then each body line preceded by a line break
    pub fn text(&self) -> String {
        let mut text = self.status.clone();
        for line in &self.body {
            text.push('\n');
            text.push_str(line);
        }
        text
    }

    /// Single value carried by the status line
    pub fn value(&self) -> String {
        extract_value(&self.status)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Extract the scalar value of a single-line reply
///
/// Returns everything after the first space with every literal `value=`
/// removed and surrounding whitespace trimmed. A line without a space is
/// returned unchanged.
pub fn extract_value(line: &str) -> String {
    match line.split_once(' ') {
        Some((_, rest)) => rest.replace("value=", "").trim().to_string(),
        None => line.to_string(),
    }
}

/// Locate the `data=` field of a reply
///
/// Returns the run of characters after the first `data=` up to the next
/// whitespace or the end of the text, or `None` when the reply has no data
/// field (e.g. an error reply).
pub fn extract_data_field(response: &str) -> Option<&str> {
    const KEY: &str = "data=";
    let start = response.find(KEY)? + KEY.len();
    let rest = &response[start..];
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Keep only directory-listing lines (those containing `id=`)
///
/// Matching lines are trimmed and each followed by a line break. When no
/// line matches the input text is returned, so error replies stay
/// visible.
pub fn parse_dir_listing(response: &str) -> String {
    let listing: String = response
        .split('\n')
        .filter(|line| line.contains("id="))
        .map(|line| format!("{}\n", line.trim()))
        .collect();
    if listing.is_empty() {
        response.to_string()
    } else {
        listing
    }
}
