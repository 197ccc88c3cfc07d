//! Stream accessor traits for the transport layer

use async_trait::async_trait;
use std::time::Duration;
use xbdm_core::{XbdmError, XbdmResult};

/// Stream accessor interface to access a physical stream to a remote console
#[async_trait]
pub trait StreamAccessor: Send + Sync {
    /// Set the read timeout
    ///
    /// # Arguments
    ///
    /// * `timeout` - The timeout duration. None means infinite timeout.
    async fn set_timeout(&mut self, timeout: Option<Duration>) -> XbdmResult<()>;

    /// Read data from the stream
    ///
    /// # Returns
    ///
    /// Number of bytes read, or 0 if EOF
    async fn read(&mut self, buf: &mut [u8]) -> XbdmResult<usize>;

    /// Write data to the stream
    ///
    /// # Returns
    ///
    /// Number of bytes written
    async fn write(&mut self, buf: &[u8]) -> XbdmResult<usize>;

    /// Write all data to the stream
    async fn write_all(&mut self, buf: &[u8]) -> XbdmResult<()> {
        let mut written = 0;
        while written < buf.len() {
            let n = self.write(&buf[written..]).await?;
            if n == 0 {
                return Err(XbdmError::Connection(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "Failed to write all data",
                )));
            }
            written += n;
        }
        Ok(())
    }

    /// Flush any buffered data
    async fn flush(&mut self) -> XbdmResult<()>;

    /// Check if the stream is closed
    fn is_closed(&self) -> bool;

    /// Close the stream
    async fn close(&mut self) -> XbdmResult<()>;
}

/// Transport layer trait that extends StreamAccessor
#[async_trait]
pub trait TransportLayer: StreamAccessor {
    /// Open the physical layer connection
    async fn open(&mut self) -> XbdmResult<()>;
}

/// Line framing on top of a stream
///
/// XBDM is a text protocol: every command and every reply line ends with
/// CRLF. Implementations buffer partial input between calls.
#[async_trait]
pub trait LineTransport: StreamAccessor {
    /// Read one line without its terminator
    ///
    /// # Returns
    ///
    /// `None` when the peer closed the stream before any further byte
    async fn read_line(&mut self) -> XbdmResult<Option<String>>;

    /// Write one line, terminated by exactly one CRLF, and flush
    async fn write_line(&mut self, line: &str) -> XbdmResult<()> {
        let wire = terminate_line(line);
        self.write_all(wire.as_bytes()).await?;
        self.flush().await
    }
}

/// Normalize a command line to end with exactly one CRLF
///
/// Any trailing `\r`/`\n` characters are stripped first, so `"x\n"`,
/// `"x\r\n"` and `"x"` all become `"x\r\n"`.
pub fn terminate_line(line: &str) -> String {
    let mut wire = line.trim_end_matches(['\r', '\n']).to_string();
    wire.push_str("\r\n");
    wire
}
