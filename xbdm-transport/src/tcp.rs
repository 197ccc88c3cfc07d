//! TCP transport implementation

use crate::stream::{LineTransport, StreamAccessor, TransportLayer};
use async_trait::async_trait;
use bytes::BytesMut;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use xbdm_core::{Endpoint, MAX_LINE_LENGTH, XbdmError, XbdmResult};

const READ_CHUNK: usize = 1024;

/// Wrapper for TcpStream that implements Debug
struct DebugTcpStream(TcpStream);

impl fmt::Debug for DebugTcpStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpStream").finish()
    }
}

impl Deref for DebugTcpStream {
    type Target = TcpStream;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DebugTcpStream {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// TCP transport layer settings
#[derive(Debug, Clone)]
pub struct TcpSettings {
    pub endpoint: Endpoint,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl TcpSettings {
    /// Create new TCP settings with a 5 second read timeout
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            connect_timeout: Some(Duration::from_secs(5)),
            timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Create TCP settings with timeout
    pub fn with_timeout(endpoint: Endpoint, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..Self::new(endpoint)
        }
    }
}

/// TCP transport layer implementation
#[derive(Debug)]
pub struct TcpTransport {
    stream: Option<DebugTcpStream>,
    settings: TcpSettings,
    read_buf: BytesMut,
    closed: bool,
}

impl TcpTransport {
    /// Create a new TCP transport layer
    pub fn new(settings: TcpSettings) -> Self {
        Self {
            stream: None,
            settings,
            read_buf: BytesMut::with_capacity(READ_CHUNK),
            closed: true,
        }
    }

    /// Endpoint this transport connects to
    pub fn endpoint(&self) -> &Endpoint {
        &self.settings.endpoint
    }

    fn not_connected() -> XbdmError {
        XbdmError::Connection(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "TCP stream not connected",
        ))
    }

    /// Split the first complete line off the read buffer
    fn take_line(&mut self) -> Option<String> {
        let pos = self.read_buf.iter().position(|&b| b == b'\n')?;
        let mut line = self.read_buf.split_to(pos + 1);
        line.truncate(pos);
        if line.last() == Some(&b'\r') {
            line.truncate(pos - 1);
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

#[async_trait]
impl TransportLayer for TcpTransport {
    async fn open(&mut self) -> XbdmResult<()> {
        if !self.closed {
            return Err(XbdmError::Connection(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Connection has already been opened",
            )));
        }

        let address = (
            self.settings.endpoint.host().to_string(),
            self.settings.endpoint.port(),
        );

        // Apply timeout to connection establishment if specified
        let stream = if let Some(timeout) = self.settings.connect_timeout {
            tokio::time::timeout(timeout, TcpStream::connect(address))
                .await
                .map_err(|_| XbdmError::Timeout)??
        } else {
            TcpStream::connect(address).await?
        };

        // Commands are single short lines answered immediately.
        let _ = stream.set_nodelay(true);

        log::debug!("TCP stream open to {}", self.settings.endpoint);
        self.stream = Some(DebugTcpStream(stream));
        self.read_buf.clear();
        self.closed = false;
        Ok(())
    }
}

#[async_trait]
impl StreamAccessor for TcpTransport {
    async fn set_timeout(&mut self, timeout: Option<Duration>) -> XbdmResult<()> {
        self.settings.timeout = timeout;
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> XbdmResult<usize> {
        let stream = self.stream.as_mut().ok_or_else(Self::not_connected)?;

        let result = if let Some(timeout) = self.settings.timeout {
            tokio::time::timeout(timeout, stream.read(buf))
                .await
                .map_err(|_| XbdmError::Timeout)?
                .map_err(XbdmError::Connection)
        } else {
            stream.read(buf).await.map_err(XbdmError::Connection)
        };

        match result {
            Ok(0) => {
                self.closed = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) => {
                self.closed = true;
                Err(e)
            }
        }
    }

    async fn write(&mut self, buf: &[u8]) -> XbdmResult<usize> {
        let stream = self.stream.as_mut().ok_or_else(Self::not_connected)?;

        let result = if let Some(timeout) = self.settings.timeout {
            tokio::time::timeout(timeout, stream.write(buf))
                .await
                .map_err(|_| XbdmError::Timeout)?
                .map_err(XbdmError::Connection)
        } else {
            stream.write(buf).await.map_err(XbdmError::Connection)
        };

        if result.is_err() {
            self.closed = true;
        }
        result
    }

    async fn flush(&mut self) -> XbdmResult<()> {
        let stream = self.stream.as_mut().ok_or_else(Self::not_connected)?;

        stream.flush().await.map_err(XbdmError::Connection)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    async fn close(&mut self) -> XbdmResult<()> {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
            log::debug!("TCP stream to {} closed", self.settings.endpoint);
        }
        self.read_buf.clear();
        self.closed = true;
        Ok(())
    }
}

#[async_trait]
impl LineTransport for TcpTransport {
    async fn read_line(&mut self) -> XbdmResult<Option<String>> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }
            if self.read_buf.len() > MAX_LINE_LENGTH {
                self.closed = true;
                return Err(XbdmError::Protocol(format!(
                    "Line exceeds {} bytes without terminator",
                    MAX_LINE_LENGTH
                )));
            }

            let n = self.read(&mut chunk).await?;
            if n == 0 {
                if self.read_buf.is_empty() {
                    return Ok(None);
                }
                // Unterminated final line before EOF
                let rest = self.read_buf.split();
                return Ok(Some(String::from_utf8_lossy(&rest).into_owned()));
            }
            self.read_buf.extend_from_slice(&chunk[..n]);
        }
    }
}
