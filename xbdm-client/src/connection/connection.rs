//! XBDM connection
//!
//! A [`Connection`] owns one TCP stream to one console and performs the
//! command/response exchange of the XBDM line protocol:
//!
//! 1. write the command terminated by CRLF
//! 2. read the status line
//! 3. if the status line announces more data (`response follows`,
//!    `send binary data`), read lines until a lone `.`
//!
//! Exchanges on one connection are serialized by an async mutex. A timeout,
//! a peer EOF or any other transport fault tears the stream down; the next
//! [`Connection::send`] reopens it transparently.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use xbdm_client::{Connection, ConnectionSettings};
//! use xbdm_core::Endpoint;
//!
//! # async fn demo() -> xbdm_core::XbdmResult<()> {
//! let conn = Connection::open(Endpoint::with_default_port("10.0.0.17"), ConnectionSettings::default()).await?;
//! let response = conn.send("dbgname").await?;
//! println!("{}", response);
//! conn.close().await?;
//! # Ok(())
//! # }
//! ```

use super::settings::ConnectionSettings;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use xbdm_application::response::{BLOCK_TERMINATOR, Response, announces_continuation};
use xbdm_core::{Endpoint, XbdmError, XbdmResult};
use xbdm_transport::{LineTransport, StreamAccessor, TcpTransport, TransportLayer};

/// Status code of the greeting line sent on connect
const BANNER_STATUS: u16 = 201;

/// Open stream plus what is still owed on it
#[derive(Debug)]
struct Link {
    transport: TcpTransport,
    /// The greeting line did not arrive within the banner timeout and may
    /// still precede the first reply
    banner_pending: bool,
}

impl Link {
    fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    async fn close(&mut self) -> XbdmResult<()> {
        self.transport.close().await
    }
}

fn is_banner(status: &str) -> bool {
    Response::new(status).status_code() == Some(BANNER_STATUS) && !announces_continuation(status)
}

/// Live connection to one console's control service
#[derive(Debug)]
pub struct Connection {
    endpoint: Endpoint,
    settings: ConnectionSettings,
    link: Mutex<Option<Link>>,
    connected: AtomicBool,
}

impl Connection {
    /// Connect to `endpoint`
    ///
    /// When the endpoint's port is the configured banner port, one greeting
    /// line is read and discarded. A banner slower than the banner timeout
    /// is discarded when it shows up ahead of the first reply. A missing
    /// banner is not an error.
    pub async fn open(endpoint: Endpoint, settings: ConnectionSettings) -> XbdmResult<Self> {
        let link = Self::connect(&endpoint, &settings).await?;
        log::info!("Connected to {}", endpoint);
        Ok(Self {
            endpoint,
            settings,
            connected: AtomicBool::new(!link.is_closed()),
            link: Mutex::new(Some(link)),
        })
    }

    async fn connect(endpoint: &Endpoint, settings: &ConnectionSettings) -> XbdmResult<Link> {
        let mut transport = TcpTransport::new(settings.tcp_settings(endpoint.clone()));
        transport.open().await?;
        let mut banner_pending = false;

        if settings.expects_banner(endpoint) {
            transport.set_timeout(Some(settings.banner_timeout)).await?;
            match transport.read_line().await {
                Ok(Some(banner)) => log::debug!("{} banner: {}", endpoint, banner),
                Ok(None) => log::debug!("{} closed before sending a banner", endpoint),
                Err(XbdmError::Timeout) => {
                    log::debug!("No banner from {} yet", endpoint);
                    banner_pending = true;
                }
                Err(e) => {
                    log::debug!("Bad banner from {}: {}", endpoint, e);
                    transport.close().await?;
                }
            }
            transport.set_timeout(Some(settings.read_timeout)).await?;
        }

        Ok(Link {
            transport,
            banner_pending,
        })
    }

    /// Endpoint this connection is bound to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Settings this connection was opened with
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Best-effort liveness check
    ///
    /// True while a stream is held that has not hit EOF or a fault. A peer
    /// that went away silently is only noticed by the next read.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Send one command and read its complete reply
    ///
    /// # Errors
    /// - `Timeout` if a reply line does not arrive within the read timeout
    /// - `ClosedByPeer` if the console closes before the status line
    /// - `Protocol` if the stream ends inside a continuation block
    /// - `Connection` on connect or I/O failure
    ///
    /// Every one of these closes the stream before returning.
    pub async fn send(&self, command: impl AsRef<str>) -> XbdmResult<Response> {
        let command = command.as_ref();
        let mut guard = self.link.lock().await;

        if guard.as_ref().is_none_or(Link::is_closed) {
            if let Some(mut stale) = guard.take() {
                let _ = stale.close().await;
            }
            log::info!("Reopening connection to {}", self.endpoint);
            match Self::connect(&self.endpoint, &self.settings).await {
                Ok(link) => {
                    *guard = Some(link);
                }
                Err(e) => {
                    self.connected.store(false, Ordering::SeqCst);
                    return Err(e);
                }
            }
        }

        let link = guard.as_mut().ok_or(XbdmError::NotConnected)?;
        log::debug!("{} <- {}", self.endpoint, command);
        let result = Self::exchange(link, command).await;

        if let Err(e) = &result {
            if e.is_transport() {
                log::warn!("Dropping connection to {}: {}", self.endpoint, e);
                if let Some(mut broken) = guard.take() {
                    let _ = broken.close().await;
                }
            }
        }
        self.connected
            .store(guard.as_ref().is_some_and(|link| !link.is_closed()), Ordering::SeqCst);
        result
    }

    async fn exchange(link: &mut Link, command: &str) -> XbdmResult<Response> {
        let transport = &mut link.transport;
        transport.write_line(command).await?;

        let mut status = transport.read_line().await?.ok_or(XbdmError::ClosedByPeer)?;
        if link.banner_pending {
            link.banner_pending = false;
            if is_banner(&status) {
                log::debug!("Late banner: {}", status);
                status = transport.read_line().await?.ok_or(XbdmError::ClosedByPeer)?;
            }
        }
        let mut response = Response::new(status);

        if response.is_multiline() {
            loop {
                match transport.read_line().await? {
                    Some(line) if line == BLOCK_TERMINATOR => break,
                    Some(line) => response.body.push(line),
                    None => {
                        return Err(XbdmError::Protocol(format!(
                            "Stream ended after {} continuation lines without terminator",
                            response.body.len()
                        )));
                    }
                }
            }
        }

        Ok(response)
    }

    /// Close the stream
    ///
    /// Idempotent. A later [`Connection::send`] reopens the connection.
    pub async fn close(&self) -> XbdmResult<()> {
        let mut guard = self.link.lock().await;
        self.connected.store(false, Ordering::SeqCst);
        if let Some(mut link) = guard.take() {
            link.close().await?;
            log::info!("Disconnected from {}", self.endpoint);
        }
        Ok(())
    }
}
