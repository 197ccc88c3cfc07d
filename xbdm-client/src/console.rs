//! Console operations
//!
//! [`XbdmClient`] is what a front-end talks to. Every operation builds its
//! command first, so malformed input is rejected without touching the
//! network, then runs one exchange on the cached connection for the target
//! endpoint.

use crate::config::ClientConfig;
use crate::connection::ConnectionCache;
use crate::dispatcher::{Dispatcher, JobHandle};
use std::future::Future;
use std::sync::Arc;
use xbdm_application::response::extract_data_field;
use xbdm_application::{
    Command, ConsoleFeature, ConsoleInfo, MemorySpan, NotificationRequest, Response,
};
use xbdm_core::{Endpoint, XbdmError, XbdmResult};

/// Outcome of a memory read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryRead {
    /// The reply carried a payload
    Data(MemorySpan),
    /// The reply had no `data=` field; the full reply text is kept for display
    Empty { response: String },
}

impl MemoryRead {
    pub fn span(&self) -> Option<&MemorySpan> {
        match self {
            MemoryRead::Data(span) => Some(span),
            MemoryRead::Empty { .. } => None,
        }
    }
}

/// Front-end facing XBDM client
///
/// Cheap to clone; clones share the connection cache and the worker limit.
#[derive(Debug, Clone)]
pub struct XbdmClient {
    cache: Arc<ConnectionCache>,
    dispatcher: Dispatcher,
}

impl XbdmClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            cache: Arc::new(ConnectionCache::new(config.connection)),
            dispatcher: Dispatcher::new(config.max_workers),
        }
    }

    pub fn cache(&self) -> &ConnectionCache {
        &self.cache
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Send a prepared command and return the reply
    pub async fn send(&self, endpoint: &Endpoint, command: &Command) -> XbdmResult<Response> {
        self.cache.acquire(endpoint).await?.send(command).await
    }

    /// Query one console feature and return its extracted value
    pub async fn query(&self, endpoint: &Endpoint, feature: ConsoleFeature) -> XbdmResult<String> {
        let command = Command::console_feature(feature);
        Ok(self.send(endpoint, &command).await?.value())
    }

    /// Run all six feature queries in order
    pub async fn console_info(&self, endpoint: &Endpoint) -> XbdmResult<ConsoleInfo> {
        let mut values: [String; 6] = Default::default();
        for (slot, feature) in values.iter_mut().zip(ConsoleFeature::ALL) {
            *slot = self.query(endpoint, feature).await?;
        }
        Ok(ConsoleInfo::from_values(values))
    }

    /// Read `length` bytes at `address`
    ///
    /// A reply without a `data=` field is not an error; it comes back as
    /// [`MemoryRead::Empty`]. A `data=` field that is not valid hex is a
    /// protocol fault.
    pub async fn read_memory(
        &self,
        endpoint: &Endpoint,
        address: u64,
        length: u32,
    ) -> XbdmResult<MemoryRead> {
        let command = Command::get_memory(address, length)?;
        let text = self.send(endpoint, &command).await?.text();

        match extract_data_field(&text) {
            Some(data) => MemorySpan::from_hex(address, data)
                .map(MemoryRead::Data)
                .map_err(|e| XbdmError::Protocol(format!("malformed memory payload: {}", e))),
            None => Ok(MemoryRead::Empty { response: text }),
        }
    }

    /// Write hex-encoded bytes at `address`
    pub async fn write_memory(
        &self,
        endpoint: &Endpoint,
        address: u64,
        data_hex: &str,
    ) -> XbdmResult<Response> {
        let command = Command::set_memory(address, data_hex)?;
        self.send(endpoint, &command).await
    }

    /// Post an on-screen notification
    pub async fn notify(
        &self,
        endpoint: &Endpoint,
        request: &NotificationRequest,
    ) -> XbdmResult<Response> {
        let command = Command::notify(request)?;
        self.send(endpoint, &command).await
    }

    pub async fn soft_reboot(&self, endpoint: &Endpoint) -> XbdmResult<Response> {
        log::info!("Soft reboot of {}", endpoint);
        self.send(endpoint, &Command::soft_reboot()).await
    }

    pub async fn shutdown(&self, endpoint: &Endpoint) -> XbdmResult<Response> {
        log::info!("Shutdown of {}", endpoint);
        self.send(endpoint, &Command::shutdown()).await
    }

    /// Run an action on the worker pool
    ///
    /// The action receives its own handle to this client. Its result can be
    /// awaited through the returned [`JobHandle`] or ignored.
    pub fn run<F, Fut, T>(&self, action: F) -> JobHandle<T>
    where
        F: FnOnce(XbdmClient) -> Fut,
        Fut: Future<Output = XbdmResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        self.dispatcher.submit(action(self.clone()))
    }
}

impl Default for XbdmClient {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
