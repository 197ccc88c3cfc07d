use thiserror::Error;

/// Main error type for XBDM operations
#[derive(Error, Debug)]
pub enum XbdmError {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Connection closed by XBDM")]
    ClosedByPeer,

    #[error("Not connected")]
    NotConnected,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Worker terminated before delivering a result")]
    WorkerLost,
}

impl XbdmError {
    /// Whether this fault leaves the underlying stream unusable
    ///
    /// Transport faults force the owning connection to be torn down; the
    /// next exchange reopens it.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            XbdmError::Connection(_)
                | XbdmError::Timeout
                | XbdmError::ClosedByPeer
                | XbdmError::NotConnected
                | XbdmError::Protocol(_)
        )
    }
}

/// Result type alias for XBDM operations
pub type XbdmResult<T> = Result<T, XbdmError>;
