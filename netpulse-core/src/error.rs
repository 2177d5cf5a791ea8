//! Error types for NetPulse

use thiserror::Error;

/// Result type alias for NetPulse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for NetPulse
#[derive(Error, Debug)]
pub enum Error {
    /// Network I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Capture error (fatal for the session)
    #[error("Packet capture error: {0}")]
    Capture(String),

    /// Interface not found
    #[error("Interface '{0}' not found")]
    InterfaceNotFound(String),

    /// Invalid configuration value
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },
}

impl Error {
    /// Create a capture error with a custom message
    pub fn capture<S: Into<String>>(msg: S) -> Self {
        Error::Capture(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(name: S, reason: S) -> Self {
        Error::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Per-frame parse failure.
///
/// Recoverable: the frame is dropped, the drop counter is incremented,
/// and ingestion continues. Never surfaced to the consumer as a
/// session failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No IPv4 or IPv6 header present in the frame
    #[error("frame has no network-layer header")]
    NoNetworkLayer,

    /// Network-layer header present but too short to yield addresses
    #[error("network-layer header truncated")]
    TruncatedNetworkHeader,
}
