//! Error types for lanprobe core.

use std::net::SocketAddr;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Error kinds for the discovery probe and unicast send.
///
/// A receive timeout is not represented here: a full quiet interval is
/// the normal end-of-collection signal, not a failure.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to set up discovery socket: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Failed to encode discovery payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Failed to send datagram: {0}")]
    Send(#[source] std::io::Error),

    #[error("Receive failed: {0}")]
    Receive(#[source] std::io::Error),

    #[error("Invalid UTF-8 in reply from {addr}: {source}")]
    Decode {
        addr: SocketAddr,
        #[source]
        source: FromUtf8Error,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
