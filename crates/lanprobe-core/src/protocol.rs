//! Wire protocol for the UDP discovery exchange.
//!
//! Devices listen on the discovery port and answer the JSON command
//! `{"cmd":"discover"}` with free-form UTF-8 text.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{DiscoveryError, Result};

/// The command broadcast to solicit replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryRequest {
    pub cmd: String,
}

impl DiscoveryRequest {
    /// The discover command understood by devices.
    pub fn discover() -> Self {
        Self {
            cmd: "discover".to_string(),
        }
    }

    /// Serialize to the UTF-8 JSON payload sent on the wire.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// A single reply datagram, attributed to its sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReply {
    /// Address the reply arrived from
    pub addr: SocketAddr,
    /// Reply body decoded as UTF-8 text
    pub text: String,
}

impl ProbeReply {
    /// Decode a received datagram.
    ///
    /// Reply bodies are free-form; the only requirement is valid UTF-8.
    pub fn from_datagram(addr: SocketAddr, data: &[u8]) -> Result<Self> {
        let text = String::from_utf8(data.to_vec())
            .map_err(|source| DiscoveryError::Decode { addr, source })?;
        Ok(Self { addr, text })
    }
}
