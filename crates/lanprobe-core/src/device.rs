//! Unicast datagram send to a single device.

use std::net::{IpAddr, SocketAddr};

use tokio::net::UdpSocket;

use crate::error::{DiscoveryError, Result};

/// Send one UTF-8 datagram to a device. Fire-and-forget: no reply is
/// awaited.
pub async fn send_datagram(ip: IpAddr, port: u16, data: &str) -> Result<()> {
    let socket = UdpSocket::bind(("0.0.0.0", 0))
        .await
        .map_err(DiscoveryError::Bind)?;

    let target = SocketAddr::new(ip, port);
    socket
        .send_to(data.as_bytes(), target)
        .await
        .map_err(DiscoveryError::Send)?;

    Ok(())
}
