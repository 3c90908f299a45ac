//! Broadcast discovery probe.
//!
//! Uses SO_BROADCAST on an ephemeral socket; replies come back unicast
//! to the same socket.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;
use tokio::time::timeout;

use crate::error::{DiscoveryError, Result};
use crate::protocol::{DiscoveryRequest, ProbeReply};

/// Default UDP discovery port
pub const DISCOVERY_PORT: u16 = 8888;

/// Timeout for a single UDP receive, re-armed per attempt
const RECEIVE_TIMEOUT: Duration = Duration::from_secs(3);

/// Wall-clock bound on the reply collection loop
const RESPONSE_WINDOW: Duration = Duration::from_secs(10);

/// Create a UDP socket with SO_BROADCAST enabled, bound to an ephemeral port.
fn create_broadcast_socket() -> Result<std::net::UdpSocket> {
    let socket =
        Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP)).map_err(DiscoveryError::Bind)?;

    socket.set_broadcast(true).map_err(DiscoveryError::Bind)?;

    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, 0).into();
    socket.bind(&addr.into()).map_err(DiscoveryError::Bind)?;

    socket.set_nonblocking(true).map_err(DiscoveryError::Bind)?;

    Ok(socket.into())
}

/// Probe options
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// Destination address for the broadcast datagram
    pub broadcast_addr: IpAddr,
    /// Destination port devices listen on
    pub port: u16,
    /// Timeout for each individual receive
    pub recv_timeout: Duration,
    /// Wall-clock deadline for the collection loop
    pub response_window: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            broadcast_addr: IpAddr::V4(Ipv4Addr::BROADCAST),
            port: DISCOVERY_PORT,
            recv_timeout: RECEIVE_TIMEOUT,
            response_window: RESPONSE_WINDOW,
        }
    }
}

/// One-shot discovery probe: broadcast once, then collect replies.
///
/// The socket lives as long as the probe and is released on every exit
/// path when the probe is dropped.
pub struct DiscoveryProbe {
    socket: UdpSocket,
    options: ProbeOptions,
}

impl DiscoveryProbe {
    /// Create a probe with a broadcast-capable socket.
    pub fn new(options: ProbeOptions) -> Result<Self> {
        let std_socket = create_broadcast_socket()?;
        let socket = UdpSocket::from_std(std_socket).map_err(DiscoveryError::Bind)?;

        Ok(Self { socket, options })
    }

    /// Send the discover command once. No retransmission.
    pub async fn broadcast(&self) -> Result<()> {
        let payload = DiscoveryRequest::discover().encode()?;
        let target = SocketAddr::new(self.options.broadcast_addr, self.options.port);

        self.socket
            .send_to(&payload, target)
            .await
            .map_err(DiscoveryError::Send)?;

        Ok(())
    }

    /// Collect replies, calling `on_reply` for each one as it arrives,
    /// and return the total count.
    ///
    /// The loop is bounded by `response_window` from its start, with
    /// each receive bounded by `recv_timeout`. A single quiet interval
    /// of `recv_timeout` ends collection even when the window has not
    /// elapsed; devices slower than that are not waited for.
    pub async fn collect<F>(&self, mut on_reply: F) -> Result<usize>
    where
        F: FnMut(&ProbeReply),
    {
        let mut buf = vec![0u8; 1024];
        let mut count = 0;
        let start = Instant::now();

        while start.elapsed() < self.options.response_window {
            match timeout(self.options.recv_timeout, self.socket.recv_from(&mut buf)).await {
                Ok(Ok((len, addr))) => {
                    let reply = ProbeReply::from_datagram(addr, &buf[..len])?;
                    on_reply(&reply);
                    count += 1;
                }
                Ok(Err(e)) => return Err(DiscoveryError::Receive(e)),
                Err(_) => break, // quiet interval, collection is done
            }
        }

        Ok(count)
    }

    /// Run a full probe: socket setup, one broadcast, reply collection.
    pub async fn run<F>(options: ProbeOptions, on_reply: F) -> Result<usize>
    where
        F: FnMut(&ProbeReply),
    {
        let probe = Self::new(options)?;
        probe.broadcast().await?;
        probe.collect(on_reply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_options(port: u16) -> ProbeOptions {
        ProbeOptions {
            broadcast_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            recv_timeout: Duration::from_millis(200),
            response_window: Duration::from_secs(2),
        }
    }

    async fn bind_responder() -> (UdpSocket, u16) {
        let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = socket.local_addr().unwrap().port();
        (socket, port)
    }

    #[test]
    fn test_default_options() {
        let options = ProbeOptions::default();
        assert_eq!(options.broadcast_addr, IpAddr::V4(Ipv4Addr::BROADCAST));
        assert_eq!(options.port, DISCOVERY_PORT);
        assert_eq!(options.recv_timeout, Duration::from_secs(3));
        assert_eq!(options.response_window, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_probe_sends_single_discover_datagram() {
        let (responder, port) = bind_responder().await;

        let probe_task =
            tokio::spawn(async move { DiscoveryProbe::run(loopback_options(port), |_| {}).await });

        let mut buf = [0u8; 1024];
        let (len, _) = responder.recv_from(&mut buf).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&buf[..len]).unwrap();
        assert_eq!(payload, serde_json::json!({"cmd": "discover"}));

        // No retransmission while the probe is still collecting
        let second = timeout(Duration::from_millis(100), responder.recv_from(&mut buf)).await;
        assert!(second.is_err());

        // With no replies the run ends at the first receive timeout
        let count = probe_task.await.unwrap().unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_probe_collects_reply_with_sender_addr() {
        let (responder, port) = bind_responder().await;

        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (_, probe_addr) = responder.recv_from(&mut buf).await.unwrap();
            responder.send_to(b"ack", probe_addr).await.unwrap();
            // Hold the socket open until the probe is done
            tokio::time::sleep(Duration::from_secs(2)).await;
        });

        let mut replies = Vec::new();
        let count = DiscoveryProbe::run(loopback_options(port), |reply| {
            replies.push(reply.clone());
        })
        .await
        .unwrap();

        assert_eq!(count, 1);
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, "ack");
        assert_eq!(replies[0].addr.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_probe_fails_on_invalid_utf8_reply() {
        let (responder, port) = bind_responder().await;

        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (_, probe_addr) = responder.recv_from(&mut buf).await.unwrap();
            responder.send_to(&[0xff, 0xfe, 0xfd], probe_addr).await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
        });

        let result = DiscoveryProbe::run(loopback_options(port), |_| {}).await;
        assert!(matches!(result, Err(DiscoveryError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_collection_bounded_by_response_window() {
        let (responder, port) = bind_responder().await;

        // Replies keep arriving faster than the receive timeout, so only
        // the window deadline can end the loop.
        let flooder = tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (_, probe_addr) = responder.recv_from(&mut buf).await.unwrap();
            loop {
                let _ = responder.send_to(b"pong", probe_addr).await;
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
        });

        let options = ProbeOptions {
            broadcast_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            recv_timeout: Duration::from_secs(1),
            response_window: Duration::from_millis(300),
        };

        let start = Instant::now();
        let count = DiscoveryProbe::run(options, |_| {}).await.unwrap();
        let elapsed = start.elapsed();

        flooder.abort();

        assert!(count > 0);
        assert!(elapsed >= Duration::from_millis(300));
        // Worst case is the window plus one receive timeout
        assert!(elapsed < Duration::from_millis(300) + Duration::from_secs(1) + Duration::from_millis(500));
    }
}
