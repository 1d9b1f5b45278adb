//! UDP transport

use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tracing::{debug, info, trace};

use crate::transport::Transport;
use crate::{Result, TelemetryError};

/// Receive buffer size; comfortably larger than any Dash datagram.
pub const DEFAULT_RECV_BUFFER: usize = 1024;

/// Receive-only UDP endpoint.
///
/// The socket reads into a buffer one byte larger than requested, so a
/// datagram longer than `buffer_size` always arrives longer than
/// `buffer_size` and can never be truncated down to a valid length.
pub struct UdpTransport {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpTransport {
    /// Bind to `addr` with the default receive buffer.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        Self::bind_with_buffer(addr, DEFAULT_RECV_BUFFER).await
    }

    /// Bind to `addr`, accepting datagrams of up to `buffer_size` bytes intact.
    pub async fn bind_with_buffer(addr: SocketAddr, buffer_size: usize) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| TelemetryError::transport_io(format!("failed to bind {addr}"), e))?;

        info!("Listening for telemetry on {}", socket.local_addr()?);

        Ok(Self { socket, buf: vec![0; buffer_size + 1] })
    }

    /// Address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait::async_trait]
impl Transport for UdpTransport {
    async fn recv(&mut self) -> Result<Option<Vec<u8>>> {
        let (len, peer) = self
            .socket
            .recv_from(&mut self.buf)
            .await
            .map_err(|e| TelemetryError::transport_io("receive failed", e))?;

        if len == self.buf.len() {
            debug!("Oversized datagram from {} truncated to {} bytes", peer, len);
        } else {
            trace!("Received {} bytes from {}", len, peer);
        }
        Ok(Some(self.buf[..len].to_vec()))
    }
}
