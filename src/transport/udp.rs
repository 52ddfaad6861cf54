//! UDP datagram transport.
//!
//! Each datagram carries a two-byte big-endian group id ahead of the packet
//! bytes. Datagrams for another group are dropped on receive, which lets
//! several sessions share a port range without cross-talk.

use super::{GroupId, Transport, TransportError};
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use tracing::{debug, info, instrument};

const GROUP_HEADER_LEN: usize = 2;
const MAX_DATAGRAM: usize = 64;

/// Non-blocking UDP link to a single peer address.
#[derive(Debug)]
pub struct UdpTransport {
    bind: SocketAddr,
    peer: SocketAddr,
    group: GroupId,
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    /// Creates a closed transport that will bind `bind` and send to `peer`.
    #[instrument]
    pub fn new(bind: SocketAddr, peer: SocketAddr) -> Self {
        Self {
            bind,
            peer,
            group: 0,
            socket: None,
        }
    }

    /// Address the socket is bound to, once open.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|s| s.local_addr().ok())
    }

    /// Address datagrams are sent to.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Transport for UdpTransport {
    #[instrument(skip(self), fields(bind = %self.bind, peer = %self.peer))]
    fn open(&mut self, group: GroupId) -> Result<(), TransportError> {
        let socket = UdpSocket::bind(self.bind)?;
        socket.set_nonblocking(true)?;
        info!(local = ?socket.local_addr().ok(), group, "UDP transport open");
        self.group = group;
        self.socket = Some(socket);
        Ok(())
    }

    #[instrument(skip(self))]
    fn close(&mut self) {
        if self.socket.take().is_some() {
            info!(group = self.group, "UDP transport closed");
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let socket = self.socket.as_ref().ok_or(TransportError::NotOpen)?;
        let mut datagram = Vec::with_capacity(GROUP_HEADER_LEN + bytes.len());
        datagram.extend_from_slice(&self.group.to_be_bytes());
        datagram.extend_from_slice(bytes);
        socket.send_to(&datagram, self.peer)?;
        Ok(())
    }

    fn try_receive(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let Some(socket) = self.socket.as_ref() else {
            return Ok(0);
        };

        let mut datagram = [0u8; MAX_DATAGRAM];
        loop {
            let (len, from) = match socket.recv_from(&mut datagram) {
                Ok(received) => received,
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(0),
                Err(e) => return Err(e.into()),
            };

            if len < GROUP_HEADER_LEN {
                debug!(%from, len, "Dropping datagram without group header");
                continue;
            }
            let group = GroupId::from_be_bytes([datagram[0], datagram[1]]);
            if group != self.group {
                debug!(%from, group, expected = self.group, "Dropping datagram for another group");
                continue;
            }

            let payload = &datagram[GROUP_HEADER_LEN..len];
            if payload.len() > buf.len() {
                debug!(%from, len = payload.len(), "Dropping datagram larger than receive buffer");
                continue;
            }
            buf[..payload.len()].copy_from_slice(payload);
            return Ok(payload.len());
        }
    }
}
