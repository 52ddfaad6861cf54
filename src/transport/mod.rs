//! Byte transport between the two peers.
//!
//! The coordinator only sees the [`Transport`] trait. Delivery is
//! best-effort: packets may be lost, and a receive that finds nothing
//! returns `Ok(0)` rather than blocking.

mod channel;
mod udp;

pub use channel::ChannelTransport;
pub use udp::UdpTransport;

/// Logical group address shared by both peers of a session.
pub type GroupId = u16;

/// Failures surfaced by a transport.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TransportError {
    /// Operation requires an open transport.
    #[display("Transport is not open")]
    NotOpen,

    /// The other end of an in-process channel is gone.
    #[display("Peer channel disconnected")]
    Disconnected,

    /// Underlying socket failure.
    #[display("Transport I/O error: {}", _0)]
    #[from]
    Io(std::io::Error),
}

/// A best-effort, non-blocking datagram channel to the peer.
pub trait Transport {
    /// Joins `group`. Called once, when the coordinator starts.
    fn open(&mut self, group: GroupId) -> Result<(), TransportError>;

    /// Leaves the group and releases resources.
    fn close(&mut self);

    /// Sends one datagram to the peer.
    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Copies at most one pending datagram into `buf`.
    ///
    /// Returns the number of bytes written; `0` means nothing arrived.
    fn try_receive(&mut self, buf: &mut [u8]) -> Result<usize, TransportError>;
}
