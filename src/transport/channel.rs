//! In-process transport pair for loopback play and tests.

use super::{GroupId, Transport, TransportError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError};
use tracing::{debug, instrument};

/// One end of an in-memory datagram link.
///
/// Datagrams are tagged with the sender's group; the receiver drops any
/// whose group differs from its own, mirroring [`super::UdpTransport`].
#[derive(Debug)]
pub struct ChannelTransport {
    tx: UnboundedSender<(GroupId, Vec<u8>)>,
    rx: UnboundedReceiver<(GroupId, Vec<u8>)>,
    group: Option<GroupId>,
}

impl ChannelTransport {
    /// Creates two connected, closed ends.
    #[instrument]
    pub fn pair() -> (Self, Self) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        (
            Self {
                tx: a_tx,
                rx: a_rx,
                group: None,
            },
            Self {
                tx: b_tx,
                rx: b_rx,
                group: None,
            },
        )
    }

    /// Returns true between `open` and `close`.
    pub fn is_open(&self) -> bool {
        self.group.is_some()
    }
}

impl Transport for ChannelTransport {
    fn open(&mut self, group: GroupId) -> Result<(), TransportError> {
        debug!(group, "Channel transport open");
        self.group = Some(group);
        Ok(())
    }

    fn close(&mut self) {
        self.group = None;
        self.rx.close();
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let group = self.group.ok_or(TransportError::NotOpen)?;
        self.tx
            .send((group, bytes.to_vec()))
            .map_err(|_| TransportError::Disconnected)
    }

    fn try_receive(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        let Some(own_group) = self.group else {
            return Ok(0);
        };

        loop {
            let (group, datagram) = match self.rx.try_recv() {
                Ok(received) => received,
                Err(TryRecvError::Empty) => return Ok(0),
                Err(TryRecvError::Disconnected) => return Err(TransportError::Disconnected),
            };
            if group != own_group {
                debug!(group, expected = own_group, "Dropping datagram for another group");
                continue;
            }
            if datagram.len() > buf.len() {
                debug!(len = datagram.len(), "Dropping datagram larger than receive buffer");
                continue;
            }
            buf[..datagram.len()].copy_from_slice(&datagram);
            return Ok(datagram.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_delivers_in_both_directions() {
        let (mut a, mut b) = ChannelTransport::pair();
        a.open(5).unwrap();
        b.open(5).unwrap();

        a.send(&[0, 0, 0]).unwrap();
        b.send(&[1, 0, 0]).unwrap();

        let mut buf = [0u8; 3];
        assert_eq!(b.try_receive(&mut buf).unwrap(), 3);
        assert_eq!(buf, [0, 0, 0]);
        assert_eq!(a.try_receive(&mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 0, 0]);
        assert_eq!(a.try_receive(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_send_requires_open() {
        let (mut a, _b) = ChannelTransport::pair();
        assert!(matches!(a.send(&[0]), Err(TransportError::NotOpen)));
    }

    #[test]
    fn test_group_mismatch_is_dropped() {
        let (mut a, mut b) = ChannelTransport::pair();
        a.open(1).unwrap();
        b.open(2).unwrap();
        a.send(&[3, 0, 0]).unwrap();

        let mut buf = [0u8; 3];
        assert_eq!(b.try_receive(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_dropped_peer_disconnects() {
        let (mut a, b) = ChannelTransport::pair();
        a.open(1).unwrap();
        drop(b);

        let mut buf = [0u8; 3];
        assert!(matches!(a.try_receive(&mut buf), Err(TransportError::Disconnected)));
        assert!(matches!(a.send(&[0, 0, 0]), Err(TransportError::Disconnected)));
    }

    #[test]
    fn test_close_reports_closed() {
        let (mut a, _b) = ChannelTransport::pair();
        a.open(1).unwrap();
        assert!(a.is_open());
        a.close();
        assert!(!a.is_open());
    }
}
