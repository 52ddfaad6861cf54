//! Fixed-size wire packets exchanged between the two peers.
//!
//! Every packet is exactly [`PACKET_LEN`] bytes: a tag byte followed by a
//! row and a column byte. Payload-free packets carry zero padding so that
//! any datagram either decodes to exactly one [`Packet`] or is rejected.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Size of every encoded packet in bytes.
pub const PACKET_LEN: usize = 3;

/// Wire tag identifying a packet variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::FromRepr,
    strum::EnumIter,
)]
#[repr(u8)]
pub enum PacketTag {
    /// Sender takes the first-mark role.
    ClaimFirst = 0,
    /// Sender accepts the second-mark role.
    AcknowledgeSecond = 1,
    /// Sender placed a mark.
    Move = 2,
    /// Sender wants a new match.
    RestartRequest = 3,
}

/// A message between the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Packet {
    /// "I am taking the first-mark role."
    #[display("ClaimFirst")]
    ClaimFirst,
    /// "I accept the second-mark role."
    #[display("AcknowledgeSecond")]
    AcknowledgeSecond,
    /// Coordinates of a placed mark.
    #[display("Move({}, {})", row, col)]
    Move {
        /// Board row.
        row: u8,
        /// Board column.
        col: u8,
    },
    /// "I want to begin a new match."
    #[display("RestartRequest")]
    RestartRequest,
}

/// Reasons a received buffer is not a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PacketError {
    /// Fewer bytes than a packet.
    #[display("Truncated packet: {} of {} bytes", len, PACKET_LEN)]
    Truncated {
        /// Bytes received.
        len: usize,
    },

    /// More bytes than a packet.
    #[display("Oversized packet: {} of {} bytes", len, PACKET_LEN)]
    Oversized {
        /// Bytes received.
        len: usize,
    },

    /// Tag byte names no known variant.
    #[display("Unknown packet tag {:#04x}", _0)]
    UnknownTag(#[error(not(source))] u8),

    /// A payload-free packet carried non-zero payload bytes.
    #[display("Unexpected payload on {} packet", _0)]
    UnexpectedPayload(#[error(not(source))] PacketTag),
}

impl Packet {
    /// Returns the wire tag for this packet.
    pub fn tag(&self) -> PacketTag {
        match self {
            Packet::ClaimFirst => PacketTag::ClaimFirst,
            Packet::AcknowledgeSecond => PacketTag::AcknowledgeSecond,
            Packet::Move { .. } => PacketTag::Move,
            Packet::RestartRequest => PacketTag::RestartRequest,
        }
    }

    /// Encodes the packet into its fixed wire form.
    pub fn encode(&self) -> [u8; PACKET_LEN] {
        let (row, col) = match *self {
            Packet::Move { row, col } => (row, col),
            _ => (0, 0),
        };
        [self.tag() as u8, row, col]
    }

    /// Decodes a packet, rejecting anything that is not exactly one variant.
    #[instrument(level = "trace")]
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        let [tag, row, col] = match bytes.len() {
            len if len < PACKET_LEN => return Err(PacketError::Truncated { len }),
            len if len > PACKET_LEN => return Err(PacketError::Oversized { len }),
            _ => [bytes[0], bytes[1], bytes[2]],
        };

        let tag = PacketTag::from_repr(tag).ok_or(PacketError::UnknownTag(tag))?;
        let packet = match tag {
            PacketTag::Move => return Ok(Packet::Move { row, col }),
            PacketTag::ClaimFirst => Packet::ClaimFirst,
            PacketTag::AcknowledgeSecond => Packet::AcknowledgeSecond,
            PacketTag::RestartRequest => Packet::RestartRequest,
        };

        if row != 0 || col != 0 {
            return Err(PacketError::UnexpectedPayload(tag));
        }
        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_move_layout() {
        let bytes = Packet::Move { row: 2, col: 1 }.encode();
        assert_eq!(bytes, [2, 2, 1]);
    }

    #[test]
    fn test_payload_free_packets_are_zero_padded() {
        assert_eq!(Packet::ClaimFirst.encode(), [0, 0, 0]);
        assert_eq!(Packet::RestartRequest.encode(), [3, 0, 0]);
    }

    #[test]
    fn test_every_tag_decodes_from_its_repr() {
        for tag in PacketTag::iter() {
            let decoded = Packet::decode(&[tag as u8, 0, 0]).expect("known tag");
            assert_eq!(decoded.tag(), tag);
        }
    }

    #[test]
    fn test_truncated_is_rejected() {
        assert_eq!(Packet::decode(&[]), Err(PacketError::Truncated { len: 0 }));
        assert_eq!(Packet::decode(&[2, 1]), Err(PacketError::Truncated { len: 2 }));
    }

    #[test]
    fn test_oversized_is_rejected() {
        assert_eq!(
            Packet::decode(&[2, 1, 1, 0]),
            Err(PacketError::Oversized { len: 4 })
        );
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert_eq!(Packet::decode(&[9, 0, 0]), Err(PacketError::UnknownTag(9)));
    }

    #[test]
    fn test_padding_must_be_zero() {
        assert_eq!(
            Packet::decode(&[1, 0, 5]),
            Err(PacketError::UnexpectedPayload(PacketTag::AcknowledgeSecond))
        );
    }
}
