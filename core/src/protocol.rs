//! Wire format for peer-to-peer reports (spec §3, `PeerReport`).

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::config::PACKET_LEN;
use crate::light::LightReading;

/// Number of FSM states; sizes the transition matrix and every probability
/// array.
pub const NUM_STATES: usize = 5;

/// Tagged enumeration over the five behavior states. Stable one-byte
/// on-wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateKind {
    Idle = 0,
    Coward = 1,
    Aggressive = 2,
    Love = 3,
    Explorer = 4,
}

impl StateKind {
    pub const ALL: [StateKind; NUM_STATES] = [
        StateKind::Idle,
        StateKind::Coward,
        StateKind::Aggressive,
        StateKind::Love,
        StateKind::Explorer,
    ];

    pub fn index(self) -> usize {
        u8::from(self) as usize
    }
}

/// Errors from decoding a wire packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// `prev_state` byte did not match any [`StateKind`] variant.
    InvalidState,
}

/// A 32-byte packed report exchanged between the two vehicles. Layout is
/// fixed (spec §3) and carries no version or framing beyond the radio's
/// fixed-size packet contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerReport {
    /// Peer's light levels on entry to its previous state.
    pub prev_lvls: LightReading,
    /// Peer's light levels on exit from its previous state.
    pub curr_lvls: LightReading,
    /// The state the peer was previously in.
    pub prev_state: StateKind,
}

impl PeerReport {
    /// Serialize to the 32-byte wire layout. Padding bytes are zeroed.
    pub fn to_bytes(self) -> [u8; PACKET_LEN] {
        let mut buf = [0u8; PACKET_LEN];
        buf[0..4].copy_from_slice(&self.prev_lvls.left.to_le_bytes());
        buf[4..8].copy_from_slice(&self.prev_lvls.right.to_le_bytes());
        buf[8..12].copy_from_slice(&self.curr_lvls.left.to_le_bytes());
        buf[12..16].copy_from_slice(&self.curr_lvls.right.to_le_bytes());
        buf[16] = self.prev_state.into();
        // buf[17..32] stays zero: padding, must be zero on send.
        buf
    }

    /// Deserialize from the 32-byte wire layout. Padding bytes are ignored.
    pub fn from_bytes(buf: &[u8; PACKET_LEN]) -> Result<Self, ProtocolError> {
        let prev_left = f32::from_le_bytes(buf[0..4].try_into().unwrap());
        let prev_right = f32::from_le_bytes(buf[4..8].try_into().unwrap());
        let curr_left = f32::from_le_bytes(buf[8..12].try_into().unwrap());
        let curr_right = f32::from_le_bytes(buf[12..16].try_into().unwrap());
        let prev_state =
            StateKind::try_from(buf[16]).map_err(|_| ProtocolError::InvalidState)?;
        Ok(Self {
            prev_lvls: LightReading::new(prev_left, prev_right),
            curr_lvls: LightReading::new(curr_left, curr_right),
            prev_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_semantic_fields() {
        let report = PeerReport {
            prev_lvls: LightReading::new(0.125, 0.875),
            curr_lvls: LightReading::new(0.25, 0.5),
            prev_state: StateKind::Aggressive,
        };
        let bytes = report.to_bytes();
        assert_eq!(bytes.len(), PACKET_LEN);
        let back = PeerReport::from_bytes(&bytes).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn offsets_match_the_layout_table() {
        let report = PeerReport {
            prev_lvls: LightReading::new(1.0, 2.0),
            curr_lvls: LightReading::new(3.0, 4.0),
            prev_state: StateKind::Love,
        };
        let bytes = report.to_bytes();
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &2.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &3.0f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &4.0f32.to_le_bytes());
        assert_eq!(bytes[16], 3u8);
        assert!(bytes[17..32].iter().all(|&b| b == 0));
    }

    #[test]
    fn padding_is_ignored_on_receive() {
        let report = PeerReport {
            prev_lvls: LightReading::new(0.1, 0.2),
            curr_lvls: LightReading::new(0.3, 0.4),
            prev_state: StateKind::Idle,
        };
        let mut bytes = report.to_bytes();
        bytes[17..32].fill(0xAA);
        let back = PeerReport::from_bytes(&bytes).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn invalid_state_byte_is_rejected() {
        let mut bytes = [0u8; PACKET_LEN];
        bytes[16] = 0xFF;
        assert_eq!(
            PeerReport::from_bytes(&bytes),
            Err(ProtocolError::InvalidState)
        );
    }
}
