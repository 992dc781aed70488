//! Compile-time configuration knobs (spec §6).

use crate::clock::Duration;

/// Per-reward step applied to `M[prev][curr]`.
pub const LEARNING_RATE: f32 = 0.1;

/// Reserved; currently unused (carried over from the original source, which
/// threads it through the constructor but never reads it).
#[allow(dead_code)]
pub const CI_CHANGE_RATE: f32 = 0.05;

/// Minimum dwell time in the `Idle` state before a transition may be requested.
pub const IDLE_DWELL_MS: u64 = 2_500;

/// Minimum dwell time in any of the four motion states.
pub const MOTION_DWELL_MS: u64 = 5_000;

/// Peer-influence magnitude applied to a sampled distribution.
pub const PEER_BIAS: f32 = 0.2;

/// Per-transition chance (1 in N) of enqueuing an outbound peer report.
pub const SEND_PROBABILITY_DENOM: u32 = 3;

/// Minimum row/distribution entry after any update or influence pass.
pub const PROBABILITY_FLOOR: f32 = 0.01;

/// FSM tick cadence.
pub const FSM_PERIOD_MS: u64 = 10;

/// Radio service tick cadence.
pub const RADIO_PERIOD_MS: u64 = 10;

/// Per-variant proportionality constant `k` used by every motor law.
pub const MAX_SPEED: f32 = 1.0;

/// H-bridge PWM carrier period, in microseconds (~20 kHz).
pub const PWM_PERIOD_US: u32 = 50;

/// Depth of each of the two radio mailboxes.
pub const MAILBOX_DEPTH: usize = 16;

/// Size in bytes of a `PeerReport` on the wire.
pub const PACKET_LEN: usize = 32;

pub fn idle_dwell() -> Duration {
    Duration::millis(IDLE_DWELL_MS)
}

pub fn motion_dwell() -> Duration {
    Duration::millis(MOTION_DWELL_MS)
}

pub fn fsm_period() -> Duration {
    Duration::millis(FSM_PERIOD_MS)
}

pub fn radio_period() -> Duration {
    Duration::millis(RADIO_PERIOD_MS)
}

/// Selects which of the two fixed radio addresses is TX vs RX.
///
/// Mirrors the original's `#ifdef VEHICLE_1` compile-time branch; `firmware`
/// turns this into a pair of mutually exclusive Cargo features. The two
/// addresses are single bytes, matching the CC1101's one-byte `ADDR`
/// register (self address-check mode); the paired vehicle must see the
/// inverse assignment so each only self-filters the other's frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VehicleRole {
    Vehicle1,
    Vehicle2,
}

impl VehicleRole {
    /// `(own_address, peer_address)`.
    pub fn addresses(self) -> (u8, u8) {
        const ADDR_A: u8 = 0x11;
        const ADDR_B: u8 = 0x22;
        match self {
            VehicleRole::Vehicle1 => (ADDR_A, ADDR_B),
            VehicleRole::Vehicle2 => (ADDR_B, ADDR_A),
        }
    }
}
