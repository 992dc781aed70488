//! Hardware-agnostic logic for a Braitenberg-style vehicle: the behavior
//! state machine, its online-learned transition matrix, peer-to-peer
//! influence over the radio link, and the narrow hardware traits the
//! `firmware` crate implements.
//!
//! `no_std` by default; the `std` feature enables host-side testing.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod behavior;
pub mod clock;
pub mod config;
pub mod context;
pub mod leds;
pub mod light;
pub mod log;
pub mod mailbox;
pub mod matrix;
pub mod motor;
pub mod protocol;
pub mod radio;
pub mod rng;
pub mod scheduler;

pub use behavior::MotorCommand;
pub use clock::{Clock, Duration, Instant};
pub use config::VehicleRole;
pub use context::{FsmSnapshot, VehicleContext};
pub use leds::Leds;
pub use light::{LightReading, LightSensing, LightSensor};
pub use mailbox::Mailboxes;
pub use matrix::TransitionMatrix;
pub use motor::{Direction, HBridge, MotorDriver, MotorPins};
pub use protocol::{PeerReport, ProtocolError, StateKind, NUM_STATES};
pub use radio::{Radio, RadioService};
pub use rng::{Rng, XorShift32};
