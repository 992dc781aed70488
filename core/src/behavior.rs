//! Per-state locomotion laws and the dwell gate (spec §4.D).
//!
//! Each state's `execute` reads the current light reading and the elapsed
//! time in state; it returns a motor command plus an optional transition
//! request. `Behavior` carries no mutable state of its own — the FSM
//! snapshot it needs lives in [`crate::context::VehicleContext`].

use crate::config;
use crate::light::LightReading;
use crate::motor::Direction;
use crate::protocol::StateKind;

/// One tick's motor command: direction and duty per wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotorCommand {
    pub dir_l: Direction,
    pub dir_r: Direction,
    pub duty_l: f32,
    pub duty_r: f32,
}

impl MotorCommand {
    const fn stop() -> Self {
        Self {
            dir_l: Direction::Stop,
            dir_r: Direction::Stop,
            duty_l: 0.0,
            duty_r: 0.0,
        }
    }
}

/// `enter`/`exit` both stop the motors; the states differ only in their
/// `execute` law and whether they drive at all (`Idle` never does).
pub fn enter(_state: StateKind) -> MotorCommand {
    MotorCommand::stop()
}

pub fn exit(_state: StateKind) -> MotorCommand {
    MotorCommand::stop()
}

/// Evaluate one state's locomotion law for the current light reading.
///
/// The Coward law is parallel-wired and proportional to same-side light —
/// matching the implemented formula, not "run away from light" read off the
/// original's stale comment.
pub fn execute(state: StateKind, light: LightReading) -> MotorCommand {
    let k = config::MAX_SPEED;
    match state {
        StateKind::Idle => MotorCommand::stop(),
        StateKind::Aggressive => MotorCommand {
            dir_l: Direction::Forward,
            dir_r: Direction::Forward,
            duty_l: light.right * k,
            duty_r: light.left * k,
        },
        StateKind::Coward => MotorCommand {
            dir_l: Direction::Forward,
            dir_r: Direction::Forward,
            duty_l: light.left * k,
            duty_r: light.right * k,
        },
        StateKind::Love => MotorCommand {
            dir_l: Direction::Forward,
            dir_r: Direction::Forward,
            duty_l: 1.0 - light.right * k,
            duty_r: 1.0 - light.left * k,
        },
        StateKind::Explorer => MotorCommand {
            dir_l: Direction::Forward,
            dir_r: Direction::Forward,
            duty_l: 1.0 - light.left * k,
            duty_r: 1.0 - light.right * k,
        },
    }
}

/// Minimum time a state must hold before a transition may be requested.
pub fn min_dwell(state: StateKind) -> crate::clock::Duration {
    match state {
        StateKind::Idle => config::idle_dwell(),
        _ => config::motion_dwell(),
    }
}
