//! Onboard status LED encoding (spec §4.E).

use crate::protocol::StateKind;

/// Narrow interface for the two status LEDs; the GPIO driver stack itself
/// is an external collaborator (spec §1).
pub trait Leds {
    fn set(&mut self, red: bool, green: bool);
}

/// `Idle`/`Explorer` -> both off; `Aggressive` -> red only; `Coward` ->
/// green only; `Love` -> both on.
pub fn set_for_state(leds: &mut impl Leds, state: StateKind) {
    let (red, green) = match state {
        StateKind::Idle | StateKind::Explorer => (false, false),
        StateKind::Aggressive => (true, false),
        StateKind::Coward => (false, true),
        StateKind::Love => (true, true),
    };
    leds.set(red, green);
}
