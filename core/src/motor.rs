//! Motor driver abstraction (spec §4.B).
//!
//! The H-bridge direction-to-pin translation and PWM duty clamping live
//! here, in scope; the actual GPIO/PWM register writes are an external
//! collaborator (spec §1), reached only through [`MotorPins`].

/// Requested direction for one wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Forward,
    Reverse,
    Stop,
}

fn clamp01(duty: f32) -> f32 {
    duty.clamp(0.0, 1.0)
}

/// Narrow GPIO/PWM interface for one H-bridge pair. The wiring asymmetry
/// between the two sides (left drives `IN1`/`IN2`, right drives `IN3`/`IN4`
/// with the sense inverted) is preserved from the hardware and handled by
/// [`HBridge::apply`]; implementors only ever see raw pin levels.
pub trait MotorPins {
    fn set_left_dir(&mut self, in1: bool, in2: bool);
    fn set_right_dir(&mut self, in3: bool, in4: bool);
    fn set_duty(&mut self, left: f32, right: f32);
}

/// Narrow interface consumed by the FSM: translate a direction + duty pair
/// per wheel into hardware state.
pub trait MotorDriver {
    fn apply(&mut self, dir_l: Direction, dir_r: Direction, duty_l: f32, duty_r: f32);
}

/// Generic two-wheel H-bridge driver over any [`MotorPins`] implementation.
pub struct HBridge<P> {
    pins: P,
}

impl<P: MotorPins> HBridge<P> {
    pub fn new(pins: P) -> Self {
        Self { pins }
    }

    pub fn into_inner(self) -> P {
        self.pins
    }
}

impl<P: MotorPins> MotorDriver for HBridge<P> {
    fn apply(&mut self, dir_l: Direction, dir_r: Direction, duty_l: f32, duty_r: f32) {
        let (l1, l2) = match dir_l {
            Direction::Forward => (true, false),
            Direction::Reverse => (false, true),
            Direction::Stop => (false, false),
        };
        // Right side is wired with the sense inverted relative to left.
        let (r3, r4) = match dir_r {
            Direction::Forward => (false, true),
            Direction::Reverse => (true, false),
            Direction::Stop => (false, false),
        };
        self.pins.set_left_dir(l1, l2);
        self.pins.set_right_dir(r3, r4);
        self.pins.set_duty(clamp01(duty_l), clamp01(duty_r));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingPins {
        left: (bool, bool),
        right: (bool, bool),
        duty: (f32, f32),
    }
    impl MotorPins for RecordingPins {
        fn set_left_dir(&mut self, in1: bool, in2: bool) {
            self.left = (in1, in2);
        }
        fn set_right_dir(&mut self, in3: bool, in4: bool) {
            self.right = (in3, in4);
        }
        fn set_duty(&mut self, left: f32, right: f32) {
            self.duty = (left, right);
        }
    }

    #[test]
    fn forward_wiring_matches_hardware_asymmetry() {
        let mut hb = HBridge::new(RecordingPins::default());
        hb.apply(Direction::Forward, Direction::Forward, 0.5, 0.5);
        let p = hb.into_inner();
        assert_eq!(p.left, (true, false));
        assert_eq!(p.right, (false, true));
    }

    #[test]
    fn reverse_inverts_each_side() {
        let mut hb = HBridge::new(RecordingPins::default());
        hb.apply(Direction::Reverse, Direction::Reverse, 0.2, 0.3);
        let p = hb.into_inner();
        assert_eq!(p.left, (false, true));
        assert_eq!(p.right, (true, false));
    }

    #[test]
    fn stop_writes_zero_on_both_lines() {
        let mut hb = HBridge::new(RecordingPins::default());
        hb.apply(Direction::Stop, Direction::Stop, 0.9, 0.9);
        let p = hb.into_inner();
        assert_eq!(p.left, (false, false));
        assert_eq!(p.right, (false, false));
    }

    #[test]
    fn duty_is_clamped() {
        let mut hb = HBridge::new(RecordingPins::default());
        hb.apply(Direction::Forward, Direction::Forward, 1.5, -0.5);
        let p = hb.into_inner();
        assert_eq!(p.duty, (1.0, 0.0));
    }
}
