//! GPIO + PWM backed [`vehicle_core::MotorPins`].

use embassy_rp::gpio::Output;
use embassy_rp::pwm::Pwm;
use vehicle_core::MotorPins;

pub struct HBridgePins<'a> {
    in1: Output<'a>,
    in2: Output<'a>,
    in3: Output<'a>,
    in4: Output<'a>,
    pwm_left: Pwm<'a>,
    pwm_right: Pwm<'a>,
    top: u16,
}

impl<'a> HBridgePins<'a> {
    pub fn new(
        in1: Output<'a>,
        in2: Output<'a>,
        in3: Output<'a>,
        in4: Output<'a>,
        pwm_left: Pwm<'a>,
        pwm_right: Pwm<'a>,
        top: u16,
    ) -> Self {
        Self {
            in1,
            in2,
            in3,
            in4,
            pwm_left,
            pwm_right,
            top,
        }
    }

    fn write_level(pwm: &mut Pwm<'a>, top: u16, duty: f32) {
        let level = (duty * top as f32) as u16;
        pwm.set_duty_cycle_fraction(level, top).ok();
    }
}

impl<'a> MotorPins for HBridgePins<'a> {
    fn set_left_dir(&mut self, in1: bool, in2: bool) {
        self.in1.set_level(in1.into());
        self.in2.set_level(in2.into());
    }

    fn set_right_dir(&mut self, in3: bool, in4: bool) {
        self.in3.set_level(in3.into());
        self.in4.set_level(in4.into());
    }

    fn set_duty(&mut self, left: f32, right: f32) {
        Self::write_level(&mut self.pwm_left, self.top, left);
        Self::write_level(&mut self.pwm_right, self.top, right);
    }
}
