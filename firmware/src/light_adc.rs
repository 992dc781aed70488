//! ADC-backed [`vehicle_core::LightSensor`] over the two LDR channels.
//!
//! The LDRs' pseudo-ground pins (spec §9.5) are driven low once at
//! construction and never touched again; they exist only so the divider has
//! a clean local ground on boards that route it through a GPIO instead of
//! the board ground plane.

use embassy_rp::adc::{Adc, Channel};
use embassy_rp::gpio::Output;
use vehicle_core::{LightReading, LightSensor};

/// Full-scale ADC reading on rp2040's 12-bit converter.
const ADC_MAX: f32 = 4095.0;

pub struct LdrPair<'a> {
    adc: Adc<'a, embassy_rp::adc::Async>,
    left: Channel<'a>,
    right: Channel<'a>,
    _left_gnd: Output<'a>,
    _right_gnd: Output<'a>,
}

impl<'a> LdrPair<'a> {
    pub fn new(
        adc: Adc<'a, embassy_rp::adc::Async>,
        left: Channel<'a>,
        right: Channel<'a>,
        left_gnd: Output<'a>,
        right_gnd: Output<'a>,
    ) -> Self {
        Self {
            adc,
            left,
            right,
            _left_gnd: left_gnd,
            _right_gnd: right_gnd,
        }
    }
}

impl<'a> LightSensor for LdrPair<'a> {
    fn read_raw(&mut self) -> LightReading {
        // Blocking one-shot reads: the conversion itself is a handful of
        // microseconds, well inside the 10 ms FSM tick budget.
        let left = embassy_futures::block_on(self.adc.read(&mut self.left)).unwrap_or(0);
        let right = embassy_futures::block_on(self.adc.read(&mut self.right)).unwrap_or(0);
        LightReading::new(left as f32 / ADC_MAX, right as f32 / ADC_MAX)
    }
}
