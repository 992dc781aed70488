//! `embassy_time`-backed [`vehicle_core::Clock`].

use embassy_time::Instant as EmbassyInstant;
use vehicle_core::{Clock, Instant};

pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::from_ticks(EmbassyInstant::now().as_millis())
    }
}

/// Convert a `vehicle_core` duration into one `embassy_time::Timer::after` accepts.
/// Both use a 1 ms tick, so this is a direct tick-count carry-over.
pub fn to_embassy_duration(d: vehicle_core::Duration) -> embassy_time::Duration {
    embassy_time::Duration::from_millis(d.ticks())
}
