//! Tick cadence timing (spec §4.F).
//!
//! Deliberately *not* an auto-correcting ticker: each call measures how long
//! the body actually took and returns how long to sleep before the next
//! iteration, mirroring the original's manual `cycle_end - cycle_start`
//! loop rather than `embassy_time::Ticker`'s fixed-cadence catch-up.

use crate::clock::{Clock, Duration, Instant};

/// What a tick-timing decision boils down to: sleep the remainder of the
/// period, or yield immediately because the body overran it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    SleepFor(Duration),
    YieldNow,
}

/// Given when the body started and the target period, decide how long to
/// wait before running the body again.
pub fn pace(clock: &impl Clock, body_started_at: Instant, period: Duration) -> Pace {
    let elapsed = clock.now() - body_started_at;
    if elapsed < period {
        Pace::SleepFor(period - elapsed)
    } else {
        Pace::YieldNow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;

    #[test]
    fn short_body_sleeps_the_remainder() {
        let mut clock = MockClock::new();
        let start = clock.now();
        clock.advance_millis(3);
        let period = Duration::millis(10);
        match pace(&clock, start, period) {
            Pace::SleepFor(d) => assert_eq!(d, Duration::millis(7)),
            Pace::YieldNow => panic!("expected SleepFor"),
        }
    }

    #[test]
    fn overrunning_body_yields_immediately() {
        let mut clock = MockClock::new();
        let start = clock.now();
        clock.advance_millis(15);
        let period = Duration::millis(10);
        assert_eq!(pace(&clock, start, period), Pace::YieldNow);
    }

    #[test]
    fn exact_period_yields_immediately() {
        let mut clock = MockClock::new();
        let start = clock.now();
        clock.advance_millis(10);
        let period = Duration::millis(10);
        assert_eq!(pace(&clock, start, period), Pace::YieldNow);
    }
}
