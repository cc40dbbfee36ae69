//! Host wall-clock tick source.
//!
//! Derives ticks from `std::time::Instant` at a fixed period, for running
//! the simulator in real time. On target the tick source is the Timer0
//! overflow; for deterministic runs use the
//! [`Timer0`](crate::drivers::timer0::Timer0) model instead.

use std::time::{Duration, Instant};

use crate::app::ports::TickSource;
use crate::Tick;

pub struct HostTicks {
    start: Instant,
    period: Duration,
}

impl HostTicks {
    pub fn new(period: Duration) -> Self {
        Self {
            start: Instant::now(),
            period: period.max(Duration::from_micros(1)),
        }
    }

    /// Tick period matching a Timer0 configuration.
    pub fn from_period_us(period_us: u32) -> Self {
        Self::new(Duration::from_micros(u64::from(period_us)))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn ticks_at(&self, at: Instant) -> u128 {
        at.duration_since(self.start).as_nanos() / self.period.as_nanos()
    }
}

impl TickSource for HostTicks {
    /// Ticks since construction, wrapping like the hardware counter.
    fn now(&self) -> Tick {
        self.ticks_at(Instant::now()) as Tick
    }

    /// Sleep until `n` tick boundaries have passed.
    fn wait_ticks(&mut self, n: Tick) {
        if n == 0 {
            return;
        }
        let target = self.ticks_at(Instant::now()) + u128::from(n);
        let nanos = (target * self.period.as_nanos()).min(u128::from(u64::MAX)) as u64;
        let deadline = self.start + Duration::from_nanos(nanos);
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}
