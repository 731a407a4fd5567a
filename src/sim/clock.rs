//! Fixed timestep clock
//!
//! Converts variable frame deltas into a whole number of fixed increments.
//! Simulated time is allowed to run ahead of wall time by less than one
//! increment, never behind.

use super::timer::Timer;

/// Lag accumulator driving the fixed-step loop
#[derive(Debug, Clone)]
pub struct FixedClock {
    time_step: f32,
    max_delta: f32,
    lag: Timer,
    ticks: u64,
}

impl FixedClock {
    pub fn new(time_step: f32, max_delta: f32) -> Self {
        Self {
            time_step,
            max_delta,
            lag: Timer::default(),
            ticks: 0,
        }
    }

    /// Fixed increment in seconds
    #[inline]
    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    /// Feed a frame delta and return how many fixed increments to run
    ///
    /// The delta is capped at `max_delta` so a stall cannot queue unbounded
    /// catch-up work.
    pub fn advance(&mut self, delta: f32) -> u32 {
        let delta = delta.clamp(0.0, self.max_delta);
        self.lag.add(delta);

        let mut increments = 0;
        while !self.lag.is_done() {
            self.lag.step(self.time_step);
            increments += 1;
        }
        self.ticks += u64::from(increments);
        increments
    }

    /// How far simulated time leads wall time, always in `[0, time_step)`
    pub fn remainder(&self) -> f64 {
        self.lag.overshoot()
    }

    /// Total increments since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
