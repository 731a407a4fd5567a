//! Accumulating timer
//!
//! A timer tracks progress (`step`) against a target (`add`). It is done once
//! progress has caught up with the target. The same type serves as the
//! simulation lag accumulator (auto-reset) and as the suspend countdown
//! (manual reset).

/// Progress-vs-target timer
///
/// Values are kept in `f64` so that long runs of small `f32` increments do not
/// drift past the target boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    accumulated: f64,
    target: f64,
    auto_reset: bool,
}

impl Default for Timer {
    /// An auto-reset timer with no outstanding target (the lag accumulator).
    fn default() -> Self {
        Self::new(0.0, true)
    }
}

impl Timer {
    pub fn new(target: f32, auto_reset: bool) -> Self {
        Self {
            accumulated: 0.0,
            target: f64::from(target.max(0.0)),
            auto_reset,
        }
    }

    /// A manual-reset countdown that starts done.
    pub fn countdown() -> Self {
        Self::new(0.0, false)
    }

    /// Extend the target by `amount`
    pub fn add(&mut self, amount: f32) -> &mut Self {
        self.target += f64::from(amount.max(0.0));
        self
    }

    /// Advance progress by `dt`
    ///
    /// An auto-reset timer that becomes done is rebased: the target is
    /// subtracted from both sides so only the overshoot is kept.
    pub fn step(&mut self, dt: f32) -> &mut Self {
        self.accumulated += f64::from(dt.max(0.0));
        if self.auto_reset && self.is_done() {
            self.accumulated -= self.target;
            self.target = 0.0;
        }
        self
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.accumulated >= self.target
    }

    /// Zero progress; a manual-reset timer also drops its target
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
        if !self.auto_reset {
            self.target = 0.0;
        }
    }

    /// How far progress is past the target (zero while not done)
    pub fn overshoot(&self) -> f64 {
        (self.accumulated - self.target).max(0.0)
    }

    /// Time still needed before the timer is done (zero once done)
    pub fn remaining(&self) -> f32 {
        (self.target - self.accumulated).max(0.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_timer_is_done() {
        assert!(Timer::default().is_done());
        assert!(Timer::countdown().is_done());
    }

    #[test]
    fn test_countdown_add_then_step() {
        let mut timer = Timer::countdown();
        timer.add(0.5);
        assert!(!timer.is_done());
        assert!(!timer.step(0.25).is_done());
        assert!(timer.step(0.25).is_done());
        // Manual reset keeps the progress until reset
        assert!(timer.is_done());
        assert_eq!(timer.remaining(), 0.0);

        timer.reset();
        assert!(timer.is_done());
        timer.add(1.0);
        assert!(!timer.is_done());
        assert!((timer.remaining() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_exact_boundary_counts_as_done() {
        let mut timer = Timer::countdown();
        timer.add(0.5);
        timer.step(0.5);
        assert!(timer.is_done());
    }

    #[test]
    fn test_auto_reset_keeps_overshoot() {
        let mut timer = Timer::default();
        timer.add(0.25);
        timer.step(0.125);
        assert!(!timer.is_done());
        timer.step(0.25);
        assert!(timer.is_done());
        assert!((timer.overshoot() - 0.125).abs() < 1e-6);

        // Overshoot counts against the next target
        timer.add(0.125);
        assert!(timer.is_done());
    }

    #[test]
    fn test_auto_reset_keeps_outstanding_target() {
        let mut lag = Timer::new(0.0, true);
        lag.add(1.0);
        lag.step(0.25);
        lag.reset();
        assert!(!lag.is_done());
        assert!((lag.remaining() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_negative_amounts_are_ignored() {
        let mut timer = Timer::countdown();
        timer.add(-1.0);
        timer.step(-1.0);
        assert!(timer.is_done());
        assert_eq!(timer.overshoot(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_done_iff_stepped_reaches_target(
            ops in prop::collection::vec((any::<bool>(), 0u16..1000), 0..64),
            auto_reset in any::<bool>(),
        ) {
            let mut timer = Timer::new(0.0, auto_reset);
            let mut added = 0.0f64;
            let mut stepped = 0.0f64;
            for (is_add, amount) in ops {
                // Multiples of 1/1024 are exact in both f32 and f64
                let amount = f32::from(amount) / 1024.0;
                if is_add {
                    timer.add(amount);
                    added += f64::from(amount);
                } else {
                    timer.step(amount);
                    stepped += f64::from(amount);
                }
                prop_assert_eq!(timer.is_done(), stepped >= added);
            }
        }
    }
}
