//! Simulated-time suspension
//!
//! While suspended the world and its entities do not advance; rendering
//! carries on. A suspend ends when its countdown has elapsed and, if
//! requested, an external tap has been received. The continuation attached to
//! the suspend runs exactly once when it ends.

use thiserror::Error;

use super::timer::Timer;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SuspendError {
    /// A second suspend was requested while one is still pending
    #[error("multiple concurrent suspends are not supported")]
    AlreadyPending,
}

/// Suspend countdown plus its pending continuation
///
/// `F` is whatever the owner wants to run on resume, usually a boxed
/// `FnOnce`. The controller never calls it itself; [`Suspender::release`]
/// moves it out so the owner can run it with full access to its own state.
#[derive(Debug)]
pub struct Suspender<F> {
    timer: Timer,
    tap_required: bool,
    pending: Option<F>,
}

impl<F> Default for Suspender<F> {
    fn default() -> Self {
        Self {
            timer: Timer::countdown(),
            tap_required: false,
            pending: None,
        }
    }
}

impl<F> Suspender<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the world for `duration` simulated seconds
    ///
    /// Fails without touching any state when a continuation is already
    /// pending.
    pub fn suspend(
        &mut self,
        duration: f32,
        tap_required: bool,
        on_resume: F,
    ) -> Result<(), SuspendError> {
        if self.pending.is_some() {
            return Err(SuspendError::AlreadyPending);
        }
        self.timer.add(duration);
        self.tap_required = tap_required;
        self.pending = Some(on_resume);
        log::debug!("Suspended for {duration}s (tap required: {tap_required})");
        Ok(())
    }

    /// Whether the world should be held this increment
    pub fn is_suspended(&self) -> bool {
        self.tap_required || !self.timer.is_done() || self.pending.is_some()
    }

    /// Advance the countdown by one increment
    ///
    /// Returns true when the suspend may end on its own (countdown done and
    /// no tap outstanding). The caller is expected to [`release`](Self::release)
    /// it then.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer.step(dt).is_done() && !self.tap_required
    }

    /// Whether an external tap would end the suspend right now
    pub fn awaiting_tap(&self) -> bool {
        self.tap_required && self.timer.is_done()
    }

    pub fn tap_required(&self) -> bool {
        self.tap_required
    }

    pub fn countdown_done(&self) -> bool {
        self.timer.is_done()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// End the suspend and hand back its continuation (at most once)
    pub fn release(&mut self) -> Option<F> {
        self.timer.reset();
        self.tap_required = false;
        let pending = self.pending.take();
        log::debug!("Unsuspended (continuation: {})", pending.is_some());
        pending
    }
}
