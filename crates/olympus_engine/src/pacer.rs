//! Injectable pacing for cosmetic simulation delays.
//!
//! Engine start/stop and the fleet tick loop pause between steps so the
//! status stream reads like a real spool-up. The pause is not a timing
//! guarantee, so it goes through [`Pacer`] and tests use [`InstantPacer`].

use std::cell::RefCell;
use std::time::Duration;

/// Something that can block the current thread for a simulated delay.
pub trait Pacer {
    /// Pause for roughly `duration`.
    fn pause(&self, duration: Duration);
}

/// Pacer that sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Pacer that returns immediately and records every requested pause.
#[derive(Debug, Default)]
pub struct InstantPacer {
    requested: RefCell<Vec<Duration>>,
}

impl InstantPacer {
    /// Create a new instant pacer with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every pause requested so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.borrow().clone()
    }

    /// Returns the sum of all requested pauses.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.requested.borrow().iter().sum()
    }
}

impl Pacer for InstantPacer {
    fn pause(&self, duration: Duration) {
        self.requested.borrow_mut().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_pacer_records() {
        let pacer = InstantPacer::new();
        pacer.pause(Duration::from_secs(2));
        pacer.pause(Duration::from_millis(500));
        assert_eq!(pacer.requested().len(), 2);
        assert_eq!(pacer.total(), Duration::from_millis(2500));
    }

    #[test]
    fn test_thread_pacer_zero_is_noop() {
        ThreadPacer.pause(Duration::ZERO);
    }
}
