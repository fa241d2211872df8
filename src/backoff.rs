//! Contention backoff for the lock-free hot paths.

use std::thread;
use std::time::Duration;

/// Spin steps before the policy switches to yielding.
const MAX_SPINS: u32 = 16;
/// Yield steps before the policy switches to sleeping.
const MAX_YIELDS: u32 = 64;

/// Graduated per-thread backoff: busy-spin with an exponentially growing
/// pause budget, then cooperative yields, then 1 microsecond sleeps.
///
/// One instance covers one in-flight attempt; `reset` rewinds the
/// escalation once progress is observed.
#[derive(Debug)]
pub(crate) struct Backoff {
    step: u32,
}

impl Backoff {
    #[inline]
    pub(crate) fn new() -> Self {
        Self { step: 0 }
    }

    #[inline]
    pub(crate) fn snooze(&mut self) {
        if self.step < MAX_SPINS {
            for _ in 0..(1u32 << self.step) {
                std::hint::spin_loop();
            }
        } else if self.step < MAX_SPINS + MAX_YIELDS {
            thread::yield_now();
        } else {
            thread::sleep(Duration::from_micros(1));
        }
        self.step = self.step.saturating_add(1);
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.step = 0;
    }
}
