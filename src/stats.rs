//! Per-queue operation counters.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::Relaxed;

/// Atomically updated counters attached to a queue instance.
///
/// Counters are observational, not synchronizing: every mutation is relaxed
/// and never participates in the slot protocol. When the block is disabled
/// the recording calls are no-ops and every load keeps returning zero.
#[derive(Debug)]
pub struct QueueStats {
    enabled: bool,
    enqueue_attempts: AtomicU64,
    enqueue_successes: AtomicU64,
    dequeue_attempts: AtomicU64,
    dequeue_successes: AtomicU64,
    batch_enqueues: AtomicU64,
    batch_dequeues: AtomicU64,
    contention_events: AtomicU64,
}

impl QueueStats {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            enqueue_attempts: AtomicU64::new(0),
            enqueue_successes: AtomicU64::new(0),
            dequeue_attempts: AtomicU64::new(0),
            dequeue_successes: AtomicU64::new(0),
            batch_enqueues: AtomicU64::new(0),
            batch_dequeues: AtomicU64::new(0),
            contention_events: AtomicU64::new(0),
        }
    }

    /// Whether this block records anything.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn enqueue_attempts(&self) -> u64 {
        self.enqueue_attempts.load(Relaxed)
    }

    pub fn enqueue_successes(&self) -> u64 {
        self.enqueue_successes.load(Relaxed)
    }

    pub fn dequeue_attempts(&self) -> u64 {
        self.dequeue_attempts.load(Relaxed)
    }

    pub fn dequeue_successes(&self) -> u64 {
        self.dequeue_successes.load(Relaxed)
    }

    pub fn batch_enqueues(&self) -> u64 {
        self.batch_enqueues.load(Relaxed)
    }

    pub fn batch_dequeues(&self) -> u64 {
        self.batch_dequeues.load(Relaxed)
    }

    pub fn contention_events(&self) -> u64 {
        self.contention_events.load(Relaxed)
    }

    /// Successful enqueues over attempts; 0 when nothing was attempted.
    pub fn enqueue_success_rate(&self) -> f64 {
        Self::rate(self.enqueue_successes(), self.enqueue_attempts())
    }

    /// Successful dequeues over attempts; 0 when nothing was attempted.
    pub fn dequeue_success_rate(&self) -> f64 {
        Self::rate(self.dequeue_successes(), self.dequeue_attempts())
    }

    fn rate(successes: u64, attempts: u64) -> f64 {
        if attempts == 0 {
            0.0
        } else {
            successes as f64 / attempts as f64
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.enqueue_attempts.store(0, Relaxed);
        self.enqueue_successes.store(0, Relaxed);
        self.dequeue_attempts.store(0, Relaxed);
        self.dequeue_successes.store(0, Relaxed);
        self.batch_enqueues.store(0, Relaxed);
        self.batch_dequeues.store(0, Relaxed);
        self.contention_events.store(0, Relaxed);
    }

    pub(crate) fn record_enqueue_attempt(&self) {
        if self.enabled {
            self.enqueue_attempts.fetch_add(1, Relaxed);
        }
    }

    pub(crate) fn record_enqueue_success(&self) {
        if self.enabled {
            self.enqueue_successes.fetch_add(1, Relaxed);
        }
    }

    pub(crate) fn record_dequeue_attempt(&self) {
        if self.enabled {
            self.dequeue_attempts.fetch_add(1, Relaxed);
        }
    }

    pub(crate) fn record_dequeue_success(&self) {
        if self.enabled {
            self.dequeue_successes.fetch_add(1, Relaxed);
        }
    }

    pub(crate) fn record_batch_enqueue(&self) {
        if self.enabled {
            self.batch_enqueues.fetch_add(1, Relaxed);
        }
    }

    pub(crate) fn record_batch_dequeue(&self) {
        if self.enabled {
            self.batch_dequeues.fetch_add(1, Relaxed);
        }
    }

    pub(crate) fn record_contention(&self) {
        if self.enabled {
            self.contention_events.fetch_add(1, Relaxed);
        }
    }
}
