use std::sync::atomic::{AtomicU64, AtomicUsize};
use std::sync::Arc;

use super::{Consumer, PacketQueue, Producer};
use crate::error::QueueError;
use crate::trace;

/// State shared by every producer and consumer handle built over one queue.
pub(crate) struct Shared {
    pub(crate) queue: PacketQueue,
    /// Live producer handles; consumers report `BrokenPipe` once this hits
    /// zero with the queue drained.
    pub(crate) producers: AtomicUsize,
    /// Live consumer handles; producers report `BrokenPipe` once zero.
    pub(crate) consumers: AtomicUsize,
    /// Monotonic id source shared by the producer handle family.
    pub(crate) next_id: AtomicU64,
}

/// Builder for a queue or a producer/consumer handle pair.
pub struct QueueBuilder {
    capacity: usize,
    stats_enabled: bool,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            capacity: 1024,
            stats_enabled: false,
        }
    }
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested minimum capacity; the effective capacity is the next power
    /// of two, at least 2.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Record [`crate::QueueStats`] on every operation.
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.stats_enabled = enabled;
        self
    }

    /// Build the bare queue.
    pub fn build(self) -> Result<PacketQueue, QueueError> {
        PacketQueue::with_options(self.capacity, self.stats_enabled)
    }

    /// Build a cloneable producer/consumer handle pair over one shared
    /// queue.
    pub fn build_pair(self) -> Result<(Producer, Consumer), QueueError> {
        let queue = PacketQueue::with_options(self.capacity, self.stats_enabled)?;
        trace::debug!(capacity = queue.capacity(), "channel pair created");

        let shared = Arc::new(Shared {
            queue,
            producers: AtomicUsize::new(1),
            consumers: AtomicUsize::new(1),
            next_id: AtomicU64::new(0),
        });
        Ok((Producer::new(shared.clone()), Consumer::new(shared)))
    }
}
