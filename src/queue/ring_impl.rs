// Operations on the sequenced ring. The protocol follows the slot phase
// table in `ring.rs`; cursor differences are computed with wrapping
// subtraction and interpreted as signed so 64-bit wraparound stays correct.

use std::fmt;
use std::mem;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Relaxed, Release};
use std::thread;

use crossbeam_utils::CachePadded;

use crate::backoff::Backoff;
use crate::error::QueueError;
use crate::packet::Packet;
use crate::stats::QueueStats;
use crate::trace;

use super::ring::{PacketQueue, Slot};

impl PacketQueue {
    /// Create a queue with statistics disabled.
    ///
    /// `capacity` is rounded up to the next power of two, minimum 2.
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        Self::with_options(capacity, false)
    }

    /// Create a queue that records [`QueueStats`] on every operation.
    pub fn with_stats(capacity: usize) -> Result<Self, QueueError> {
        Self::with_options(capacity, true)
    }

    pub(crate) fn with_options(
        requested: usize,
        stats_enabled: bool,
    ) -> Result<Self, QueueError> {
        let capacity = round_up_capacity(requested)?;
        let buffer: Box<[Slot]> = (0..capacity).map(|i| Slot::new(i as u64)).collect();

        trace::debug!(requested, capacity, stats_enabled, "packet queue created");

        Ok(Self {
            buffer,
            capacity,
            mask: capacity - 1,
            tail_cursor: CachePadded::new(AtomicU64::new(0)),
            head_cursor: CachePadded::new(AtomicU64::new(0)),
            stats: QueueStats::new(stats_enabled),
        })
    }

    /// Enqueue one packet. Returns `false` only when the queue is
    /// definitively full at the observed cursors.
    pub fn enqueue(&self, packet: Packet) -> bool {
        self.stats.record_enqueue_attempt();

        let mut backoff = Backoff::new();
        let mut tail = self.tail_cursor.load(Relaxed);

        loop {
            let slot = self.slot(tail);
            let seq = slot.sequence.load(Acquire);
            let dif = seq.wrapping_sub(tail) as i64;

            if dif == 0 {
                match self.tail_cursor.compare_exchange_weak(
                    tail,
                    tail.wrapping_add(1),
                    Relaxed,
                    Relaxed,
                ) {
                    Ok(_) => {
                        // We own this slot now
                        unsafe { *slot.packet.get() = packet };
                        // publish
                        slot.sequence.store(tail.wrapping_add(1), Release);
                        self.stats.record_enqueue_success();
                        return true;
                    }
                    Err(current) => {
                        tail = current;
                        backoff.reset();
                    }
                }
            } else if dif < 0 {
                // A prior revolution of this slot is still live; full unless
                // the head has moved on.
                let head = self.head_cursor.load(Acquire);
                if tail.wrapping_sub(head) >= self.capacity as u64 {
                    return false;
                }
                self.stats.record_contention();
                backoff.snooze();
                tail = self.tail_cursor.load(Relaxed);
            } else {
                // Another producer already moved past this cursor.
                backoff.snooze();
                tail = self.tail_cursor.load(Relaxed);
            }
        }
    }

    /// Dequeue one packet; `None` only when the queue is definitively empty.
    pub fn dequeue(&self) -> Option<Packet> {
        self.stats.record_dequeue_attempt();

        let mut backoff = Backoff::new();
        let mut head = self.head_cursor.load(Relaxed);

        loop {
            let slot = self.slot(head);
            let seq = slot.sequence.load(Acquire);
            let dif = seq.wrapping_sub(head.wrapping_add(1)) as i64;

            if dif == 0 {
                match self.head_cursor.compare_exchange_weak(
                    head,
                    head.wrapping_add(1),
                    Relaxed,
                    Relaxed,
                ) {
                    Ok(_) => {
                        let packet = unsafe { (*slot.packet.get()).take() };
                        // free slot for future producers
                        slot.sequence
                            .store(head.wrapping_add(self.capacity as u64), Release);
                        self.stats.record_dequeue_success();
                        return Some(packet);
                    }
                    Err(current) => {
                        head = current;
                        backoff.reset();
                    }
                }
            } else if dif < 0 {
                let tail = self.tail_cursor.load(Acquire);
                if head >= tail {
                    return None; // definitively empty
                }
                self.stats.record_contention();
                backoff.snooze();
                head = self.head_cursor.load(Relaxed);
            } else {
                // Another consumer already moved past this cursor.
                backoff.snooze();
                head = self.head_cursor.load(Relaxed);
            }
        }
    }

    /// Single-attempt enqueue: no backoff, no contention accounting.
    pub fn try_enqueue(&self, packet: Packet) -> bool {
        let tail = self.tail_cursor.load(Relaxed);
        let slot = self.slot(tail);
        let seq = slot.sequence.load(Acquire);

        if seq == tail
            && self
                .tail_cursor
                .compare_exchange(tail, tail.wrapping_add(1), Relaxed, Relaxed)
                .is_ok()
        {
            unsafe { *slot.packet.get() = packet };
            slot.sequence.store(tail.wrapping_add(1), Release);
            return true;
        }
        false
    }

    /// Single-attempt dequeue counterpart of [`Self::try_enqueue`].
    pub fn try_dequeue(&self) -> Option<Packet> {
        let head = self.head_cursor.load(Relaxed);
        let slot = self.slot(head);
        let seq = slot.sequence.load(Acquire);

        if seq == head.wrapping_add(1)
            && self
                .head_cursor
                .compare_exchange(head, head.wrapping_add(1), Relaxed, Relaxed)
                .is_ok()
        {
            let packet = unsafe { (*slot.packet.get()).take() };
            slot.sequence
                .store(head.wrapping_add(self.capacity as u64), Release);
            return Some(packet);
        }
        None
    }

    /// Enqueue a contiguous batch, returning how many packets were taken
    /// from the front of `packets` (short on full).
    ///
    /// Reservation commits the cursor advance before the slots are filled;
    /// the per-slot sequence wait covers reservations that outrun a slower
    /// producer's publish at the same logical index. It must not be
    /// shortcut.
    pub fn enqueue_batch(&self, packets: &[Packet]) -> usize {
        if packets.is_empty() {
            return 0;
        }
        self.stats.record_batch_enqueue();

        let mut enqueued = 0usize;
        let mut backoff = Backoff::new();

        while enqueued < packets.len() {
            let tail = self.tail_cursor.load(Acquire);
            let head = self.head_cursor.load(Acquire);

            if tail.wrapping_sub(head) >= self.capacity as u64 {
                break; // full
            }

            let free = self.capacity as u64 - tail.wrapping_sub(head);
            let batch = ((packets.len() - enqueued) as u64).min(free);
            if batch == 0 {
                backoff.snooze();
                continue;
            }

            if self
                .tail_cursor
                .compare_exchange_weak(tail, tail.wrapping_add(batch), AcqRel, Acquire)
                .is_ok()
            {
                for i in 0..batch {
                    let cursor = tail.wrapping_add(i);
                    let slot = self.slot(cursor);
                    while slot.sequence.load(Acquire) != cursor {
                        thread::yield_now();
                    }
                    unsafe { *slot.packet.get() = packets[enqueued + i as usize] };
                    slot.sequence.store(cursor.wrapping_add(1), Release);
                }
                enqueued += batch as usize;
                backoff.reset();
            } else {
                backoff.snooze();
            }
        }
        enqueued
    }

    /// Dequeue into a writable batch, returning how many slots of `out`
    /// were filled from the front (short on empty).
    pub fn dequeue_batch(&self, out: &mut [Packet]) -> usize {
        if out.is_empty() {
            return 0;
        }
        self.stats.record_batch_dequeue();

        let mut dequeued = 0usize;
        let mut backoff = Backoff::new();

        while dequeued < out.len() {
            let head = self.head_cursor.load(Acquire);
            let tail = self.tail_cursor.load(Acquire);

            if head >= tail {
                break; // empty
            }

            let available = tail.wrapping_sub(head);
            let batch = ((out.len() - dequeued) as u64).min(available);
            if batch == 0 {
                backoff.snooze();
                continue;
            }

            if self
                .head_cursor
                .compare_exchange_weak(head, head.wrapping_add(batch), AcqRel, Acquire)
                .is_ok()
            {
                for i in 0..batch {
                    let cursor = head.wrapping_add(i);
                    let slot = self.slot(cursor);
                    while slot.sequence.load(Acquire) != cursor.wrapping_add(1) {
                        thread::yield_now();
                    }
                    out[dequeued + i as usize] = unsafe { (*slot.packet.get()).take() };
                    slot.sequence
                        .store(cursor.wrapping_add(self.capacity as u64), Release);
                }
                dequeued += batch as usize;
                backoff.reset();
            } else {
                backoff.snooze();
            }
        }
        dequeued
    }

    /// Number of resident packets.
    ///
    /// `head` is loaded before `tail` so the difference cannot underflow;
    /// the result is clamped to `[0, capacity]` and may be transiently
    /// stale under concurrency.
    pub fn len(&self) -> usize {
        let head = self.head_cursor.load(Acquire);
        let tail = self.tail_cursor.load(Acquire);
        (tail.wrapping_sub(head) as usize).min(self.capacity)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Effective (power-of-two) capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Static footprint: the control block plus the slot array.
    pub fn memory_usage(&self) -> usize {
        mem::size_of::<Self>() + self.capacity * mem::size_of::<Slot>()
    }

    /// Read-only statistics handle.
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }

    /// Zero all statistics counters.
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    #[inline]
    fn slot(&self, cursor: u64) -> &Slot {
        &self.buffer[(cursor as usize) & self.mask]
    }
}

fn round_up_capacity(requested: usize) -> Result<usize, QueueError> {
    if requested == 0 {
        return Err(QueueError::ZeroCapacity);
    }
    let capacity = requested
        .max(2)
        .checked_next_power_of_two()
        .ok_or(QueueError::CapacityTooLarge(requested))?;
    if capacity > usize::MAX >> 1 {
        return Err(QueueError::CapacityTooLarge(requested));
    }
    Ok(capacity)
}

/// Shows the observable state without touching any slot.
impl fmt::Debug for PacketQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketQueue")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("stats_enabled", &self.stats.enabled())
            .finish_non_exhaustive()
    }
}

// Slot access is serialized by the sequence protocol; the queue is shared
// across threads by reference.
unsafe impl Send for PacketQueue {}
unsafe impl Sync for PacketQueue {}
