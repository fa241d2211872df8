// Slot and queue definitions for the sequenced MPMC ring.

use std::cell::UnsafeCell;
use std::sync::atomic::AtomicU64;

use crossbeam_utils::CachePadded;

use crate::packet::Packet;
use crate::stats::QueueStats;

/// Cache line size assumed for mainstream CPUs. Correctness does not depend
/// on the exact value; it only sizes the anti-false-sharing padding.
pub const CACHE_LINE_SIZE: usize = 64;

/// One physically addressable element of the ring.
///
/// `sequence` encodes the slot's phase for a cursor value `c` that maps to
/// this slot's index:
/// - `sequence == c` — EMPTY, reserved for the producer at cursor `c`.
/// - `sequence == c + 1` — FULL, reserved for the consumer at cursor `c`.
/// - `sequence == c + capacity` — consumed; the next producer revolution
///   will see EMPTY at cursor `c + capacity`.
///
/// Any other observed value means the observer's cursor is stale.
#[repr(align(64))]
pub struct Slot {
    /// The phase counter. All cross-thread publication of the resident
    /// packet runs through the release-store / acquire-load pair on this
    /// field.
    pub(crate) sequence: AtomicU64,

    /// The resident packet. Exclusively owned by the reserving producer
    /// between its tail CAS and release store, and by the reserving
    /// consumer between its head CAS and release store.
    pub(crate) packet: UnsafeCell<Packet>,
}

impl Slot {
    pub(crate) fn new(sequence: u64) -> Self {
        Self {
            sequence: AtomicU64::new(sequence),
            packet: UnsafeCell::new(Packet::default()),
        }
    }
}

// A slot must occupy exactly one cache line so neighbors never share one.
const _: () = assert!(std::mem::size_of::<Slot>() == CACHE_LINE_SIZE);
const _: () = assert!(std::mem::align_of::<Slot>() == CACHE_LINE_SIZE);

/// A bounded, lock-free, multi-producer multi-consumer packet queue.
///
/// ### Concurrency design
///
/// - **Producers (enqueue)**: claim a slot by CAS-advancing `tail_cursor`,
///   write the packet, then publish by storing `sequence = tail + 1`.
/// - **Consumers (dequeue)**: claim a ready slot by CAS-advancing
///   `head_cursor`, move the packet out, then release the slot by storing
///   `sequence = head + capacity`.
/// - **Cache-line padding**: both cursors are wrapped in `CachePadded` and
///   the slot array is boxed separately, so the two contention points and
///   the data plane never share a cache line.
///
/// Capacity is fixed at construction and always a power of two, which makes
/// `cursor & mask` the physical index.
pub struct PacketQueue {
    /// The slot array: `capacity` slots, each one cache line.
    pub(crate) buffer: Box<[Slot]>,

    /// Number of slots. A power of two, at least 2.
    pub(crate) capacity: usize,

    /// `capacity - 1`, used to wrap cursors onto physical indices.
    pub(crate) mask: usize,

    /// The producer cursor: next logical position to claim for writing.
    pub(crate) tail_cursor: CachePadded<AtomicU64>,

    /// The consumer cursor: next logical position to claim for reading.
    pub(crate) head_cursor: CachePadded<AtomicU64>,

    /// Operation counters; recording is a no-op when disabled at build time.
    pub(crate) stats: QueueStats,
}
