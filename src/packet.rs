//! The packet record moved through the ring.

use std::cmp::Ordering;
use std::ptr;

/// Priority tag carried by every packet.
///
/// The ring itself is strictly FIFO; the tag rides along for the consumer
/// and only participates in [`Packet`] ordering.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PacketPriority {
    #[default]
    Low = 0,
    Medium = 1,
    High = 2,
    Control = 3,
}

/// A fixed-shape packet record: an opaque payload pointer, its byte length,
/// a priority tag, and a producer-assigned monotonic id.
///
/// The queue moves the handle, never the bytes. `payload` points at
/// externally owned memory; the queue does not read, write, or free it, and
/// its validity after a packet leaves the queue is the external owner's
/// lifetime contract. Copies are byte-wise, so both packets refer to the
/// same payload bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Packet {
    pub payload: *mut u8,
    pub length: usize,
    pub priority: PacketPriority,
    pub id: u64,
}

impl Packet {
    /// A packet carrying only an id; the payload is absent.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_payload(
        payload: *mut u8,
        length: usize,
        priority: PacketPriority,
        id: u64,
    ) -> Self {
        Self {
            payload,
            length,
            priority,
            id,
        }
    }

    /// A packet is valid iff it carries a payload: a non-null pointer and a
    /// positive length.
    pub fn is_valid(&self) -> bool {
        !self.payload.is_null() && self.length > 0
    }

    /// Return to the default zero state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move the record out, leaving the zero state behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self {
            payload: ptr::null_mut(),
            length: 0,
            priority: PacketPriority::Low,
            id: 0,
        }
    }
}

/// Equality is identity: id plus priority. The payload fields do not
/// participate.
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.priority == other.priority
    }
}

impl Eq for Packet {}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority-major, id-minor total order.
impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.id.cmp(&other.id))
    }
}

// The payload pointer is a pass-through reference to externally owned
// bytes; the record itself is plain data.
unsafe impl Send for Packet {}
unsafe impl Sync for Packet {}
