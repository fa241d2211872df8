//! Bounded, lock-free, multi-producer multi-consumer queue for fixed-shape
//! packet records.
//!
//! The core is a sequenced ring: every slot pairs one [`Packet`] with an
//! atomic sequence counter, and producers/consumers gain exclusive slot
//! access by CAS-advancing the `tail`/`head` cursors. There are no locks and
//! no OS-level waits; callers poll or layer their own wait strategy on top
//! of the non-waiting operations.

pub mod error;
pub mod packet;
pub mod queue;
pub mod stats;

mod backoff;
pub mod trace;

pub use error::QueueError;
pub use packet::{Packet, PacketPriority};
pub use queue::{Consumer, PacketQueue, Producer, QueueBuilder};
pub use stats::QueueStats;
