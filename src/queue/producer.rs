use std::io;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Relaxed};
use std::sync::Arc;

use super::builder::Shared;
use super::PacketQueue;
use crate::packet::{Packet, PacketPriority};

/// A cloneable producing handle over a shared packet queue.
///
/// Every clone draws ids from the same monotonic counter, so packets
/// stamped through [`Producer::send_payload`] are unique across the handle
/// family.
pub struct Producer {
    shared: Arc<Shared>,
}

impl Producer {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Enqueue a caller-built packet.
    ///
    /// # Returns
    /// * `Ok(())` if the packet was queued
    /// * `WouldBlock` if the queue is full
    /// * `BrokenPipe` if the queue is full and every consumer handle has
    ///   been dropped
    pub fn send(&self, packet: Packet) -> io::Result<()> {
        if self.shared.queue.enqueue(packet) {
            return Ok(());
        }
        if self.shared.consumers.load(Acquire) == 0 {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "all consumers have been dropped",
            ));
        }
        Err(io::Error::new(io::ErrorKind::WouldBlock, "queue is full"))
    }

    /// Build and enqueue a packet stamped with the next id from the shared
    /// counter, returning the id.
    pub fn send_payload(
        &self,
        payload: *mut u8,
        length: usize,
        priority: PacketPriority,
    ) -> io::Result<u64> {
        let id = self.next_id();
        self.send(Packet::with_payload(payload, length, priority, id))?;
        Ok(id)
    }

    /// Enqueue a batch, returning how many packets were queued.
    ///
    /// A zero count on a non-empty batch reports `WouldBlock` (or
    /// `BrokenPipe` once every consumer is gone), so partial progress is
    /// never hidden behind an error.
    pub fn send_batch(&self, packets: &[Packet]) -> io::Result<usize> {
        if packets.is_empty() {
            return Ok(0);
        }
        let sent = self.shared.queue.enqueue_batch(packets);
        if sent > 0 {
            return Ok(sent);
        }
        if self.shared.consumers.load(Acquire) == 0 {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "all consumers have been dropped",
            ));
        }
        Err(io::Error::new(io::ErrorKind::WouldBlock, "queue is full"))
    }

    /// Reserve the next monotonic packet id.
    pub fn next_id(&self) -> u64 {
        self.shared.next_id.fetch_add(1, Relaxed)
    }

    /// The underlying queue, for observers and statistics.
    pub fn queue(&self) -> &PacketQueue {
        &self.shared.queue
    }
}

impl Clone for Producer {
    fn clone(&self) -> Self {
        self.shared.producers.fetch_add(1, Relaxed);
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        self.shared.producers.fetch_sub(1, AcqRel);
    }
}
