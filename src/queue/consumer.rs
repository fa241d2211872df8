use std::io;
use std::sync::atomic::Ordering::{AcqRel, Acquire, Relaxed};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::builder::Shared;
use super::PacketQueue;
use crate::packet::Packet;

/// A cloneable consuming handle over a shared packet queue.
pub struct Consumer {
    shared: Arc<Shared>,
}

impl Consumer {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Receive one packet if one is ready.
    ///
    /// # Returns
    /// * `Ok(Some(packet))` if a packet was dequeued
    /// * `Ok(None)` if the queue is empty
    /// * `BrokenPipe` if the queue is empty and every producer handle has
    ///   been dropped
    pub fn receive(&self) -> io::Result<Option<Packet>> {
        match self.shared.queue.dequeue() {
            Some(packet) => Ok(Some(packet)),
            None => {
                if self.shared.producers.load(Acquire) == 0 {
                    // A producer may have published between the dequeue and
                    // the liveness check; drain before closing the pipe.
                    return match self.shared.queue.dequeue() {
                        Some(packet) => Ok(Some(packet)),
                        None => Err(io::Error::new(
                            io::ErrorKind::BrokenPipe,
                            "all producers have been dropped",
                        )),
                    };
                }
                Ok(None)
            }
        }
    }

    /// Receive with a deadline, polling with a capped sleep.
    ///
    /// # Returns
    /// * `Ok(Some(packet))` if a packet arrived in time
    /// * `Ok(None)` if the timeout elapsed
    /// * `BrokenPipe` as for [`Consumer::receive`]
    pub fn receive_timeout(&self, timeout: Duration) -> io::Result<Option<Packet>> {
        let start = Instant::now();

        loop {
            if let Some(packet) = self.receive()? {
                return Ok(Some(packet));
            }
            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Ok(None);
            }
            let remaining = timeout - elapsed;
            thread::sleep(remaining.min(Duration::from_millis(10)));
        }
    }

    /// Receive up to `out.len()` packets, returning how many slots were
    /// filled. An empty result reports `BrokenPipe` once every producer is
    /// gone and the queue has drained.
    pub fn receive_batch(&self, out: &mut [Packet]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        let received = self.shared.queue.dequeue_batch(out);
        if received == 0 && self.shared.producers.load(Acquire) == 0 {
            let drained = self.shared.queue.dequeue_batch(out);
            if drained == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "all producers have been dropped",
                ));
            }
            return Ok(drained);
        }
        Ok(received)
    }

    /// The underlying queue, for observers and statistics.
    pub fn queue(&self) -> &PacketQueue {
        &self.shared.queue
    }
}

impl Clone for Consumer {
    fn clone(&self) -> Self {
        self.shared.consumers.fetch_add(1, Relaxed);
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl Drop for Consumer {
    fn drop(&mut self) {
        self.shared.consumers.fetch_sub(1, AcqRel);
    }
}
