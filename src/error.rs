use thiserror::Error;

/// Construction-time failures.
///
/// Steady-state queue operations never error: a full queue is a `false`
/// return, an empty queue an absent `Option`, a starved batch a short count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The requested capacity was zero.
    #[error("capacity must be greater than zero")]
    ZeroCapacity,

    /// The requested capacity would round past half of the address space.
    #[error("capacity {0} rounds beyond the addressable limit")]
    CapacityTooLarge(usize),
}
