mod builder;
mod consumer;
mod producer;

pub use builder::QueueBuilder;
pub use consumer::Consumer;
pub use producer::Producer;

pub mod ring;
mod ring_impl;

pub use ring::{PacketQueue, Slot}; // re-export for stable path
