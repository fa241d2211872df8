//! Optional tracing hooks.
//!
//! Enable with `--features tracing`. The macros below become no-ops when the
//! feature is disabled, so the queue carries zero instrumentation cost by
//! default. Events fire only on cold paths; the enqueue/dequeue hot loops
//! are never instrumented.

/// Install a default `tracing` subscriber with an env-filter.
///
/// Call this at the start of tests or demos to see trace output. Does
/// nothing when the `tracing` feature is disabled.
#[cfg(feature = "tracing")]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("packet_ring=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(filter)
        .init();
}

#[cfg(not(feature = "tracing"))]
pub const fn init_tracing() {}

#[cfg(feature = "tracing")]
pub(crate) use tracing::debug;

#[cfg(not(feature = "tracing"))]
macro_rules! debug_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use debug_noop as debug;
