//! Logging setup
//!
//! The library only emits `tracing` events; binaries and tests that want to
//! see them call [`init_tracing`] once.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Installs a global fmt subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when that is unset. Returns `false` if a subscriber was
/// already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true).with_line_number(true))
        .try_init()
        .is_ok()
}
