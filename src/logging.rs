//! Tracing bootstrap
//!
//! Optional helper for binaries and tests that want the prover's round
//! events on stderr. The library itself only emits `tracing` events and
//! never installs a subscriber; hosts that already have one just skip
//! this.

#![forbid(unsafe_code)]

use std::sync::Once;

static INIT: Once = Once::new();

/// Install a compact `fmt` subscriber honouring `RUST_LOG`, once.
pub fn init() {
    INIT.call_once(|| {
        if tracing::dispatcher::has_been_set() {
            return;
        }
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init();
    });
}
