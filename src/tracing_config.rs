//! Tracing configuration (text output for debugging).
//!
//! The converter logs through `tracing` (`trace!` for per-type dispatch,
//! `debug!` for per-symbol decisions, `warn!` for recoverable problems).
//! Hosts that already install a subscriber should skip this module; tests
//! and small harnesses can call [`init_tracing`] once.

use tracing_subscriber::EnvFilter;

/// Install a global text subscriber honoring `TSREFLECT_LOG` (falling back
/// to `RUST_LOG`, then `warn`). Safe to call more than once; later calls
/// are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("TSREFLECT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
