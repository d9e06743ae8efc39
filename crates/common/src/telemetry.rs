//! Telemetry initialization for binaries embedding the Tarn helpers.
//!
//! The library crates only emit `tracing` events; installing a subscriber
//! is the embedding application's choice. With no subscriber installed the
//! events are no-ops.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` when the variable is unset.
pub fn init_telemetry(default_directive: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
