//! Diagnostics for the crate itself
//!
//! Channel lifecycle events and sink failures are reported through `tracing`.
//! Hosts that don't install their own subscriber can call [`init_diagnostics`].

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "output_channel=info";

/// Install a stderr subscriber filtered by `RUST_LOG`
///
/// Fails if a global subscriber is already set.
pub fn init_diagnostics() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install diagnostics subscriber")
}
