//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Build the default filter directive for a binary.
///
/// Cargo binary names use hyphens while tracing targets use the crate path,
/// so `murmur-server` becomes `murmur_server`.
pub fn default_directive(bin_name: &str, default_level: &str) -> String {
    let target = bin_name.replace('-', "_");
    format!("{target}={default_level},tower_http={default_level}")
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the default directive when it is set.
/// Returns `false` when a global subscriber was already installed; that
/// subscriber stays in place and the failure is reported through it.
pub fn setup_logger(bin_name: &str, default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(bin_name, default_level)));

    match tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_target(true))
        .with(filter)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(bin_name, "Keeping existing tracing subscriber: {}", e);
            false
        }
    }
}
