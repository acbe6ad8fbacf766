#![forbid(unsafe_code)]

//! Subscriber setup for hosts that want paneflow's structured events.
//!
//! The filter comes from `RUST_LOG` when set, otherwise `paneflow=info`.
//! Both initializers are no-ops if a global subscriber is already installed.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "paneflow=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a JSON-lines subscriber on stderr.
pub fn init_json() {
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install a human-readable subscriber on stderr.
pub fn init_pretty() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .try_init();
}
