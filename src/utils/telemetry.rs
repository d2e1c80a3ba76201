//! Logging Setup
//!
//! Installs the global `tracing` subscriber for the generator binaries.
//! `RUST_LOG` takes precedence over the configured default filter.

use tracing_subscriber::EnvFilter;

pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
