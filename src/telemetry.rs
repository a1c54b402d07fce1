//! Logging setup.
//!
//! Store operations emit `tracing` events. The binary installs a stderr
//! subscriber filtered by `RUST_LOG`; without it the filter defaults to
//! `branchstore=debug` under `--debug` and `warn` otherwise.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are ignored.
pub fn init(debug: bool) {
    let fallback = if debug { "branchstore=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
