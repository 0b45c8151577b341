//! Tracing bootstrap.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber from `APIMAP_LOG`, falling back
/// to `RUST_LOG`, then `warn`.
///
/// Safe to call more than once; later calls are no-ops. Hosts embedding the
/// engine in a process that already installed a subscriber can skip this
/// entirely.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("APIMAP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
