use std::io::{self, IsTerminal};

use tracing_subscriber::EnvFilter;

/// Initializes logging. Call once at startup.
///
/// Records go to stderr so they never mix with a table or CSV written to
/// stdout. Level defaults to INFO; override with RUST_LOG.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}
