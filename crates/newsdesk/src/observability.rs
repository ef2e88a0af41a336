//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. With `json` set,
/// events are written as one JSON object per line.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(json: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
