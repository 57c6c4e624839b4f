//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter directive for a `-v` count and the configured level.
///
/// No flag keeps the configured level, `-v` is `info`, `-vv` and more is `debug`.
pub fn filter_directive(verbose: u8, configured: &str) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Install a stderr fmt subscriber.
///
/// `RUST_LOG` takes precedence over `directive` when set and valid.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    // Try to set as global default (ignore error if already set)
    let _ = tracing::subscriber::set_global_default(subscriber);
}
