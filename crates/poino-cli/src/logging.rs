//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "POINO_LOG";

/// Builds the log filter.
///
/// `POINO_LOG` wins when set and valid. Otherwise the level is `debug` with
/// `verbose` and `warn` without.
pub fn filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs the global subscriber, writing to stderr.
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
