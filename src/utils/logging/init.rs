//! Subscriber initialisation

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the level filter; `RUST_LOG` takes precedence over the configured level
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Initialize the global subscriber
///
/// Safe to call more than once: later calls leave the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_target(false)
        .with_thread_ids(false);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
