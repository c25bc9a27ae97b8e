//! Tracing subscriber setup

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Subscriber for the window before configuration is loaded.
///
/// Honours `RUST_LOG` and otherwise logs at `info` in plain text.
pub fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish()
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level when set. Calling this twice is
/// harmless; the second install is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_thread_ids(false))
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
