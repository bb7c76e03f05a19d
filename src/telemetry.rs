//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never interleave with the conversation on
//! stdout. Production emits JSON lines; other environments a compact
//! human-readable format. `RUST_LOG` overrides the configured filter.

use std::io;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Failure to install the global subscriber.
#[derive(Debug, thiserror::Error)]
#[error("failed to initialise tracing: {0}")]
pub struct TelemetryError(String);

/// Builds the filter from `RUST_LOG`, falling back to `config.level`.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    ["hyper=warn", "reqwest=warn"]
        .into_iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(filter, EnvFilter::add_directive)
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = if config.is_production() {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(false)
                    .with_writer(io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_target(false).with_writer(io::stderr))
            .try_init()
    };

    result.map_err(|e| TelemetryError(e.to_string()))?;

    tracing::debug!(
        environment = ?config.environment,
        filter = %config.level,
        "Tracing initialised"
    );
    Ok(())
}
