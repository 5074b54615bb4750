//! Subscriber initialization

use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

/// Install the global tracing subscriber.
///
/// Log lines go to stderr. Returns an error if the filter directive is
/// invalid or a subscriber is already installed.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = EnvFilter::try_new(config.effective_level())
        .map_err(|e| ObservabilityError::Config(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(config.with_target)
        .compact();

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    tracing::debug!(
        service.name = %config.service_name,
        log.level = %config.effective_level(),
        "tracing initialized"
    );

    Ok(())
}
