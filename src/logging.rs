//! Tracing subscriber setup
//!
//! Development gets colored, human-readable output at trace level for this crate;
//! production gets JSON lines at info. `RUST_LOG` overrides the level either way.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Environment;

/// Default filter directive for `environment`
pub fn default_directive(environment: Environment) -> &'static str {
    match environment {
        Environment::Development => "info,chat_relay=trace",
        Environment::Production => "info",
    }
}

/// Install the global subscriber
///
/// # Errors
///
/// Returns an error if the filter is invalid or a global subscriber is already set.
pub fn init_logging(
    environment: Environment,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(environment)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match environment {
        Environment::Development => registry
            .with(fmt::layer().with_target(true).with_ansi(true))
            .try_init()?,
        Environment::Production => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?,
    }

    Ok(())
}
