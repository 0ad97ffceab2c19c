//! Tracing subscriber setup shared by both binaries.

use crate::config::{Config, ConfigError, DEFAULT_LOG_LEVEL};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Filter used when the configured level is not a valid directive.
const FALLBACK_FILTER: &str = "info";

/// Builds the event filter: `RUST_LOG` wins, then `log_level`, then `info`.
#[must_use]
pub fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.trim().to_ascii_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Installs the global fmt subscriber.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one stays in place.
#[must_use]
pub fn init(log_level: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(log_level))
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Installs logging for a process from the outcome of loading its
/// configuration.
///
/// A loaded configuration supplies the log level. A failed load installs the
/// default level first so the failure is logged before it is returned.
///
/// # Errors
///
/// Returns the configuration error unchanged.
pub fn init_from_config(loaded: Result<Config, ConfigError>) -> Result<Config, ConfigError> {
    let log_level = loaded
        .as_ref()
        .map_or(DEFAULT_LOG_LEVEL, |config| config.log_level.as_str());
    if !init(log_level) {
        warn!("tracing subscriber already installed");
    }
    loaded.inspect_err(|err| error!(error = %err, "failed to load configuration"))
}
