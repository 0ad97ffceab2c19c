//! Process configuration read from the environment.
//!
//! Both binaries read the same five variables. Unset variables fall back to
//! defaults, and an unparsable `SERVER_PORT` falls back to `8080` rather than
//! failing startup.

use crate::task::adapters::sqlite::{DatabaseUrl, DatabaseUrlError};
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Port used when `SERVER_PORT` is unset or unparsable.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Database used when `DATABASE_URL` is unset.
pub const DEFAULT_DATABASE_URL: &str = "sqlite3://tasks.db";

/// Log level used when `LOG_LEVEL` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const DEFAULT_JWT_SECRET: &str = "your-secret-key";

/// Host the listener binds to when `SERVER_HOST` is empty.
const ALL_INTERFACES: &str = "0.0.0.0";

const ENV_KEYS: [&str; 5] = [
    "SERVER_HOST",
    "SERVER_PORT",
    "DATABASE_URL",
    "LOG_LEVEL",
    "JWT_SECRET",
];

/// Errors returned while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment could not be read into configuration values.
    #[error("failed to read configuration: {0}")]
    Extract(Box<figment::Error>),

    /// `DATABASE_URL` is not a supported connection string.
    #[error(transparent)]
    DatabaseUrl(#[from] DatabaseUrlError),
}

/// Resolved process configuration.
#[derive(Debug)]
pub struct Config {
    /// Interface to listen on; empty means all interfaces.
    pub server_host: String,
    /// TCP port to listen on.
    pub server_port: u16,
    /// Task store location.
    pub database_url: DatabaseUrl,
    /// Default tracing filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Token signing secret. Loaded but not enforced by any route.
    pub jwt_secret: SecretString,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    #[serde(deserialize_with = "lenient::text")]
    server_host: Option<String>,
    #[serde(deserialize_with = "lenient::port")]
    server_port: Option<u16>,
    #[serde(deserialize_with = "lenient::text")]
    database_url: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    log_level: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    jwt_secret: Option<String>,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable has an unusable shape or
    /// `DATABASE_URL` names an unsupported database.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&environment())
    }

    /// Resolves configuration from an arbitrary figment.
    ///
    /// Keys are the lowercase variable names (`server_port`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] under the same conditions as [`Config::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let raw: RawConfig = figment
            .extract()
            .map_err(|err| ConfigError::Extract(Box::new(err)))?;

        let database_url = DatabaseUrl::parse(
            raw.database_url
                .as_deref()
                .unwrap_or(DEFAULT_DATABASE_URL),
        )?;

        Ok(Self {
            server_host: raw.server_host.unwrap_or_default(),
            server_port: raw.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            database_url,
            log_level: raw
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
            jwt_secret: SecretString::from(
                raw.jwt_secret
                    .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_owned()),
            ),
        })
    }

    /// Returns the `host:port` address for the HTTP listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        let host = if self.server_host.is_empty() {
            ALL_INTERFACES
        } else {
            self.server_host.as_str()
        };
        format!("{host}:{}", self.server_port)
    }
}

/// Collects the configuration variables as verbatim strings.
///
/// `Env` used as a provider guesses value types, which turns `00123` into a
/// number and `[::1]` into an array. Its raw iterator does not.
fn environment() -> Figment {
    let values: BTreeMap<String, String> = Env::raw()
        .only(&ENV_KEYS)
        .iter()
        .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
        .collect();
    Figment::from(Serialized::defaults(values))
}

/// Deserializers that accept any scalar shape.
///
/// Figments assembled by callers may carry numbers or booleans where a
/// string is expected, so a numeric secret or port is read as text.
mod lenient {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    struct TextVisitor;

    impl Visitor<'_> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a scalar value")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_i128<E: de::Error>(self, value: i128) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_char<E: de::Error>(self, value: char) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value.to_owned())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }
    }

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TextVisitor).map(Some)
    }

    /// Reads a port, yielding `None` for anything that is not a valid `u16`.
    pub(super) fn port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = deserializer.deserialize_any(TextVisitor)?;
        Ok(value.trim().parse().ok())
    }
}
