//! Server configuration from environment variables.
//!
//! Variables are prefixed with `APP_CONFIG__` and nested with `__`, e.g.
//! `APP_CONFIG__DB__URL` or `APP_CONFIG__RUN__PORT`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_PREFIX: &str = "APP_CONFIG__";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_POOL_SIZE: u32 = 8;
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: i64 = 3600;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite database path, or `:memory:`.
    pub url: String,
    /// Log every SQL statement at debug level.
    pub echo: bool,
    pub pool_size: u32,
}

#[derive(Debug, Clone)]
pub struct AccessTokenConfig {
    pub lifetime_seconds: i64,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub run: RunConfig,
    pub db: DatabaseConfig,
    pub access_token: AccessTokenConfig,
    pub upload_dir: PathBuf,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Keys passed to
    /// `lookup` are fully prefixed (`APP_CONFIG__DB__URL`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        let url = get("DB__URL")
            .ok_or_else(|| ConfigError::MissingEnvVar(format!("{ENV_PREFIX}DB__URL")))?;

        Ok(Self {
            run: RunConfig {
                host: get("RUN__HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: parse_or(&get, "RUN__PORT", DEFAULT_PORT)?,
            },
            db: DatabaseConfig {
                url,
                echo: parse_bool(&get, "DB__ECHO")?,
                pool_size: parse_or(&get, "DB__POOL_SIZE", DEFAULT_POOL_SIZE)?,
            },
            access_token: AccessTokenConfig {
                lifetime_seconds: parse_or(
                    &get,
                    "ACCESS_TOKEN__LIFETIME_SECONDS",
                    DEFAULT_TOKEN_LIFETIME_SECONDS,
                )?,
            },
            upload_dir: get("UPLOADS__DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.run.host, self.run.port)
    }
}

fn parse_or<T, G>(get: &G, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: format!("{ENV_PREFIX}{name}"),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_bool<G>(get: &G, name: &str) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(name).as_deref().map(str::trim) {
        None => Ok(false),
        Some("1" | "true" | "True" | "TRUE") => Ok(true),
        Some("0" | "false" | "False" | "FALSE" | "") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            key: format!("{ENV_PREFIX}{name}"),
            value: other.to_string(),
        }),
    }
}
