//! # Service Configuration
//!
//! All settings come from environment variables, optionally seeded from a
//! `.env` file. Variables already present in the environment win over the
//! file.
//!
//! | Variable              | Default                          |
//! |-----------------------|----------------------------------|
//! | `DB_USER` / `DB_PASS` | required unless `DB_URI` is set  |
//! | `DB_HOST`             | `cluster0.2fyd1rz.mongodb.net`   |
//! | `DB_URI`              | unset                            |
//! | `DB_NAME`             | `writeWave`                      |
//! | `PORT`                | `4000`                           |
//! | `NODE_ENV`            | unset (`production` = secure cookies) |
//! | `ACCESS_TOKEN_SECRET` | required                         |
//! | `CORS_ORIGINS`        | `http://localhost:5173`          |

use std::env;
use std::path::Path;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;
use tracing::{debug, info};

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required variable is not set
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    /// Variable is set but cannot be parsed
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The `.env` file exists but cannot be read
    #[error("cannot load env file: {0}")]
    EnvFile(String),
}

/// Listen port when `PORT` is unset
pub const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DB_HOST: &str = "cluster0.2fyd1rz.mongodb.net";
const DEFAULT_DB_NAME: &str = "writeWave";
/// Front-end origin allowed when `CORS_ORIGINS` is unset
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Characters escaped in connection string credentials; RFC 3986 unreserved
/// characters pass through
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Full connection string; takes precedence over user/password/host
    pub uri: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Connection string for the driver
    pub fn uri(&self) -> ConfigResult<String> {
        if let Some(uri) = &self.uri {
            return Ok(uri.clone());
        }

        let user = self.user.as_deref().ok_or(ConfigError::Missing("DB_USER"))?;
        let password = self
            .password
            .as_deref()
            .ok_or(ConfigError::Missing("DB_PASS"))?;
        let user = utf8_percent_encode(user, USERINFO);
        let password = utf8_percent_encode(password, USERINFO);
        Ok(format!("mongodb+srv://{user}:{password}@{}", self.host))
    }
}

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub production: bool,
    pub token_secret: String,
    pub cors_origins: Vec<String>,
    pub database: DatabaseConfig,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Read configuration through `var`, which returns a variable's value
    pub fn from_source<F>(var: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::Invalid {
                    key: "PORT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => {
                debug!("PORT not set, using default {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let production = non_empty("NODE_ENV").is_some_and(|v| v.trim() == "production");

        let token_secret =
            non_empty("ACCESS_TOKEN_SECRET").ok_or(ConfigError::Missing("ACCESS_TOKEN_SECRET"))?;

        let cors_origins = match non_empty("CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => vec![DEFAULT_CORS_ORIGIN.to_string()],
        };

        let database = DatabaseConfig {
            uri: non_empty("DB_URI"),
            user: non_empty("DB_USER"),
            password: non_empty("DB_PASS"),
            host: non_empty("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
            name: non_empty("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
        };

        Ok(Self {
            port,
            production,
            token_secret,
            cors_origins,
            database,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Seed the environment from a `.env` file.
///
/// With no explicit path a missing `.env` in the working directory is not an
/// error; an explicit path must exist.
pub fn load_env_file(path: Option<&Path>) -> ConfigResult<()> {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|_| Some(path.to_path_buf())),
        None => match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e),
        },
    }
    .map_err(|e| ConfigError::EnvFile(e.to_string()))?;

    if let Some(path) = loaded {
        info!(path = %path.display(), "loaded env file");
    }
    Ok(())
}
