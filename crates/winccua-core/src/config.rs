//! Application configuration management.
//!
//! Settings come from, in increasing priority:
//! 1. `~/.config/winccua-mcp/config.json` (or an explicit path)
//! 2. `WINCCUA_*` environment variables
//! 3. command line flags, applied by the binary
//!
//! Only the endpoint is mandatory. Without a username and password the
//! server still runs, and a session can be opened with the `login-user` tool.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{CredentialRecord, DEFAULT_REFRESH_INTERVAL};

/// Application name used for the config directory path
const APP_NAME: &str = "winccua-mcp";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";

pub const ENV_GRAPHQL_URL: &str = "WINCCUA_GRAPHQL_URL";
pub const ENV_USERNAME: &str = "WINCCUA_USERNAME";
pub const ENV_PASSWORD: &str = "WINCCUA_PASSWORD";
pub const ENV_BIND_ADDRESS: &str = "WINCCUA_BIND_ADDRESS";
pub const ENV_REFRESH_INTERVAL_SECS: &str = "WINCCUA_REFRESH_INTERVAL_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "WINCCUA_REQUEST_TIMEOUT_SECS";
pub const ENV_ACCEPT_INVALID_CERTS: &str = "WINCCUA_ACCEPT_INVALID_CERTS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("GraphQL endpoint not configured (set graphqlUrl or WINCCUA_GRAPHQL_URL)")]
    MissingEndpoint,

    #[error("Invalid GraphQL endpoint '{0}'")]
    InvalidEndpoint(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// WinCC Unified GraphQL endpoint, e.g. `https://panel/graphql`
    pub graphql_url: String,
    pub username: String,
    pub password: String,
    /// Address the MCP HTTP server listens on
    pub bind_address: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    /// Skip TLS certificate verification for self-signed panels
    pub accept_invalid_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_url: String::new(),
            username: String::new(),
            password: String::new(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL.as_secs(),
            request_timeout_secs: crate::api::client::REQUEST_TIMEOUT_SECS,
            accept_invalid_certs: false,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("graphql_url", &self.graphql_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("bind_address", &self.bind_address)
            .field("refresh_interval_secs", &self.refresh_interval_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing default file yields defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default config file location
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Apply `WINCCUA_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(std::env::vars())
    }

    /// Apply overrides from key/value pairs; unknown keys are ignored.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let key = key.as_ref();
            match key {
                ENV_GRAPHQL_URL => self.graphql_url = value.into(),
                ENV_USERNAME => self.username = value.into(),
                ENV_PASSWORD => self.password = value.into(),
                ENV_BIND_ADDRESS => self.bind_address = value.into(),
                ENV_REFRESH_INTERVAL_SECS => self.refresh_interval_secs = parse_value(key, value.into())?,
                ENV_REQUEST_TIMEOUT_SECS => self.request_timeout_secs = parse_value(key, value.into())?,
                ENV_ACCEPT_INVALID_CERTS => self.accept_invalid_certs = parse_bool(key, value.into())?,
                _ => {}
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.graphql_url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(ConfigError::InvalidEndpoint(self.graphql_url.clone())),
        }
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "refreshIntervalSecs".into(),
                value: "0".into(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "requestTimeoutSecs".into(),
                value: "0".into(),
            });
        }
        Ok(())
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// Initial credential record (no token yet)
    pub fn credentials(&self) -> CredentialRecord {
        CredentialRecord::new(self.username.clone(), self.password.clone())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_value(key: &str, value: String) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

fn parse_bool(key: &str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}
