//! Application settings.
//!
//! Settings come from three layers, later ones winning:
//! 1. built-in defaults (port 3000, local `SQLite` file),
//! 2. an optional `config.toml` in the working directory,
//! 3. environment variables (`SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`,
//!    `RECIPE_API_URL`), which may themselves come from a `.env` file.
//!
//! Command-line flags are applied on top by the CLI.

use crate::client::DEFAULT_API_URL;
use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the optional settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Database settings
    pub database: DatabaseConfig,
    /// Settings used by the command-line client
    pub client: ClientConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// `[client]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Applies environment overrides read through `lookup`.
    ///
    /// # Errors
    /// Returns an error if `SERVER_PORT` is set but is not a valid port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = port.trim().parse().map_err(|e| Error::Config {
                message: format!("Invalid SERVER_PORT value {port:?}: {e}"),
            })?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(url) = lookup("RECIPE_API_URL") {
            self.client.api_url = url;
        }
        Ok(())
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path_ref:?}: {e}"),
    })
}

/// Loads `config.toml` when present, then applies environment overrides.
///
/// # Errors
/// Returns an error if the file exists but is invalid, or an override is invalid.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    let mut config = if path.exists() {
        load_config(path)?
    } else {
        info!("{DEFAULT_CONFIG_PATH} not found, using defaults");
        AppConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}
