//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use relay_core::{AlertWindow, ClockTime};
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub relay: RelayConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP / WebSocket listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Relay behaviour configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Alert window in effect until a client changes it
    pub initial_window: AlertWindow,
    /// Capacity of each connection's outbound queue
    pub connection_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            initial_window: AlertWindow::default(),
            connection_buffer: default_connection_buffer(),
        }
    }
}

/// CORS configuration
///
/// An empty origin list allows any origin.
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "alert-relay".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_connection_buffer() -> usize {
    100
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RelayConfig::default();

        let initial_window = AlertWindow::new(
            parse_var(&lookup, "ALERT_WINDOW_START")?.unwrap_or_else(|| defaults.initial_window.start()),
            parse_var(&lookup, "ALERT_WINDOW_END")?.unwrap_or_else(|| defaults.initial_window.end()),
        );

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: match lookup("APP_ENV") {
                    Some(value) => Environment::parse(&value)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", value))?,
                    None => Environment::default(),
                },
            },
            server: ServerConfig {
                host: lookup("RELAY_HOST").unwrap_or_else(default_host),
                port: parse_var(&lookup, "RELAY_PORT")?.unwrap_or_else(default_port),
            },
            relay: RelayConfig {
                initial_window,
                connection_buffer: match parse_var::<usize, _>(&lookup, "CONNECTION_BUFFER_SIZE")? {
                    Some(0) => {
                        return Err(ConfigError::InvalidValue(
                            "CONNECTION_BUFFER_SIZE",
                            "0".to_string(),
                        ))
                    }
                    Some(size) => size,
                    None => default_connection_buffer(),
                },
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

/// Parse an optional variable, failing on a present but malformed value
fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
