//! Service configuration.
//!
//! Settings come from an optional `forecast.toml` file and are then
//! overridden by environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Forecasting source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout handed to the HTTP client
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Location forwarded when a request names an unknown city
    #[serde(default = "default_location")]
    pub default_location: String,
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_location() -> String {
    "los-angeles".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_location: default_location(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Defaults overridden by environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`: Server host (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 8080)
    /// - `AQI_API_URL`: Forecasting source base URL (default: http://localhost:8000)
    /// - `UPSTREAM_TIMEOUT_SECS`: Forecasting source timeout (default: 10)
    /// - `DEFAULT_LOCATION`: Location used for unknown cities (default: los-angeles)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Load `forecast.toml` from the first standard location that has one,
    /// then apply environment overrides.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn load() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("forecast.toml"),
            PathBuf::from("backend/forecast.toml"),
            PathBuf::from("../forecast.toml"),
        ];

        let mut config = match search_paths.iter().find(|p| p.exists()) {
            Some(path) => {
                log::info!("loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
        }
        if let Some(url) = lookup("AQI_API_URL") {
            self.upstream.base_url = url;
        }
        if let Some(timeout) = lookup("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = timeout.parse().map_err(|_| ConfigError::InvalidValue {
                key: "UPSTREAM_TIMEOUT_SECS",
                value: timeout,
            })?;
        }
        if let Some(location) = lookup("DEFAULT_LOCATION") {
            self.upstream.default_location = location;
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| ConfigError::InvalidValue { key: "HOST", value: addr })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.upstream.base_url, "http://localhost:8000");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_parse_partial_file() {
        let toml = r#"
[upstream]
base_url = "http://forecast.internal:9000"
"#;
        let config: ServiceConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.upstream.base_url, "http://forecast.internal:9000");
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.upstream.default_location, "los-angeles");
        assert_eq!(config.server, ServerSettings::default());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORT", "9090"),
            ("AQI_API_URL", "http://10.0.0.2:8000"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = ServiceConfig::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.upstream.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = ServiceConfig::default();
        let result = config.apply_overrides(|k| (k == "PORT").then(|| "eighty".to_string()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "PORT", .. })
        ));
    }
}
