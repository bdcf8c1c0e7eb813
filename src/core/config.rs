//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use crate::core::gateway::GatewayError;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Default public endpoint of the Hex API.
pub const DEFAULT_HEX_API_URL: &str = "https://app.hex.tech/api/v1";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Smallest accepted request timeout in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Hex API connection settings.
    pub hex: HexConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Connection settings for the Hex API.
///
/// Built once at startup and handed to the gateway by value; it is never
/// mutated afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct HexConfig {
    /// Bearer token used to authenticate against the Hex API.
    #[serde(default, skip_serializing)]
    pub api_token: String,

    /// Absolute base URL every endpoint path is joined onto.
    pub base_url: String,

    /// Upper bound for a whole request, in milliseconds.
    pub timeout_ms: u64,

    /// Log request and response bodies.
    pub debug: bool,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for HexConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HexConfig")
            .field(
                "api_token",
                &if self.api_token.is_empty() {
                    "[EMPTY]"
                } else {
                    "[REDACTED]"
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Default for HexConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: DEFAULT_HEX_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            debug: false,
        }
    }
}

impl HexConfig {
    /// Create a configuration for the given token with default endpoint and timeout.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            ..Self::default()
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Enable or disable body logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Check every field and return the first violation as `ConfigInvalid`.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.api_token.trim().is_empty() {
            return Err(GatewayError::config_invalid(
                "HEX_API_TOKEN is required and must not be empty",
            ));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            GatewayError::config_invalid(format!(
                "HEX_API_URL '{}' is not an absolute URL: {}",
                self.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::config_invalid(format!(
                "HEX_API_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.timeout_ms < MIN_TIMEOUT_MS {
            return Err(GatewayError::config_invalid(format!(
                "HEX_TIMEOUT_MS must be at least {}ms, got {}ms",
                MIN_TIMEOUT_MS, self.timeout_ms
            )));
        }

        Ok(())
    }

    /// Load Hex settings from environment variables.
    ///
    /// An unparsable `HEX_TIMEOUT_MS` becomes `0` so that `validate()`
    /// rejects it instead of silently falling back to the default.
    pub fn from_env() -> Self {
        let mut hex = Self::default();

        if let Ok(token) = std::env::var("HEX_API_TOKEN") {
            hex.api_token = token.trim().to_string();
        }

        if let Ok(url) = std::env::var("HEX_API_URL") {
            if !url.trim().is_empty() {
                hex.base_url = url.trim().to_string();
            }
        }

        if let Ok(timeout) = std::env::var("HEX_TIMEOUT_MS") {
            hex.timeout_ms = timeout.trim().parse().unwrap_or(0);
        }

        if let Ok(debug) = std::env::var("HEX_DEBUG") {
            hex.debug = matches!(debug.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        hex
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "hex-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            hex: HexConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`); Hex settings use `HEX_`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.hex = HexConfig::from_env();

        if config.hex.debug {
            config.logging.level = "debug".to_string();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn clear_hex_env() {
        unsafe {
            std::env::remove_var("HEX_API_TOKEN");
            std::env::remove_var("HEX_API_URL");
            std::env::remove_var("HEX_TIMEOUT_MS");
            std::env::remove_var("HEX_DEBUG");
        }
    }

    #[test]
    fn test_hex_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_hex_env();
        unsafe {
            std::env::set_var("HEX_API_TOKEN", "  hxtw_test  ");
            std::env::set_var("HEX_API_URL", "https://hex.example.com/api/v1");
            std::env::set_var("HEX_TIMEOUT_MS", "5000");
            std::env::set_var("HEX_DEBUG", "true");
        }

        let config = Config::from_env();
        assert_eq!(config.hex.api_token, "hxtw_test");
        assert_eq!(config.hex.base_url, "https://hex.example.com/api/v1");
        assert_eq!(config.hex.timeout_ms, 5000);
        assert!(config.hex.debug);
        assert_eq!(config.logging.level, "debug");

        clear_hex_env();
    }

    #[test]
    fn test_hex_config_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_hex_env();

        let hex = HexConfig::from_env();
        assert!(hex.api_token.is_empty());
        assert_eq!(hex.base_url, DEFAULT_HEX_API_URL);
        assert_eq!(hex.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!hex.debug);
    }

    #[test]
    fn test_unparsable_timeout_fails_validation() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_hex_env();
        unsafe {
            std::env::set_var("HEX_API_TOKEN", "token");
            std::env::set_var("HEX_TIMEOUT_MS", "soon");
        }

        let hex = HexConfig::from_env();
        assert!(matches!(
            hex.validate(),
            Err(GatewayError::ConfigInvalid(msg)) if msg.contains("HEX_TIMEOUT_MS")
        ));

        clear_hex_env();
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(HexConfig::new("token").validate().is_ok());
        assert!(
            HexConfig::new("token")
                .with_timeout_ms(MIN_TIMEOUT_MS)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_validate_rejects_empty_token() {
        let err = HexConfig::new("   ").validate().unwrap_err();
        assert!(matches!(err, GatewayError::ConfigInvalid(_)));
        assert!(err.to_string().contains("HEX_API_TOKEN"));
    }

    #[test]
    fn test_validate_rejects_relative_or_non_http_url() {
        let relative = HexConfig::new("token").with_base_url("api/v1");
        assert!(matches!(
            relative.validate(),
            Err(GatewayError::ConfigInvalid(_))
        ));

        let ftp = HexConfig::new("token").with_base_url("ftp://hex.example.com");
        assert!(matches!(ftp.validate(), Err(GatewayError::ConfigInvalid(_))));
    }

    #[test]
    fn test_validate_enforces_minimum_timeout() {
        let err = HexConfig::new("token")
            .with_timeout_ms(999)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("1000ms"));
    }

    #[test]
    fn test_token_never_serialized() {
        let json = serde_json::to_string(&HexConfig::new("super_secret_token")).unwrap();
        assert!(!json.contains("super_secret_token"));
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let hex = HexConfig::new("super_secret_token");
        let debug_str = format!("{:?}", hex);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }
}
