//! Configuration settings structures for money-mind
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "Money Mind".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_quotes_base_url() -> String {
    "https://finnhub.io/api/v1".to_string()
}

fn default_max_symbols() -> usize {
    40
}

fn default_coach_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_coach_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_coach_max_tokens() -> u32 {
    400
}

fn default_coach_temperature() -> f32 {
    0.7
}

fn default_system_prompt() -> String {
    "You are Money Mind, a friendly personal-finance coach. Give short, practical, \
     encouraging advice about saving and spending. Never give individualized \
     investment recommendations and never ask for account credentials."
        .to_string()
}

fn default_rate_limit_max_requests() -> u32 {
    100
}

fn default_rate_limit_window_secs() -> u64 {
    15 * 60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/money-mind.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Service name reported by the health endpoint
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Directory holding the front-end bundle served for non-API paths
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the single-page-application entry point
    pub fn index_file(&self) -> PathBuf {
        PathBuf::from(&self.static_dir).join("index.html")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            static_dir: default_static_dir(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Upstream APIs
// ============================================================================

/// Quote provider (Finnhub-compatible) configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotesConfig {
    /// Base URL; `/quote` is appended per request
    #[serde(default = "default_quotes_base_url")]
    pub base_url: String,

    /// API token sent as the `token` query parameter
    #[serde(default)]
    pub api_key: String,

    /// Maximum number of symbols fetched per request; extras are dropped
    #[serde(default = "default_max_symbols")]
    pub max_symbols: usize,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            base_url: default_quotes_base_url(),
            api_key: String::new(),
            max_symbols: default_max_symbols(),
        }
    }
}

/// Chat-completion provider (OpenAI-compatible) configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachConfig {
    /// Base URL; `/chat/completions` is appended
    #[serde(default = "default_coach_base_url")]
    pub base_url: String,

    /// Bearer token; the coach endpoint fails when empty
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_coach_model")]
    pub model: String,

    #[serde(default = "default_coach_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_coach_temperature")]
    pub temperature: f32,

    /// System prompt placed before the conversation
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl CoachConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            base_url: default_coach_base_url(),
            api_key: String::new(),
            model: default_coach_model(),
            max_tokens: default_coach_max_tokens(),
            temperature: default_coach_temperature(),
            system_prompt: default_system_prompt(),
        }
    }
}

// ============================================================================
// Rate limiting
// ============================================================================

/// Per-client fixed-window rate limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Requests allowed per client per window
    #[serde(default = "default_rate_limit_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_rate_limit_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_rate_limit_max_requests(),
            window_secs: default_rate_limit_window_secs(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime `LoggerConfig`.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger", e.to_string()))
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format", e.to_string()))?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file", e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub quotes: QuotesConfig,

    #[serde(default)]
    pub coach: CoachConfig,

    #[serde(default)]
    pub rate_limit: RateLimitSettings,

    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![
                Just("127.0.0.1".to_string()),
                Just("0.0.0.0".to_string()),
                Just("localhost".to_string()),
            ],
            1u16..=65535u16,
            1u64..=300u64,
            "[a-z]{1,10}",
        )
            .prop_map(|(host, port, request_timeout, static_dir)| ServerConfig {
                host,
                port,
                request_timeout,
                static_dir,
            })
    }

    fn arb_quotes_config() -> impl Strategy<Value = QuotesConfig> {
        ("[a-zA-Z0-9]{0,24}", 1usize..=100usize).prop_map(|(api_key, max_symbols)| QuotesConfig {
            base_url: default_quotes_base_url(),
            api_key,
            max_symbols,
        })
    }

    fn arb_rate_limit() -> impl Strategy<Value = RateLimitSettings> {
        (any::<bool>(), 1u32..=10_000u32, 1u64..=86_400u64).prop_map(
            |(enabled, max_requests, window_secs)| RateLimitSettings {
                enabled,
                max_requests,
                window_secs,
            },
        )
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (arb_server_config(), arb_quotes_config(), arb_rate_limit()).prop_map(
            |(server, quotes, rate_limit)| Settings {
                server,
                quotes,
                rate_limit,
                ..Settings::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings).expect("serialize");
            let parsed: Settings = toml::from_str(&toml_str).expect("deserialize");
            prop_assert_eq!(settings, parsed);
        }
    }

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 10000);
        assert_eq!(config.static_dir, "public");
        assert_eq!(config.address(), "0.0.0.0:10000");
        assert_eq!(config.index_file(), PathBuf::from("public").join("index.html"));
    }

    #[test]
    fn test_quotes_config_defaults() {
        let config = QuotesConfig::default();
        assert_eq!(config.base_url, "https://finnhub.io/api/v1");
        assert_eq!(config.max_symbols, 40);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_coach_config_is_configured() {
        let mut config = CoachConfig::default();
        assert!(!config.is_configured());
        config.api_key = "   ".to_string();
        assert!(!config.is_configured());
        config.api_key = "sk-test".to_string();
        assert!(config.is_configured());
    }

    #[test]
    fn test_rate_limit_defaults_match_fifteen_minute_window() {
        let config = RateLimitSettings::default();
        assert!(config.enabled);
        assert_eq!(config.max_requests, 100);
        assert_eq!(config.window_secs, 900);
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let toml_str = r#"
[server]
port = 8080

[quotes]
api_key = "abc"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.quotes.api_key, "abc");
        assert_eq!(settings.quotes.max_symbols, 40);
        assert_eq!(settings.coach.model, "gpt-4o-mini");
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings::default(),
            file: FileSettings {
                enabled: true,
                path: "logs/test.log".to_string(),
                append: false,
                format: "compact".to_string(),
            },
        };
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert!(!config.file.append);
    }

    #[test]
    fn test_logger_settings_invalid_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "xml".to_string(),
                ..FileSettings::default()
            },
            ..LoggerSettings::default()
        };
        let err = settings.into_logger_config().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "logger.file.format"));
    }
}
