//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use crate::config::error::ConfigError;
use crate::config::settings::{
    CoachConfig, DatabaseConfig, LoggerSettings, QuotesConfig, RateLimitSettings, ServerConfig,
    Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Upper bound for symbols per quote request
const MAX_SYMBOLS_CEILING: usize = 200;

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request timeout must be greater than 0
    /// - Static directory must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.static_dir.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.static_dir",
                "Static directory must not be empty.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// Validate database configuration
    ///
    /// # Validation Rules
    /// - URL must not be empty and must use a postgres scheme
    /// - Max and min connections must be greater than 0
    /// - Min connections must not exceed max connections
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "Database URL is required. Set database.url or DATABASE_URL.",
            ));
        }

        if !self.is_valid_database_url() {
            return Err(ConfigError::validation(
                "database.url",
                "Invalid database URL format. Expected format: postgres://[user:password@]host[:port]/database",
            ));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "Max connections must be greater than 0.",
            ));
        }

        if self.min_connections == 0 {
            return Err(ConfigError::validation(
                "database.min_connections",
                "Min connections must be greater than 0.",
            ));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                format!(
                    "Min connections ({}) cannot exceed max connections ({}).",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        if self.connection_timeout == 0 {
            return Err(ConfigError::validation(
                "database.connection_timeout",
                "Connection timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    fn is_valid_database_url(&self) -> bool {
        let valid_schemes = ["postgres://", "postgresql://"];
        valid_schemes
            .iter()
            .any(|scheme| self.url.starts_with(scheme) && self.url.len() > scheme.len())
    }
}

impl QuotesConfig {
    /// Validate quote provider configuration. An empty API key is allowed:
    /// the provider then answers every symbol with an error marker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::validation(
                "quotes.base_url",
                "Quote base URL must start with http:// or https://",
            ));
        }

        if self.max_symbols == 0 || self.max_symbols > MAX_SYMBOLS_CEILING {
            return Err(ConfigError::validation(
                "quotes.max_symbols",
                format!("Max symbols must be between 1 and {}.", MAX_SYMBOLS_CEILING),
            ));
        }

        Ok(())
    }
}

impl CoachConfig {
    /// Validate chat provider configuration. An empty API key is allowed and
    /// disables the coach endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_http_url(&self.base_url) {
            return Err(ConfigError::validation(
                "coach.base_url",
                "Coach base URL must start with http:// or https://",
            ));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::validation("coach.model", "Model must not be empty."));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::validation(
                "coach.max_tokens",
                "Max tokens must be greater than 0.",
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::validation(
                "coach.temperature",
                "Temperature must be between 0.0 and 2.0.",
            ));
        }

        Ok(())
    }
}

impl RateLimitSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }

        if self.max_requests == 0 {
            return Err(ConfigError::validation(
                "rate_limit.max_requests",
                "Max requests must be greater than 0 when rate limiting is enabled.",
            ));
        }

        if self.window_secs == 0 {
            return Err(ConfigError::validation(
                "rate_limit.window_secs",
                "Window must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled {
            if self.file.path.trim().is_empty() {
                return Err(ConfigError::validation(
                    "logger.file.path",
                    "File path cannot be empty when file output is enabled.",
                ));
            }

            if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
                return Err(ConfigError::validation(
                    "logger.file.format",
                    format!(
                        "Invalid log format '{}'. Valid formats are: {}",
                        self.file.format,
                        VALID_LOG_FORMATS.join(", ")
                    ),
                ));
            }
        }

        Ok(())
    }
}

impl Settings {
    /// Validate every section of the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.quotes.validate()?;
        self.coach.validate()?;
        self.rate_limit.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
