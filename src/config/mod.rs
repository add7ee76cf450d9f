//! Configuration management module for money-mind
//!
//! This module provides layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Hosting platform variables (`PORT`, `DATABASE_URL`, `FINNHUB_KEY`, `OPENAI_API_KEY`)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local development overrides (not committed to version control)
//! 4. `MONEYMIND_*` environment variables
//! 5. Hosting platform variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{
    CoachConfig, DatabaseConfig, QuotesConfig, RateLimitSettings, ServerConfig, Settings,
};
