//! Serve command handler

use crate::config::settings::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and print what the server would do, without
    /// binding a socket or touching the database.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Static files served from: {}", self.config.server.static_dir);
        println!(
            "✓ Quote provider: {} ({})",
            self.config.quotes.base_url,
            key_state(&self.config.quotes.api_key)
        );
        println!(
            "✓ Coach provider: {} model {} ({})",
            self.config.coach.base_url,
            self.config.coach.model,
            key_state(&self.config.coach.api_key)
        );
        if self.config.rate_limit.enabled {
            println!(
                "✓ Rate limit: {} requests per {}s",
                self.config.rate_limit.max_requests, self.config.rate_limit.window_secs
            );
        }
        println!("Dry run completed successfully");

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

fn key_state(key: &str) -> &'static str {
    if key.is_empty() { "no API key" } else { "API key set" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/money_mind".to_string();
        config
    }

    #[test]
    fn test_dry_run_accepts_valid_config() {
        let handler = ServeCommandHandler::new(valid_config());
        assert_eq!(handler.config(), &valid_config());
        assert!(handler.validate_only().is_ok());
    }

    #[test]
    fn test_dry_run_rejects_invalid_config() {
        let mut config = valid_config();
        config.quotes.base_url = "finnhub.io".to_string();
        assert!(ServeCommandHandler::new(config).validate_only().is_err());
    }

    #[test]
    fn test_key_state() {
        assert_eq!(key_state(""), "no API key");
        assert_eq!(key_state("abc"), "API key set");
    }
}
