//! Configuration loader for money-mind
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "MONEYMIND_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "MONEYMIND_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "MONEYMIND";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Variables set by hosting platforms that take precedence over everything else
const PLATFORM_PORT_ENV: &str = "PORT";
const PLATFORM_DATABASE_URL_ENV: &str = "DATABASE_URL";
const PLATFORM_FINNHUB_KEY_ENV: &str = "FINNHUB_KEY";
const PLATFORM_OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml` (optional)
/// 3. `local.toml` (optional)
/// 4. `MONEYMIND_*` environment variables
/// 5. `PORT`, `DATABASE_URL`, `FINNHUB_KEY`, `OPENAI_API_KEY`
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if both `MONEYMIND_CONFIG_DIR` and `MONEYMIND_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "MONEYMIND_CONFIG_DIR and MONEYMIND_CONFIG_FILE cannot both be set. \
                 Use MONEYMIND_CONFIG_DIR for layered configuration or \
                 MONEYMIND_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir,
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader that reads a single configuration file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Override the environment used to pick `{environment}.toml`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load configuration from all sources and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` is not found (when using layered loading)
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings = self.load_unvalidated()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration without running validation.
    ///
    /// CLI overrides are merged on top before validating, so the CLI uses this.
    pub fn load_unvalidated(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        apply_platform_overrides(&mut settings)?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // MONEYMIND_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(&self, builder: Builder) -> Result<Builder, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: Builder,
        path: &Path,
        required: bool,
    ) -> Result<Builder, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    fn add_env_source(builder: Builder) -> Builder {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Apply the variables hosting platforms inject (Render, Heroku, Fly).
fn apply_platform_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
    if let Some(port) = non_empty_env(PLATFORM_PORT_ENV) {
        settings.server.port = port
            .trim()
            .parse()
            .map_err(|e| ConfigError::env_var(PLATFORM_PORT_ENV, e))?;
    }

    if let Some(url) = non_empty_env(PLATFORM_DATABASE_URL_ENV) {
        settings.database.url = url;
    }

    if let Some(key) = non_empty_env(PLATFORM_FINNHUB_KEY_ENV) {
        settings.quotes.api_key = key;
    }

    if let Some(key) = non_empty_env(PLATFORM_OPENAI_KEY_ENV) {
        settings.coach.api_key = key;
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    /// Serializes tests that touch process environment variables
    pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Restores touched environment variables on drop
    pub struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        pub fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        pub fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        pub fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }

        /// Clears every variable the loader reads so tests start from a known state
        pub fn clean() -> Self {
            let mut guard = Self::new();
            for key in [
                "MONEYMIND_CONFIG_DIR",
                "MONEYMIND_CONFIG_FILE",
                "MONEYMIND_APP_ENV",
                "MONEYMIND_SERVER__PORT",
                "MONEYMIND_DATABASE__URL",
                "PORT",
                "DATABASE_URL",
                "FINNHUB_KEY",
                "OPENAI_API_KEY",
            ] {
                guard.remove(key);
            }
            guard
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{ENV_MUTEX, EnvGuard};
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DEFAULT_TOML: &str = r#"
[application]
name = "Money Mind"

[server]
host = "127.0.0.1"
port = 10000

[database]
url = "postgres://localhost/money_mind"

[quotes]
max_symbols = 40

[logger]
level = "info"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    #[test]
    fn test_config_loader_new_default() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let _env = EnvGuard::clean();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        env.set("MONEYMIND_CONFIG_DIR", "/custom/config");
        env.set("MONEYMIND_CONFIG_FILE", "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(ConfigError::MutualExclusivityError(msg)) => {
                assert!(msg.contains("MONEYMIND_CONFIG_DIR"));
                assert!(msg.contains("MONEYMIND_CONFIG_FILE"));
            }
            other => panic!("Expected MutualExclusivityError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[]);
        env.set("MONEYMIND_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        match result {
            Err(ConfigError::FileNotFound(msg)) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_default_toml_only() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set("MONEYMIND_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.application.name, "Money Mind");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 10000);
        assert_eq!(settings.database.url, "postgres://localhost/money_mind");
    }

    #[test]
    fn test_load_with_environment_and_local_override() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("production.toml", "[server]\nport = 8080\n[logger]\nlevel = \"warn\"\n"),
            ("local.toml", "[server]\nport = 9090\n"),
        ]);
        env.set("MONEYMIND_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("MONEYMIND_APP_ENV", "production");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.logger.level, "warn");
    }

    #[test]
    fn test_load_with_prefixed_env_override() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set("MONEYMIND_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("MONEYMIND_SERVER__PORT", "4000");
        env.set("MONEYMIND_DATABASE__URL", "postgres://env-override/db");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.database.url, "postgres://env-override/db");
    }

    #[test]
    fn test_platform_variables_take_precedence() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set("MONEYMIND_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("MONEYMIND_SERVER__PORT", "4000");
        env.set("PORT", "10001");
        env.set("DATABASE_URL", "postgres://render/db");
        env.set("FINNHUB_KEY", "fh-key");
        env.set("OPENAI_API_KEY", "sk-key");

        let settings = ConfigLoader::new().unwrap().load().expect("Should load");
        assert_eq!(settings.server.port, 10001);
        assert_eq!(settings.database.url, "postgres://render/db");
        assert_eq!(settings.quotes.api_key, "fh-key");
        assert_eq!(settings.coach.api_key, "sk-key");
    }

    #[test]
    fn test_invalid_platform_port() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set("MONEYMIND_CONFIG_DIR", temp_dir.path().to_str().unwrap());
        env.set("PORT", "not-a-port");

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(result, Err(ConfigError::EnvVarError(msg)) if msg.contains("PORT")));
    }

    #[test]
    fn test_load_single_file_mode() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let _env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[("custom.toml", DEFAULT_TOML)]);

        let loader = ConfigLoader::from_file(temp_dir.path().join("custom.toml"));
        let settings = loader.load().expect("Should load");
        assert_eq!(settings.server.port, 10000);
    }

    #[test]
    fn test_validation_failure_surfaces() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        let mut env = EnvGuard::clean();
        let temp_dir = setup_config_dir(&[(
            "default.toml",
            "[database]\nurl = \"postgres://localhost/db\"\n[quotes]\nmax_symbols = 0\n",
        )]);
        env.set("MONEYMIND_CONFIG_DIR", temp_dir.path().to_str().unwrap());

        let result = ConfigLoader::new().unwrap().load();
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "quotes.max_symbols"
        ));
    }
}
