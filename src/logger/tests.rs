//! Tests for the logger module

use crate::logger::config::*;
use std::path::PathBuf;

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_no_outputs_rejected() {
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            file: FileConfig::default(),
            level: "info".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_enabled_file_requires_path() {
        let result = FileConfig::new(true, PathBuf::new(), true, LogFormat::Json);
        assert!(result.is_err());

        let disabled = FileConfig::new(false, PathBuf::new(), true, LogFormat::Json);
        assert!(disabled.is_ok());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("full".parse::<LogFormat>().unwrap(), LogFormat::Full);
        assert!("pretty".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::default(), LogFormat::Full);
        assert_eq!(LogFormat::Json.as_str(), "json");
    }
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn property_valid_levels_parse(level_idx in 0usize..5usize, upper in any::<bool>()) {
            let levels = ["trace", "debug", "info", "warn", "error"];
            let level = if upper {
                levels[level_idx].to_uppercase()
            } else {
                levels[level_idx].to_string()
            };

            let config = LoggerConfig::new(ConsoleConfig::default(), FileConfig::default(), level);
            prop_assert!(config.is_ok());
        }

        #[test]
        fn property_invalid_levels_fail(level in "[a-z]{6,12}") {
            prop_assume!(!["trace", "debug", "info", "warn", "error"].contains(&level.as_str()));
            let config = LoggerConfig {
                level,
                ..Default::default()
            };
            prop_assert!(config.validate().is_err());
        }

        #[test]
        fn property_any_single_output_is_enough(
            console_enabled in any::<bool>(),
            file_enabled in any::<bool>(),
        ) {
            let config = LoggerConfig {
                console: ConsoleConfig::new(console_enabled, false),
                file: FileConfig {
                    enabled: file_enabled,
                    path: PathBuf::from("test.log"),
                    ..Default::default()
                },
                level: "info".to_string(),
            };

            prop_assert_eq!(config.validate().is_ok(), console_enabled || file_enabled);
        }
    }
}

mod writer_tests {
    use super::*;
    use crate::logger::writer::LogFileWriter;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;
    use tracing_subscriber::fmt::MakeWriter;

    fn file_config(path: PathBuf, append: bool) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append,
            format: LogFormat::Full,
        }
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");

        let writer = LogFileWriter::new(&file_config(path.clone(), true)).unwrap();
        writer.make_writer().write_all(b"hello\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "first\n").unwrap();

        let writer = LogFileWriter::new(&file_config(path.clone(), true)).unwrap();
        writer.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_truncate_replaces_existing_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "stale\n").unwrap();

        let writer = LogFileWriter::new(&file_config(path.clone(), false)).unwrap();
        writer.make_writer().write_all(b"fresh\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }
}

mod dynamic_level_tests {
    use crate::logger::LogLevelHandle;
    use std::sync::Arc;
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, reload};

    fn with_test_handle<F, R>(initial_level: &str, f: F) -> R
    where
        F: FnOnce(&LogLevelHandle) -> R,
    {
        let filter = EnvFilter::try_new(initial_level).unwrap_or_else(|_| EnvFilter::new("info"));
        let (filter_layer, reload_handle) = reload::Layer::new(filter);

        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink));

        let handle = LogLevelHandle {
            inner: Arc::new(reload_handle),
        };

        tracing::subscriber::with_default(subscriber, || f(&handle))
    }

    #[test]
    fn test_set_level_is_reflected() {
        with_test_handle("info", |handle| {
            assert_eq!(handle.current_level().as_deref(), Some("info"));
            handle.set_level("debug").unwrap();
            assert_eq!(handle.current_level().as_deref(), Some("debug"));
        });
    }

    #[test]
    fn test_directive_syntax_accepted() {
        with_test_handle("warn", |handle| {
            handle.set_level("money_mind=trace,tower_http=info").unwrap();
            let current = handle.current_level().unwrap();
            assert!(current.contains("money_mind=trace"));
        });
    }

    #[test]
    fn test_invalid_directive_keeps_previous_level() {
        with_test_handle("info", |handle| {
            assert!(handle.set_level("money_mind=[").is_err());
            assert_eq!(handle.current_level().as_deref(), Some("info"));
        });
    }
}
