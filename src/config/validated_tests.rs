//! Tests for validated configuration.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};

use super::ConfigError;
use super::cli::Cli;
use super::file::FileConfig;
use super::log_level::LogLevel;
use super::validated::{ValidatedConfig, write_default_config};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["vsync-relay"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse a JSON config
fn file(content: &str) -> FileConfig {
    FileConfig::parse(content).unwrap()
}

mod required_fields {
    use super::*;

    #[test]
    fn missing_port_returns_error() {
        let cli = cli(&["--dll", "vs.dll"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "port", .. })
        ));
    }

    #[test]
    fn missing_dll_returns_error() {
        let cli = cli(&["--port", "COM5"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "dll", .. })
        ));
    }

    #[test]
    fn both_required_fields_from_cli() {
        let cli = cli(&["--port", "COM5", "--dll", "vs.dll"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.port, "COM5");
        assert_eq!(config.dll, PathBuf::from("vs.dll"));
    }

    #[test]
    fn required_fields_from_file() {
        let cli = cli(&[]);
        let file = file(r#"{"port": "COM5", "dll": "vs.dll"}"#);

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.port, "COM5");
        assert_eq!(config.dll, PathBuf::from("vs.dll"));
    }

    #[test]
    fn empty_port_in_file_counts_as_missing() {
        let cli = cli(&["--dll", "vs.dll"]);
        let file = file(r#"{"port": ""}"#);

        let result = ValidatedConfig::from_raw(&cli, Some(&file));

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "port", .. })
        ));
    }

    #[test]
    fn empty_cli_port_falls_back_to_file() {
        let cli = cli(&["--port", "", "--dll", "vs.dll"]);
        let file = file(r#"{"port": "COM9"}"#);

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.port, "COM9");
    }

    #[test]
    fn empty_dll_in_file_counts_as_missing() {
        let cli = cli(&["--port", "COM5"]);
        let file = file(r#"{"dll": ""}"#);

        let result = ValidatedConfig::from_raw(&cli, Some(&file));

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: "dll", .. })
        ));
    }

    #[test]
    fn missing_port_is_reported_before_dll() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("port"));
    }
}

mod precedence {
    use super::*;

    #[test]
    fn cli_values_override_file() {
        let cli = cli(&[
            "--port",
            "COM1",
            "--dll",
            "cli.dll",
            "--baudrate",
            "115200",
            "--pulse-threshold",
            "0.002",
            "--warmup",
            "7",
            "--log-level",
            "error",
        ]);
        let file = file(
            r#"{
                "port": "COM2",
                "dll": "file.dll",
                "baudrate": 9600,
                "pulse_threshold": 0.5,
                "warmup": 3,
                "log_level": "debug"
            }"#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.port, "COM1");
        assert_eq!(config.dll, PathBuf::from("cli.dll"));
        assert_eq!(config.baudrate, 115_200);
        assert_eq!(config.pulse_threshold, Duration::from_secs_f64(0.002));
        assert_eq!(config.warmup, 7);
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn file_values_override_defaults() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll"]);
        let file = file(
            r#"{"baudrate": 9600, "pulse_threshold": 0.25, "warmup": 3, "log_level": "warning"}"#,
        );

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.pulse_threshold, Duration::from_millis(250));
        assert_eq!(config.warmup, 3);
        assert_eq!(config.log_level, LogLevel::Warning);
    }

    #[test]
    fn explicit_zero_in_file_is_not_replaced_by_default() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll"]);
        let file = file(r#"{"pulse_threshold": 0, "warmup": 0}"#);

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.pulse_threshold, Duration::ZERO);
        assert_eq!(config.warmup, 0);
    }

    #[test]
    fn explicit_zero_on_cli_overrides_file() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll", "--warmup", "0"]);
        let file = file(r#"{"warmup": 12}"#);

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.warmup, 0);
    }

    #[test]
    fn cli_fills_fields_file_leaves_out() {
        let cli = cli(&["--dll", "cli.dll"]);
        let file = file(r#"{"port": "COM5"}"#);

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.port, "COM5");
        assert_eq!(config.dll, PathBuf::from("cli.dll"));
    }
}

mod default_values {
    use super::*;

    #[test]
    fn defaults_when_not_specified() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();

        assert_eq!(config.baudrate, 921_600);
        assert_eq!(config.pulse_threshold, Duration::from_micros(500));
        assert_eq!(config.warmup, 0);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn display_lists_resolved_values() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();
        let shown = config.to_string();

        assert!(shown.contains("port: COM1"));
        assert!(shown.contains("dll: vs.dll"));
        assert!(shown.contains("baudrate: 921600"));
        assert!(shown.contains("pulse_threshold: 0.0005s"));
        assert!(shown.contains("warmup: 0"));
        assert!(shown.contains("log_level: info"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_baudrate_is_rejected() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll", "--baudrate", "0"]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "baudrate",
                ..
            })
        ));
    }

    #[test]
    fn negative_pulse_threshold_is_rejected() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll"]);
        let file = file(r#"{"pulse_threshold": -0.1}"#);

        let result = ValidatedConfig::from_raw(&cli, Some(&file));

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "pulse_threshold",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_pulse_threshold_is_rejected() {
        let cli = cli(&[
            "--port",
            "COM1",
            "--dll",
            "vs.dll",
            "--pulse-threshold",
            "inf",
        ]);
        let result = ValidatedConfig::from_raw(&cli, None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "pulse_threshold",
                ..
            })
        ));
    }

    #[test]
    fn threshold_messages_name_the_problem() {
        let reason_for = |value: &str| {
            let threshold = format!("--pulse-threshold={value}");
            let cli = cli(&["--port", "COM1", "--dll", "vs.dll", threshold.as_str()]);
            match ValidatedConfig::from_raw(&cli, None) {
                Err(ConfigError::InvalidValue { reason, .. }) => reason,
                other => panic!("expected invalid pulse_threshold, got {other:?}"),
            }
        };

        assert!(reason_for("-0.5").contains("must not be negative"));
        assert!(reason_for("NaN").contains("not a finite number"));
        assert!(reason_for("1e20").contains("too large"));
    }

    #[test]
    fn unknown_file_log_level_is_rejected() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll"]);
        let file = file(r#"{"log_level": "chatty"}"#);

        let result = ValidatedConfig::from_raw(&cli, Some(&file));

        assert!(matches!(result, Err(ConfigError::InvalidLogLevel { .. })));
    }

    #[test]
    fn cli_log_level_skips_bad_file_value() {
        let cli = cli(&["--port", "COM1", "--dll", "vs.dll", "--log-level", "debug"]);
        let file = file(r#"{"log_level": "chatty"}"#);

        let config = ValidatedConfig::from_raw(&cli, Some(&file)).unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
    }
}

mod config_load {
    use super::*;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"port": "COM5", "dll": "vs.dll"}}"#).unwrap();
        let path = file.path().to_str().unwrap();

        let cli = cli(&["--config", path]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.port, "COM5");
        assert_eq!(config.dll, Path::new("vs.dll"));
        assert_eq!(config.pulse_threshold, Duration::from_micros(500));
        assert_eq!(config.config_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn missing_file_and_no_cli_port_names_port() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vsync.config.json");

        let cli = cli(&["--config", path.to_str().unwrap()]);
        let err = ValidatedConfig::load(&cli).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::MissingRequired { field: "port", .. }
        ));
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn missing_file_with_full_cli_succeeds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let cli = cli(&[
            "--config",
            path.to_str().unwrap(),
            "--port",
            "COM3",
            "--dll",
            "vs.dll",
        ]);
        let config = ValidatedConfig::load(&cli).unwrap();

        assert_eq!(config.port, "COM3");
        assert_eq!(config.config_file, None);
    }

    #[test]
    fn corrupt_file_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ broken").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = cli(&["--config", path, "--port", "COM3", "--dll", "vs.dll"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::JsonParse { .. })));
    }
}

mod write_config {
    use super::*;

    #[test]
    fn writes_template_that_loads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vsync.config.json");

        write_default_config(&path).unwrap();

        let cli = cli(&["--config", path.to_str().unwrap()]);
        let config = ValidatedConfig::load(&cli).unwrap();
        assert_eq!(config.port, "COM11");
        assert_eq!(config.dll, PathBuf::from("VSYNCWaiter.dll"));
    }

    #[test]
    fn unwritable_path_reports_file_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("vsync.config.json");

        let result = write_default_config(&path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
