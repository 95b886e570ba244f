//! Validated configuration after merging CLI and JSON file sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::file::FileConfig;
use super::log_level::LogLevel;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and an optional file config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    /// Serial port name (required)
    pub port: String,

    /// Path to the native VSync waiter library (required)
    pub dll: PathBuf,

    /// Serial baudrate
    pub baudrate: u32,

    /// Minimum spacing between two forwarded pulses
    pub pulse_threshold: Duration,

    /// Number of wait calls discarded after startup
    pub warmup: u64,

    /// Logging verbosity
    pub log_level: LogLevel,

    /// Config file that was read, or `None` if no file was found
    pub config_file: Option<PathBuf>,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ port: {}, dll: {}, baudrate: {}, pulse_threshold: {}s, warmup: {}, log_level: {} }}",
            self.port,
            self.dll.display(),
            self.baudrate,
            self.pulse_threshold.as_secs_f64(),
            self.warmup,
            self.log_level,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and an optional file config.
    ///
    /// For every field the CLI value wins, then the file value, then the
    /// built-in default. An explicit zero is a real value and does not fall
    /// through to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required fields are missing or empty (`port`, `dll`)
    /// - `baudrate` is zero
    /// - `pulse_threshold` is negative or not finite
    /// - The file's `log_level` is not a known level
    pub fn from_raw(cli: &Cli, file: Option<&FileConfig>) -> Result<Self, ConfigError> {
        let port = Self::resolve_port(cli, file)?;
        let dll = Self::resolve_dll(cli, file)?;
        let baudrate = Self::resolve_baudrate(cli, file)?;
        let pulse_threshold = Self::resolve_pulse_threshold(cli, file)?;

        let warmup = cli
            .warmup
            .or_else(|| file.and_then(|f| f.warmup))
            .unwrap_or(defaults::WARMUP_COUNT);

        let log_level = Self::resolve_log_level(cli, file)?;

        Ok(Self {
            port,
            dll,
            baudrate,
            pulse_threshold,
            warmup,
            log_level,
            config_file: None,
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// The file is read from [`Cli::config_path`]; a missing file counts as
    /// empty and leaves [`ValidatedConfig::config_file`] unset.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file exists but cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli.config_path();
        let file = FileConfig::load(&path)?;

        let mut config = Self::from_raw(cli, file.as_ref())?;
        config.config_file = file.is_some().then_some(path);
        Ok(config)
    }

    fn resolve_port(cli: &Cli, file: Option<&FileConfig>) -> Result<String, ConfigError> {
        cli.port
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .or_else(|| {
                file.and_then(|f| f.port.as_deref())
                    .filter(|p| !p.trim().is_empty())
            })
            .map(str::to_string)
            .ok_or_else(|| {
                ConfigError::missing(field::PORT, "Use --port or set \"port\" in the config file")
            })
    }

    fn resolve_dll(cli: &Cli, file: Option<&FileConfig>) -> Result<PathBuf, ConfigError> {
        cli.dll
            .as_deref()
            .filter(|p| !is_blank(p))
            .or_else(|| file.and_then(|f| f.dll.as_deref()).filter(|p| !is_blank(p)))
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                ConfigError::missing(field::DLL, "Use --dll or set \"dll\" in the config file")
            })
    }

    fn resolve_baudrate(cli: &Cli, file: Option<&FileConfig>) -> Result<u32, ConfigError> {
        let baudrate = cli
            .baudrate
            .or_else(|| file.and_then(|f| f.baudrate))
            .unwrap_or(defaults::BAUDRATE);

        if baudrate == 0 {
            return Err(ConfigError::invalid(
                field::BAUDRATE,
                "must be greater than 0",
            ));
        }

        Ok(baudrate)
    }

    fn resolve_pulse_threshold(
        cli: &Cli,
        file: Option<&FileConfig>,
    ) -> Result<Duration, ConfigError> {
        let seconds = cli
            .pulse_threshold
            .or_else(|| file.and_then(|f| f.pulse_threshold))
            .unwrap_or(defaults::PULSE_THRESHOLD_SECS);

        let reason = if !seconds.is_finite() {
            format!("{seconds} is not a finite number of seconds")
        } else if seconds < 0.0 {
            format!("{seconds} must not be negative")
        } else {
            match Duration::try_from_secs_f64(seconds) {
                Ok(threshold) => return Ok(threshold),
                Err(_) => format!("{seconds} seconds is too large"),
            }
        };

        Err(ConfigError::invalid(field::PULSE_THRESHOLD, reason))
    }

    fn resolve_log_level(cli: &Cli, file: Option<&FileConfig>) -> Result<LogLevel, ConfigError> {
        if let Some(level) = cli.log_level {
            return Ok(level.into());
        }

        match file.and_then(|f| f.log_level.as_deref()) {
            Some(name) => name.parse(),
            None => Ok(LogLevel::default()),
        }
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::file::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn is_blank(path: &Path) -> bool {
    path.as_os_str().is_empty()
}
