//! JSON configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{ConfigError, defaults};

/// Root configuration structure from the JSON file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Serial port name
    pub port: Option<String>,

    /// Path to the native VSync waiter library
    #[serde(alias = "dll_path", alias = "native_library_path")]
    pub dll: Option<PathBuf>,

    /// Serial baudrate
    pub baudrate: Option<u32>,

    /// Debounce threshold in seconds
    pub pulse_threshold: Option<f64>,

    /// Number of wait calls discarded after startup
    pub warmup: Option<u64>,

    /// Log level name: "debug", "info", "warning" or "error"
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Loads configuration from a JSON file.
    ///
    /// Returns `Ok(None)` if the file does not exist; callers treat that as
    /// an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        Self::parse_at(&content, path).map(Some)
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or contains unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::parse_at(content, Path::new("<inline>"))
    }

    fn parse_at(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Generates a default configuration file.
///
/// `port` and `dll` hold placeholder values that must be edited before use.
#[must_use]
pub fn default_config_template() -> String {
    let template = serde_json::json!({
        "port": "COM11",
        "dll": "VSYNCWaiter.dll",
        "baudrate": defaults::BAUDRATE,
        "pulse_threshold": defaults::PULSE_THRESHOLD_SECS,
        "warmup": defaults::WARMUP_COUNT,
        "log_level": defaults::LOG_LEVEL,
    });

    format!("{template:#}\n")
}
