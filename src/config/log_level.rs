//! Log verbosity shared by the CLI and the config file.

use std::fmt;
use std::str::FromStr;

use tracing::Level;

use super::ConfigError;

/// Logging verbosity accepted by `--log-level` and the `log_level` config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Per-pulse diagnostics
    Debug,
    /// Startup and shutdown messages
    #[default]
    Info,
    /// Warnings only
    Warning,
    /// Errors only
    Error,
}

impl LogLevel {
    /// Returns the equivalent `tracing` level.
    #[must_use]
    pub const fn as_tracing(self) -> Level {
        match self {
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warning => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(ConfigError::InvalidLogLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}
