//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use super::LogLevel;
use super::defaults;

/// VSync relay
///
/// Waits for display VSync edges through a native waiter library and
/// forwards each accepted edge as a single pulse byte to a serial port.
#[derive(Debug, Parser)]
#[command(name = "vsync-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the JSON config file (default: vsync.config.json next to the executable)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Serial port name (e.g. COM11 or /dev/ttyUSB0)
    #[arg(long)]
    pub port: Option<String>,

    /// Path to the native VSync waiter library (e.g. VSYNCWaiter.dll or libvsyncwaiter.so)
    #[arg(long)]
    pub dll: Option<PathBuf>,

    /// Serial baudrate (default 921600)
    #[arg(long)]
    pub baudrate: Option<u32>,

    /// Ignore duplicate VSync edges that occur faster than this many seconds (default 0.0005)
    #[arg(long = "pulse-threshold", value_name = "SECONDS")]
    pub pulse_threshold: Option<f64>,

    /// Number of VSync waits to discard after startup before emitting pulses
    #[arg(long)]
    pub warmup: Option<u64>,

    /// Logging verbosity (default info)
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,
}

/// Subcommands for vsync-relay
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file (default: the path a plain run reads)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the serial ports reported by the operating system
    ListPorts,
}

/// Log level argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    /// Per-pulse diagnostics
    Debug,
    /// Startup and shutdown messages
    Info,
    /// Warnings only
    #[value(alias = "warn")]
    Warning,
    /// Errors only
    Error,
}

impl From<LogLevelArg> for LogLevel {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Debug => Self::Debug,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Warning => Self::Warning,
            LogLevelArg::Error => Self::Error,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the config file path: the explicit `--config` value, or
    /// [`defaults::CONFIG_FILE_NAME`] next to the running executable.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        if let Some(ref path) = self.config {
            return path.clone();
        }

        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(defaults::CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE_NAME))
    }

    /// Returns where `init` writes the template: `--output` when given,
    /// otherwise [`Cli::config_path`], so a later plain run picks it up.
    ///
    /// Returns `None` when the command is not `init`.
    #[must_use]
    pub fn init_output(&self) -> Option<PathBuf> {
        match &self.command {
            Some(Command::Init { output }) => {
                Some(output.clone().unwrap_or_else(|| self.config_path()))
            }
            _ => None,
        }
    }
}
