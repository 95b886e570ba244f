//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing_subscriber::EnvFilter;
use vsync_relay::config::{ConfigError, LogLevel, field};
use vsync_relay::serial::TransportError;
use vsync_relay::vsync::WaitError;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0) - includes shutdown on Ctrl+C.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - missing port/dll, corrupt config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - serial port or native library unavailable, write failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Returns a follow-up hint for common configuration errors.
pub fn config_hint(error: &ConfigError) -> Option<&'static str> {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::PORT || *f == field::DLL => {
            Some("Run 'vsync-relay init' to generate a configuration template.")
        }
        ConfigError::JsonParse { .. } => {
            Some("Run 'vsync-relay init --output <path>' to see the expected format.")
        }
        _ => None,
    }
}

/// Returns a follow-up hint for common startup failures.
pub fn run_hint(error: &RunError) -> Option<&'static str> {
    match error {
        RunError::Serial(TransportError::Open { .. }) => {
            Some("Run 'vsync-relay list-ports' to see the serial ports on this machine.")
        }
        RunError::Library(WaitError::Unsupported { .. }) => {
            Some("The VSync waiter library can only be loaded on Windows and Unix-like systems.")
        }
        _ => None,
    }
}

/// Prints the hint for `error`, if any.
pub fn print_config_hint(error: &ConfigError) {
    if let Some(hint) = config_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Prints the hint for `error`, if any.
pub fn print_run_hint(error: &RunError) {
    if let Some(hint) = run_hint(error) {
        eprintln!("\n{hint}");
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn setup_tracing(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.as_tracing().into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
