//! VSync relay
//!
//! Entry point for the vsync-relay application.

use std::process::ExitCode;

use vsync_relay::config::{Cli, Command, ValidatedConfig, write_default_config};
use vsync_relay::serial::available_ports;

mod app;
mod run;

use app::{exit_code, print_config_hint, print_run_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Some(output) = cli.init_output() {
        return handle_init(&output);
    }
    if matches!(cli.command, Some(Command::ListPorts)) {
        return handle_list_ports();
    }

    // Load and validate configuration before touching any device
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.log_level);
    match &config.config_file {
        Some(path) => tracing::info!("Loaded config file {}", path.display()),
        None => tracing::info!(
            "No config file at {}, using command-line values and defaults",
            cli.config_path().display()
        ),
    }
    tracing::info!("{config}");

    run_application(&config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `list-ports` subcommand.
fn handle_list_ports() -> ExitCode {
    match available_ports() {
        Ok(ports) if ports.is_empty() => {
            println!("No serial ports found.");
            exit_code::SUCCESS
        }
        Ok(ports) => {
            for port in ports {
                println!("{port}");
            }
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::runtime_error()
        }
    }
}

/// Runs the relay with the given configuration.
///
/// Excluded from coverage - requires a serial device and the native library.
#[cfg(not(tarpaulin_include))]
fn run_application(config: &ValidatedConfig) -> ExitCode {
    match run::execute(config) {
        Ok(stats) => {
            tracing::info!("Relay stopped: {stats}");
            exit_code::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            print_run_hint(&e);
            exit_code::runtime_error()
        }
    }
}
