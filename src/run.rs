//! Application execution logic.
//!
//! This module opens the serial port and the native waiter, installs the
//! interrupt handler and drives the relay loop until shutdown.

use thiserror::Error;

use vsync_relay::config::ValidatedConfig;
use vsync_relay::relay::{RelayError, RelayLoop, RelaySettings, RelayStats};
use vsync_relay::serial::{SerialTransport, TransportError};
use vsync_relay::shutdown::ShutdownSignal;
use vsync_relay::time::MonotonicClock;
use vsync_relay::vsync::WaitError;
use vsync_relay::vsync::platform::NativeWaiter;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to open the serial port.
    #[error("{0}")]
    Serial(#[from] TransportError),

    /// Failed to load the native waiter library.
    #[error("{0}")]
    Library(#[from] WaitError),

    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install interrupt handler: {0}")]
    SignalHandler(#[source] ctrlc::Error),

    /// The relay loop stopped on an error.
    #[error("Relay stopped: {0}")]
    Relay(#[from] RelayError),
}

/// Executes the relay.
///
/// This function:
/// 1. Opens the serial port
/// 2. Loads the native waiter library
/// 3. Installs the Ctrl+C / SIGTERM handler
/// 4. Runs the relay loop until shutdown
///
/// The serial port is closed on every return path: resources opened
/// before a failure are dropped by `?`, and the relay loop owns the port
/// once it starts.
///
/// # Errors
///
/// Returns an error if:
/// - The serial port cannot be opened
/// - The native library or its wait function cannot be loaded
/// - The interrupt handler cannot be installed
/// - A wait call or a pulse write fails
pub fn execute(config: &ValidatedConfig) -> Result<RelayStats, RunError> {
    tracing::info!(
        "Opening serial port {} @ {} baud",
        config.port,
        config.baudrate
    );
    let transport = SerialTransport::open(&config.port, config.baudrate)?;

    tracing::info!("Loading VSync waiter library from {}", config.dll.display());
    let waiter = NativeWaiter::load(&config.dll)?;

    let shutdown = ShutdownSignal::new();
    shutdown.install().map_err(RunError::SignalHandler)?;

    let relay = RelayLoop::new(
        waiter,
        transport,
        MonotonicClock,
        RelaySettings::from(config),
    );

    Ok(relay.run(&shutdown)?)
}
