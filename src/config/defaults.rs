//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default serial baudrate.
pub const BAUDRATE: u32 = 921_600;

/// Default debounce threshold in seconds.
pub const PULSE_THRESHOLD_SECS: f64 = 0.0005;

/// Default number of wait calls discarded after startup.
pub const WARMUP_COUNT: u64 = 0;

/// Default log level name.
pub const LOG_LEVEL: &str = "info";

/// File name of the configuration file looked up next to the executable.
pub const CONFIG_FILE_NAME: &str = "vsync.config.json";

/// Write timeout applied to the serial port in milliseconds.
pub const SERIAL_TIMEOUT_MS: u64 = 1000;

/// Default debounce threshold as Duration.
#[must_use]
pub fn pulse_threshold() -> Duration {
    Duration::from_secs_f64(PULSE_THRESHOLD_SECS)
}

/// Default serial write timeout as Duration.
#[must_use]
pub const fn serial_timeout() -> Duration {
    Duration::from_millis(SERIAL_TIMEOUT_MS)
}
