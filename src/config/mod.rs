//! Configuration layer for vsync-relay.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - JSON configuration file parsing ([`FileConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **JSON config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! `port` and `dll` have no default; an empty string counts as absent at
//! each level. Numeric options treat an explicit `0` as a real value, so
//! `"pulse_threshold": 0` disables debouncing instead of falling back to
//! the default.
//!
//! # Config File Location
//!
//! Without `--config`, the file `vsync.config.json` next to the executable
//! is used. A missing file is not an error; a malformed one is.

mod cli;
pub mod defaults;
mod error;
mod file;
mod log_level;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, LogLevelArg};
pub use error::{ConfigError, field};
pub use file::{FileConfig, default_config_template};
pub use log_level::LogLevel;
pub use validated::{ValidatedConfig, write_default_config};
