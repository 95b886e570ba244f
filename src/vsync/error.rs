//! Error types for the VSync wait adapter.

use std::ffi::CStr;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for loading and calling the native waiter.
///
/// Load-time variants are fatal startup errors; [`WaitError::Device`] is
/// what a source reports when a wait call itself fails.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The library file could not be loaded.
    #[error("Failed to load native library '{}': {reason}", path.display())]
    LibraryLoad {
        /// Path that was passed to the loader
        path: PathBuf,
        /// Loader error message
        reason: String,
    },

    /// The library loaded but does not export the wait function.
    #[error(
        "Native library '{}' does not export '{}'",
        path.display(),
        symbol.to_string_lossy()
    )]
    SymbolMissing {
        /// Path of the loaded library
        path: PathBuf,
        /// Name of the missing export
        symbol: &'static CStr,
    },

    /// Native waiter libraries cannot be loaded on this platform.
    #[error("Cannot load native library '{}': unsupported on this platform", path.display())]
    Unsupported {
        /// Path that was requested
        path: PathBuf,
    },

    /// The wait call failed.
    #[error("VSync wait failed: {0}")]
    Device(String),
}
