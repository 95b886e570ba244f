//! Error types for the serial transport.

use thiserror::Error;

/// Error type for serial transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The port could not be opened.
    #[error("Failed to open serial port '{port}': {source}")]
    Open {
        /// Port name
        port: String,
        /// Underlying serialport error
        #[source]
        source: serialport::Error,
    },

    /// Writing to an open port failed.
    #[error("Failed to write to serial port '{port}': {source}")]
    Write {
        /// Port name
        port: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The operating system could not enumerate ports.
    #[error("Failed to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),
}

impl TransportError {
    /// Returns the port name for errors tied to a specific port.
    #[must_use]
    pub fn port(&self) -> Option<&str> {
        match self {
            Self::Open { port, .. } | Self::Write { port, .. } => Some(port),
            Self::Enumerate(_) => None,
        }
    }
}
