//! Pulse sink trait and the serial port implementation.

use std::io::Write;
use std::time::Duration;

use serialport::SerialPort;

use super::TransportError;
use crate::config::defaults;

/// Capability to emit one byte to the downstream device.
///
/// The relay loop owns its sink; dropping the sink releases the underlying
/// connection.
pub trait PulseSink {
    /// Writes a single byte.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Write`] if the device rejects the write.
    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError>;
}

impl<S: PulseSink + ?Sized> PulseSink for Box<S> {
    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        (**self).write_byte(byte)
    }
}

/// An open serial port.
///
/// The port is closed when this value is dropped.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    name: String,
}

impl std::fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialTransport")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl SerialTransport {
    /// Opens `name` at `baudrate` with the default write timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] naming the port if it cannot be opened.
    pub fn open(name: &str, baudrate: u32) -> Result<Self, TransportError> {
        Self::open_with_timeout(name, baudrate, defaults::serial_timeout())
    }

    /// Opens `name` at `baudrate` with an explicit write timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Open`] naming the port if it cannot be opened.
    pub fn open_with_timeout(
        name: &str,
        baudrate: u32,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let port = serialport::new(name, baudrate)
            .timeout(timeout)
            .open()
            .map_err(|e| TransportError::Open {
                port: name.to_string(),
                source: e,
            })?;

        Ok(Self {
            port,
            name: name.to_string(),
        })
    }

    /// Port name this transport was opened with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PulseSink for SerialTransport {
    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        self.port
            .write_all(&[byte])
            .map_err(|e| TransportError::Write {
                port: self.name.clone(),
                source: e,
            })
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        tracing::debug!("Closing serial port {}", self.name);
    }
}

/// Lists the serial port names the operating system reports.
///
/// # Errors
///
/// Returns [`TransportError::Enumerate`] if enumeration fails.
pub fn available_ports() -> Result<Vec<String>, TransportError> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
