//! Serial transport adapter for the downstream microcontroller.
//!
//! This module provides:
//! - The single-operation [`PulseSink`] capability used by the relay loop
//! - The [`SerialTransport`] implementation over the `serialport` crate
//! - Port enumeration for the `list-ports` command ([`available_ports`])

mod error;
mod transport;


pub use error::TransportError;
pub use transport::{PulseSink, SerialTransport, available_ports};
