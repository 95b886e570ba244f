//! VSync relay
//!
//! A library for forwarding display VSync edges, reported by a vendor
//! waiter library, to a serial-connected microcontroller as single-byte
//! trigger pulses.

pub mod config;
pub mod relay;
pub mod serial;
pub mod shutdown;
pub mod time;
pub mod vsync;
