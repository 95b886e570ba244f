//! External wait adapter for the vendor VSync waiter library.
//!
//! This module provides types and traits for:
//! - Interpreting the waiter's integer status ([`WaitStatus`])
//! - Waiting for the next edge behind a narrow capability ([`VsyncSource`])
//! - Loading the vendor library on supported platforms ([`platform`])

mod error;
pub mod platform;
mod source;

pub use error::WaitError;
pub use source::{ACCEPT_CODE, VsyncSource, WAIT_SYMBOL, WaitStatus};
