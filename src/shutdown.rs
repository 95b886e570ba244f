//! Cancellation signal for the relay loop (Ctrl+C / SIGTERM).
//!
//! The relay loop is blocked inside the native wait call most of the time,
//! so an interrupt cannot stop it directly. Instead the handler raises a
//! flag that the loop checks between iterations.
//!
//! A second interrupt while the first is still pending exits the process
//! immediately with [`EXIT_CODE_FORCED`]; the operating system then reclaims
//! the serial handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Exit code used when a second interrupt forces termination.
pub const EXIT_CODE_FORCED: i32 = 130;

/// Action to take after receiving an interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalAction {
    /// First interrupt: stop at the next loop boundary
    Shutdown,
    /// Later interrupt: exit without waiting for the loop
    ImmediateExit,
}

/// Shared shutdown flag.
///
/// Clones observe the same flag, so the handler thread and the relay loop
/// can each hold one.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    count: Arc<AtomicU32>,
}

impl ShutdownSignal {
    /// Creates a signal that has not been raised.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one interrupt and returns what the caller should do.
    pub fn request(&self) -> SignalAction {
        if self.count.fetch_add(1, Ordering::SeqCst) == 0 {
            SignalAction::Shutdown
        } else {
            SignalAction::ImmediateExit
        }
    }

    /// Returns true once any interrupt has been recorded.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.count.load(Ordering::SeqCst) > 0
    }

    /// Number of interrupts recorded so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    /// Installs the process-wide Ctrl+C / SIGTERM handler for this signal.
    ///
    /// Must be called at most once per process.
    ///
    /// # Errors
    ///
    /// Returns an error if a handler is already installed or the OS refuses it.
    pub fn install(&self) -> Result<(), ctrlc::Error> {
        let signal = self.clone();
        ctrlc::set_handler(move || match signal.request() {
            SignalAction::Shutdown => {
                tracing::info!("Interrupt received, stopping after the current VSync wait");
            }
            SignalAction::ImmediateExit => {
                tracing::warn!("Second interrupt received, exiting immediately");
                std::process::exit(EXIT_CODE_FORCED);
            }
        })
    }
}
