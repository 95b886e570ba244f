//! Wait status and the VSync source trait.

use std::ffi::CStr;

use super::WaitError;

/// Status code the waiter returns when a new edge occurred.
pub const ACCEPT_CODE: i32 = 1;

/// Name of the function exported by the waiter library.
pub const WAIT_SYMBOL: &CStr = c"wait_for_vsync";

/// Outcome of one call to the waiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStatus {
    /// A new VSync edge occurred.
    Accept,
    /// Spurious wake or no new edge; carries the raw code.
    Ignored(i32),
}

impl WaitStatus {
    /// Interprets a raw status code from the native waiter.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        if code == ACCEPT_CODE {
            Self::Accept
        } else {
            Self::Ignored(code)
        }
    }

    /// Returns true for [`WaitStatus::Accept`].
    #[must_use]
    pub const fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Capability to block until the next VSync edge.
///
/// # Design
///
/// - The relay loop depends on this trait only, never on the native library
/// - Enables dependency injection for testing with scripted sources
/// - A non-accept status is not an error; errors are reserved for a failed call
///
/// # Example
///
/// ```
/// use vsync_relay::vsync::{VsyncSource, WaitError, WaitStatus};
///
/// struct AlwaysAccept;
///
/// impl VsyncSource for AlwaysAccept {
///     fn wait(&mut self) -> Result<WaitStatus, WaitError> {
///         Ok(WaitStatus::Accept)
///     }
/// }
///
/// assert!(AlwaysAccept.wait().unwrap().is_accept());
/// ```
pub trait VsyncSource {
    /// Blocks until the next edge or device event and returns its status.
    ///
    /// # Errors
    ///
    /// Returns [`WaitError::Device`] if the wait itself fails.
    fn wait(&mut self) -> Result<WaitStatus, WaitError>;
}

impl<W: VsyncSource + ?Sized> VsyncSource for &mut W {
    fn wait(&mut self) -> Result<WaitStatus, WaitError> {
        (**self).wait()
    }
}
