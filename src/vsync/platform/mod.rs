//! Platform-specific native waiter implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`VsyncSource`](super::VsyncSource) trait.
//!
//! # Platform Support
//!
//! - **Windows**: Uses `LoadLibraryW` / `GetProcAddress` via the `windows` crate.
//! - **Unix**: Uses `dlopen` / `dlsym` via `libc`.
//! - **Other**: [`NativeWaiter::load`] always fails with
//!   [`WaitError::Unsupported`](super::WaitError::Unsupported).

#[cfg(windows)]
mod windows;

#[cfg(unix)]
mod unix;

#[cfg(not(any(windows, unix)))]
mod unsupported;

#[cfg(windows)]
pub use self::windows::NativeWaiter;

#[cfg(unix)]
pub use self::unix::NativeWaiter;

#[cfg(not(any(windows, unix)))]
pub use unsupported::NativeWaiter;
