//! Unix native waiter loaded with `dlopen` / `dlsym`.

use std::ffi::{CStr, CString, c_int, c_void};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::vsync::{VsyncSource, WAIT_SYMBOL, WaitError, WaitStatus};

/// Signature of `int wait_for_vsync(void)`.
type WaitFn = unsafe extern "C" fn() -> c_int;

/// Handle to a loaded waiter shared object (`.so` / `.dylib`) and its
/// `wait_for_vsync` export.
///
/// A path without a `/` is resolved through the dynamic linker's search
/// path. The library is closed when this value is dropped.
pub struct NativeWaiter {
    handle: *mut c_void,
    wait_fn: WaitFn,
    path: PathBuf,
}

impl std::fmt::Debug for NativeWaiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeWaiter")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl NativeWaiter {
    /// Loads the library at `path` and resolves `wait_for_vsync`.
    ///
    /// # Errors
    ///
    /// - [`WaitError::LibraryLoad`] if the file cannot be loaded
    /// - [`WaitError::SymbolMissing`] if the export is absent
    pub fn load(path: &Path) -> Result<Self, WaitError> {
        Self::open(path, WAIT_SYMBOL)
    }

    fn open(path: &Path, symbol: &'static CStr) -> Result<Self, WaitError> {
        let load_error = |reason: String| WaitError::LibraryLoad {
            path: path.to_path_buf(),
            reason,
        };

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|_| load_error("path contains a NUL byte".to_string()))?;

        // SAFETY: `c_path` is NUL-terminated and outlives the call.
        let handle = unsafe { libc::dlopen(c_path.as_ptr(), libc::RTLD_NOW | libc::RTLD_LOCAL) };
        if handle.is_null() {
            return Err(load_error(last_dl_error()));
        }

        // SAFETY: `handle` is a live dlopen handle and `symbol` is NUL-terminated.
        let proc = unsafe { libc::dlsym(handle, symbol.as_ptr()) };
        if proc.is_null() {
            // SAFETY: `handle` came from dlopen and is closed exactly once here.
            unsafe { libc::dlclose(handle) };
            return Err(WaitError::SymbolMissing {
                path: path.to_path_buf(),
                symbol,
            });
        }

        // SAFETY: The export is declared `int <symbol>(void)`, and POSIX
        // requires dlsym results to be convertible to function pointers.
        let wait_fn = unsafe { std::mem::transmute::<*mut c_void, WaitFn>(proc) };

        Ok(Self {
            handle,
            wait_fn,
            path: path.to_path_buf(),
        })
    }

    /// Path the library was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VsyncSource for NativeWaiter {
    fn wait(&mut self) -> Result<WaitStatus, WaitError> {
        // SAFETY: `wait_fn` points into `handle`, which stays open until drop.
        let code = unsafe { (self.wait_fn)() };
        Ok(WaitStatus::from_code(code))
    }
}

impl Drop for NativeWaiter {
    fn drop(&mut self) {
        // SAFETY: `handle` came from dlopen and is released exactly once here.
        unsafe { libc::dlclose(self.handle) };
        tracing::debug!("Unloaded native library {}", self.path.display());
    }
}

fn last_dl_error() -> String {
    // SAFETY: dlerror returns null or a NUL-terminated string valid until the
    // next dl* call on this thread.
    let message = unsafe { libc::dlerror() };
    if message.is_null() {
        return "unknown dynamic loader error".to_string();
    }

    // SAFETY: non-null dlerror result, checked above.
    unsafe { CStr::from_ptr(message) }
        .to_string_lossy()
        .into_owned()
}
