//! Windows native waiter loaded with `LoadLibraryW` / `GetProcAddress`.

use std::ffi::{CStr, c_int};
use std::os::windows::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
use windows::core::{PCSTR, PCWSTR};

use crate::vsync::{VsyncSource, WAIT_SYMBOL, WaitError, WaitStatus};

/// Signature of `int wait_for_vsync(void)`.
type WaitFn = unsafe extern "C" fn() -> c_int;

/// Handle to a loaded `VSYNCWaiter.dll` and its `wait_for_vsync` export.
///
/// The library is unloaded when this value is dropped.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use vsync_relay::vsync::VsyncSource;
/// use vsync_relay::vsync::platform::NativeWaiter;
///
/// let mut waiter = NativeWaiter::load(Path::new("VSYNCWaiter.dll")).expect("load failed");
/// let status = waiter.wait().expect("wait failed");
/// println!("{status:?}");
/// ```
pub struct NativeWaiter {
    module: HMODULE,
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
        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        // SAFETY: `wide` is a NUL-terminated UTF-16 string that outlives the call.
        let module = unsafe { LoadLibraryW(PCWSTR(wide.as_ptr())) }.map_err(|e| {
            WaitError::LibraryLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        // SAFETY: `module` was just returned by LoadLibraryW and is still loaded;
        // `symbol` is NUL-terminated.
        let Some(proc) = (unsafe { GetProcAddress(module, PCSTR(symbol.as_ptr().cast())) }) else {
            // SAFETY: We own the only reference to `module`.
            let _ = unsafe { FreeLibrary(module) };
            return Err(WaitError::SymbolMissing {
                path: path.to_path_buf(),
                symbol,
            });
        };

        // SAFETY: The export is declared `int <symbol>(void)`. Both pointer
        // types are plain function pointers of the same size; on x64 the
        // `system` and `C` conventions are identical.
        let wait_fn =
            unsafe { std::mem::transmute::<unsafe extern "system" fn() -> isize, WaitFn>(proc) };

        Ok(Self {
            module,
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
        // SAFETY: `wait_fn` points into `module`, which stays loaded until drop.
        let code = unsafe { (self.wait_fn)() };
        Ok(WaitStatus::from_code(code))
    }
}

impl Drop for NativeWaiter {
    fn drop(&mut self) {
        // SAFETY: `module` came from LoadLibraryW and is released exactly once here.
        let _ = unsafe { FreeLibrary(self.module) };
        tracing::debug!("Unloaded native library {}", self.path.display());
    }
}
