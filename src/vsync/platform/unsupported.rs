//! Native waiter stand-in for targets without a dynamic loader.

use std::path::Path;

use crate::vsync::{VsyncSource, WaitError, WaitStatus};

/// Native waiter that cannot be constructed on this target.
#[derive(Debug)]
pub enum NativeWaiter {}

impl NativeWaiter {
    /// Always returns [`WaitError::Unsupported`] naming `path`.
    ///
    /// # Errors
    ///
    /// Always.
    pub fn load(path: &Path) -> Result<Self, WaitError> {
        Err(WaitError::Unsupported {
            path: path.to_path_buf(),
        })
    }
}

impl VsyncSource for NativeWaiter {
    fn wait(&mut self) -> Result<WaitStatus, WaitError> {
        match *self {}
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn load_reports_unsupported_with_path() {
        let result = NativeWaiter::load(Path::new("VSYNCWaiter.dll"));

        match result {
            Err(WaitError::Unsupported { path }) => {
                assert_eq!(path, PathBuf::from("VSYNCWaiter.dll"));
            }
            other => panic!("expected Unsupported, got {other:?}"),
        }
    }
}
