//! Shared helpers for the CLI's unit tests
//!
//! Integration tests have their own copy in `tests/integration_test_helpers.rs`.

#![cfg(test)]

use std::path::{Path, PathBuf};

/// Switches the working directory for the lifetime of the guard.
///
/// Commands resolve `adaptergen.yaml` and `registry.yaml` relative to the
/// working directory, so tests using this must be `#[serial]`.
pub struct DirGuard {
    original_dir: PathBuf,
}

impl DirGuard {
    pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        std::fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(Self { original_dir })
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}
