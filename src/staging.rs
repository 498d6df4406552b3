//! Scoped temporary directories for staging files before upload.
//!
//! Staging directories are never created under the current working directory, even
//! when `TMPDIR` is relative (e.g. `TMPDIR=tmp`).

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::Result;

const STAGING_PREFIX: &str = "modelcards-";

/// Absolute base directory for staging directories.
pub fn staging_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        return t;
    }
    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}

/// Create a fresh staging directory, removed when the returned guard is dropped.
pub fn staging_dir() -> Result<TempDir> {
    let dir = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(staging_base())?;
    tracing::debug!("Staging in {}", dir.path().display());
    Ok(dir)
}
