//! Utility functions for log formatting and output-path checks.

use crate::error::{EtlError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};

const SCRATCH_ATTEMPTS: u32 = 8;

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and the number
/// of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Directory a file path will be written into; `.` for bare file names.
pub fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Candidate scratch file names tried in `dir`, in order.
fn scratch_candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    let pid = std::process::id();
    (0..SCRATCH_ATTEMPTS).map(move |n| dir.join(format!(".__devto_etl_check_{pid}_{n}__")))
}

/// Create a fresh scratch file in `dir`, never opening an existing one.
async fn create_scratch(dir: &Path) -> Result<PathBuf> {
    for candidate in scratch_candidates(dir) {
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
            .await
        {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(EtlError::io(dir, e)),
        }
    }
    Err(EtlError::io(
        dir,
        io::Error::new(io::ErrorKind::AlreadyExists, "no free scratch file name"),
    ))
}

/// Ensure the directory that will hold `path` exists and is writable.
///
/// Creates and immediately deletes a scratch file next to the target. Existing
/// files are never opened, the directory is never created, and the target
/// file is never touched.
///
/// # Errors
///
/// [`EtlError::Io`] if the directory is missing, is not a directory, or
/// rejects the scratch write (permissions, read-only filesystem, ...).
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_parent(path: &Path) -> Result<()> {
    let dir = parent_dir(path);

    let meta = fs::metadata(&dir)
        .await
        .map_err(|e| EtlError::io(&dir, e))?;
    if !meta.is_dir() {
        return Err(EtlError::io(
            &dir,
            io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        ));
    }

    let scratch_path = create_scratch(&dir).await?;
    if let Err(e) = fs::remove_file(&scratch_path).await {
        warn!(file = %scratch_path.display(), error = %e, "Failed to remove scratch file");
    }

    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}
