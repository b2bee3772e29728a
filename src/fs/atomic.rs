//! Atomic file replacement.
//!
//! All writes follow the same pattern:
//! 1. Write content to `.{filename}.tmp` next to the target
//! 2. Sync the temp file to disk
//! 3. Rename it over the target
//!
//! Source and destination share a directory, so the rename never crosses
//! filesystems. On crash a stale temp file may remain; it is overwritten by
//! the next write.

use crate::error::{CvsError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use cvsparse::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("cvs-cache.json"), b"{}\n")?;
/// # Ok::<(), cvsparse::error::CvsError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            CvsError::Cache(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CvsError::Cache(format!(
            "failed to atomically replace '{}': {}",
            path.display(),
            e
        ))
    })
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            CvsError::Cache(format!("invalid cache file path '{}'", target.display()))
        })?;
    let parent = target.parent().unwrap_or(Path::new("."));
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        CvsError::Cache(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            CvsError::Cache(format!("failed to write temporary file: {}", e))
        })
}
