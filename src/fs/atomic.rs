//! Atomic filesystem writes.
//!
//! Both writers follow the same pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Move it into place in a single step
//!
//! [`atomic_write`] moves with `rename()`, replacing whatever is at the
//! target. [`exclusive_write`] moves with `hard_link()`, which fails with
//! `AlreadyExists` when the target exists, so at most one concurrent writer
//! wins. Readers never observe a partially written target either way.
//!
//! Source and destination must be on the same filesystem. On crash a
//! temporary file may remain (named `.{filename}.{pid}.{n}.tmp`); it is never
//! mistaken for a target, see [`is_temp_file_name`].

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

const TEMP_SUFFIX: &str = ".tmp";

/// Atomically write bytes to a file, replacing any existing content.
///
/// Parent directories are created as needed.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    sync_parent(path);

    Ok(())
}

/// Write bytes to a file only if it does not exist yet.
///
/// Returns `Ok(false)` without touching the target when it already exists.
pub fn exclusive_write<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<bool> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;

    let linked = fs::hard_link(&temp_path, path);
    let _ = fs::remove_file(&temp_path);

    match linked {
        Ok(()) => {
            sync_parent(path);
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e),
    }
}

/// Whether `name` follows the temporary file naming used by the writers here.
pub fn is_temp_file_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(TEMP_SUFFIX)
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// Generate a temporary file path in the same directory as the target.
///
/// The pid and a process-wide counter keep concurrent writers to the same
/// target from sharing a temp file.
fn generate_temp_path(target: &Path) -> io::Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "invalid file path"))?;

    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let temp_name = format!(".{}.{}.{}{}", filename, std::process::id(), n, TEMP_SUFFIX);
    Ok(parent.join(temp_name))
}

/// Write content to a file and sync to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

/// Persist the directory entry. Best effort.
#[cfg(unix)]
fn sync_parent(path: &Path) {
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) {}
