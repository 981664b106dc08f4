//! File system utilities.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// This prevents file corruption if the process is interrupted (e.g., Ctrl+C).
/// The temp file is created in the same directory as the target file to ensure
/// the rename operation is atomic (same filesystem). Missing parent
/// directories are created. With `private` set, the file is readable by the
/// owner only (Unix).
///
/// # Errors
///
/// Returns an error if the temp file cannot be written or renamed.
pub fn atomic_write(path: &Path, content: &str, private: bool) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    write_temp(&temp_path, content, private)
        .with_context(|| format!("Failed to write file: {}", temp_path.display()))?;

    // Atomic rename (same filesystem)
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}

/// Creates the temp file with its final mode, so a private file is never
/// readable by others, not even before the rename.
fn write_temp(path: &Path, content: &str, private: bool) -> io::Result<()> {
    // A leftover temp file would keep its old mode.
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    if private {
        owner_only(&mut options);
    }

    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

#[cfg(unix)]
fn owner_only(options: &mut OpenOptions) {
    use std::os::unix::fs::OpenOptionsExt;

    options.mode(0o600);
}

#[cfg(not(unix))]
fn owner_only(_options: &mut OpenOptions) {}
