//! Atomic write primitives
//!
//! Writes go to a uniquely named temp file beside the target, which is then
//! renamed over it, so readers never see a partial file.

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically replace `target_path` with `content`
///
/// With `create_dirs` the parent directory is created first; otherwise a
/// missing parent is an error.
pub fn atomic_write(target_path: &Path, content: &[u8], create_dirs: bool) -> Result<()> {
    let dir = target_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if create_dirs {
        fs::create_dir_all(dir).map_err(|e| io_error("create_settings_dir", dir, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut temp =
        NamedTempFile::new_in(dir).map_err(|e| io_error("create_settings_temp", dir, e))?;

    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| io_error("write_settings_temp", temp.path(), e))?;

    // A failed persist hands the temp file back and dropping it removes it
    temp.persist(target_path)
        .map_err(|e| io_error("rename_settings_temp", target_path, e.error))?;

    Ok(())
}
