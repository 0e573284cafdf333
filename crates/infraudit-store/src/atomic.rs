//! Atomic write primitives
//!
//! Temp file + rename, so readers never see a partially written snapshot.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically write bytes to `target_path`, creating parent directories.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", e))?;
    }

    let mut temp_name = target_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let written = write_synced(temp_path, content)
        .map_err(|e| io_error("write_snapshot_temp", e))
        .and_then(|()| {
            fs::rename(temp_path, target_path).map_err(|e| io_error("rename_snapshot_temp", e))
        });

    if written.is_err() {
        let _ = fs::remove_file(temp_path);
    }
    written
}

/// Content is flushed to disk before the rename makes it visible.
fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}
