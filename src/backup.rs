// File-copy backups of the storage file

use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Nothing to back up: {} does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Default backup file name, stamped with `now` to the second
pub fn default_backup_name(now: DateTime<Local>) -> String {
    format!("personnel_backup_{}.json", now.format("%Y-%m-%d_%H%M%S"))
}

/// Copy the storage file at `source` to `dest`, byte for byte
///
/// When `dest` is an existing directory the backup is placed inside it under
/// [`default_backup_name`]. Missing parent directories are created. Returns the
/// path written.
pub fn backup(source: &Path, dest: &Path) -> Result<PathBuf, BackupError> {
    if dest.is_dir() {
        return backup_into_dir(source, dest, Local::now());
    }
    copy_file(source, dest.to_path_buf())
}

/// Copy the storage file at `source` into `dir` under [`default_backup_name`]
///
/// `dir` is created when it does not exist yet, so every call writes a new
/// timestamped file rather than a file named after the directory.
pub fn backup_into_dir(source: &Path, dir: &Path, now: DateTime<Local>) -> Result<PathBuf, BackupError> {
    copy_file(source, dir.join(default_backup_name(now)))
}

fn copy_file(source: &Path, target: PathBuf) -> Result<PathBuf, BackupError> {
    if !source.is_file() {
        return Err(BackupError::SourceMissing(source.to_path_buf()));
    }

    let copy_err = |source_err: io::Error| BackupError::Copy {
        from: source.to_path_buf(),
        to: target.clone(),
        source: source_err,
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    let bytes = fs::copy(source, &target).map_err(copy_err)?;

    info!(from = ?source, to = ?target, bytes, "Backup written");
    Ok(target)
}
