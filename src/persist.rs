// JSON file operations for the record collection

use crate::record::PersonnelRecord;
use atomicwrites::{AtomicFile, OverwriteBehavior};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How the storage file was found when it was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// File parsed
    Loaded,
    /// File does not exist yet
    Missing,
    /// File exists but is not a JSON array of record objects
    Corrupt { reason: String },
    /// File exists but could not be read
    Unreadable { reason: String },
}

impl LoadStatus {
    /// True when existing content was discarded
    pub fn is_degraded(&self) -> bool {
        matches!(self, LoadStatus::Corrupt { .. } | LoadStatus::Unreadable { .. })
    }
}

/// Records read from the storage file, with how they were obtained
///
/// `records` is empty unless `status` is `Loaded`, so callers can tell a fresh
/// install from lost data even though both start with an empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub records: Vec<PersonnelRecord>,
    pub status: LoadStatus,
}

impl LoadOutcome {
    fn empty(status: LoadStatus) -> Self {
        Self {
            records: Vec::new(),
            status,
        }
    }
}

/// Failure to write the storage file
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the whole collection from `path`
pub fn read_collection(path: &Path) -> LoadOutcome {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file = ?path, "Storage file does not exist, starting empty");
            return LoadOutcome::empty(LoadStatus::Missing);
        }
        Err(e) => {
            warn!(file = ?path, error = ?e, "Failed to read storage file, starting empty");
            return LoadOutcome::empty(LoadStatus::Unreadable { reason: e.to_string() });
        }
    };

    match serde_json::from_slice::<Vec<PersonnelRecord>>(&bytes) {
        Ok(records) => {
            info!(file = ?path, count = records.len(), "Loaded records");
            LoadOutcome {
                records,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => {
            warn!(file = ?path, error = ?e, "Failed to parse storage file, starting empty");
            LoadOutcome::empty(LoadStatus::Corrupt { reason: e.to_string() })
        }
    }
}

/// Encode the collection the way it is stored on disk
///
/// Four-space indentation, UTF-8 kept verbatim, trailing newline.
pub fn encode_collection(records: &[PersonnelRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Replace the file at `path` with the encoded collection
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over `path`, so readers see either the old or the new collection.
pub fn write_collection(path: &Path, records: &[PersonnelRecord]) -> Result<(), SaveError> {
    let bytes = encode_collection(records)?;
    let io_err = |source: io::Error| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| {
            f.write_all(&bytes)?;
            f.flush()
        })
        .map_err(|e| match e {
            atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => io_err(e),
        })?;

    info!(file = ?path, count = records.len(), "Saved records");
    Ok(())
}
