// Spreadsheet export of the record collection

use crate::record::{Field, PersonnelRecord};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// UTF-8 byte-order mark; spreadsheet programs use it to detect the encoding
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("There are no records to export")]
    Empty,

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write `records` to `path` as CSV, one row per record in collection order
///
/// The first row holds the field keys. The file is written to a temporary
/// sibling and renamed over `path`, so a failed export leaves any earlier file
/// untouched. Returns the number of rows written.
pub fn export_csv(records: &[PersonnelRecord], path: &Path) -> Result<usize, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|file| -> Result<(), ExportError> {
            file.write_all(UTF8_BOM)?;

            let mut writer = csv::Writer::from_writer(file);
            writer.write_record(Field::ALL.iter().map(|f| f.key()))?;
            for record in records {
                writer.write_record(Field::ALL.iter().map(|f| record.get(*f)))?;
            }
            writer.flush()?;
            Ok(())
        })
        .map_err(|e| match e {
            atomicwrites::Error::Internal(e) => ExportError::Io(e),
            atomicwrites::Error::User(e) => e,
        })?;

    info!(file = ?path, count = records.len(), "Exported records");
    Ok(records.len())
}
