// Personnel - roster of personnel records kept in a flat JSON file

pub mod backup;
pub mod config;
pub mod export;
pub mod filter;
pub mod persist;
pub mod record;
pub mod store;
pub mod validate;

// Re-export main types for convenience
pub use backup::{BackupError, backup, backup_into_dir, default_backup_name};
pub use config::Config;
pub use export::{ExportError, export_csv};
pub use filter::{Matches, Query};
pub use persist::{LoadOutcome, LoadStatus, SaveError};
pub use record::{Field, PersonnelRecord, RecordDraft};
pub use store::{Confirmation, DeleteOutcome, OverwriteRefused, RecordStore, UpsertOutcome};
pub use validate::{ValidationError, validate};
