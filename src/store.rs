// Personnel record store backed by a single JSON file

use crate::filter::{Matches, Query};
use crate::persist::{self, LoadStatus, SaveError};
use crate::record::{PersonnelRecord, RecordDraft};
use crate::validate::{self, ValidationError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Caller's answer to a yes/no decision point
///
/// Mutations that overwrite or remove an existing record are first called with
/// `Unasked`; the store then reports that confirmation is required and the
/// caller asks the user and calls again with `Granted` or `Declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    Unasked,
    Granted,
    Declined,
}

/// Result of [`RecordStore::upsert`]
#[derive(Debug)]
pub enum UpsertOutcome {
    /// New record appended
    Created { saved: Result<(), SaveError> },
    /// Existing record replaced
    Updated { saved: Result<(), SaveError> },
    /// A record with this id exists and the caller has not confirmed the overwrite
    ConfirmationRequired { existing: PersonnelRecord },
    /// Overwrite declined, nothing changed
    Cancelled,
    /// Draft rejected, nothing changed
    Invalid(ValidationError),
}

/// Result of [`RecordStore::delete`]
#[derive(Debug)]
pub enum DeleteOutcome {
    /// No record with this id
    NoOp,
    /// The record exists and the caller has not confirmed the removal
    ConfirmationRequired { existing: PersonnelRecord },
    /// Record removed
    Deleted { saved: Result<(), SaveError> },
    /// Removal declined, nothing changed
    Cancelled,
}

/// Refusal to overwrite a storage file whose content could not be loaded
#[derive(Debug, thiserror::Error)]
#[error("{} could not be loaded; refusing to overwrite it", .path.display())]
pub struct OverwriteRefused {
    pub path: PathBuf,
}

/// In-memory personnel collection, persisted wholesale after every mutation
///
/// The collection in memory is the source of truth for the session. A failed
/// save is reported through the mutation outcome but never rolls back the
/// in-memory change.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<PersonnelRecord>,
    load_status: LoadStatus,
}

impl RecordStore {
    /// Open the store backed by the file at `path`
    ///
    /// Never fails: a missing file starts an empty collection, and so does an
    /// unreadable or corrupt one. Check [`RecordStore::load_status`] to tell
    /// these apart.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let outcome = persist::read_collection(&path);

        if outcome.status.is_degraded() {
            warn!(file = ?path, status = ?outcome.status, "Existing records were discarded");
        }

        Self {
            path,
            records: outcome.records,
            load_status: outcome.status,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the backing file was found when the store was opened
    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Every record, in collection order
    pub fn records(&self) -> &[PersonnelRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Re-read the backing file, replacing the in-memory collection
    pub fn load(&mut self) -> &[PersonnelRecord] {
        let outcome = persist::read_collection(&self.path);
        self.records = outcome.records;
        self.load_status = outcome.status;
        &self.records
    }

    /// Write the whole collection to the backing file
    pub fn save(&self) -> Result<(), SaveError> {
        persist::write_collection(&self.path, &self.records).inspect_err(|e| {
            warn!(file = ?self.path, error = %e, "Failed to save records, keeping changes in memory");
        })
    }

    /// Check a draft against the field rules, after trimming it
    pub fn validate(&self, draft: &RecordDraft) -> Result<(), ValidationError> {
        validate::validate(&draft.trimmed())
    }

    /// Create or replace the record with the draft's id
    ///
    /// Replacing an existing record requires `Confirmation::Granted`.
    pub fn upsert(&mut self, draft: &RecordDraft, confirmation: Confirmation) -> UpsertOutcome {
        let draft = draft.trimmed();
        if let Err(e) = validate::validate(&draft) {
            debug!(id = %draft.id, error = %e, "upsert: validation failed");
            return UpsertOutcome::Invalid(e);
        }

        match self.position(&draft.id) {
            None => {
                debug!(id = %draft.id, "upsert: creating record");
                self.records.push(draft.into_record());
                UpsertOutcome::Created { saved: self.save() }
            }
            Some(index) => match confirmation {
                Confirmation::Unasked => UpsertOutcome::ConfirmationRequired {
                    existing: self.records[index].clone(),
                },
                Confirmation::Declined => {
                    debug!(id = %draft.id, "upsert: overwrite declined");
                    UpsertOutcome::Cancelled
                }
                Confirmation::Granted => {
                    debug!(id = %draft.id, "upsert: replacing record");
                    self.records[index] = draft.into_record();
                    UpsertOutcome::Updated { saved: self.save() }
                }
            },
        }
    }

    /// Remove the record with `id`
    ///
    /// Removal requires `Confirmation::Granted`; an unknown id is a no-op.
    pub fn delete(&mut self, id: &str, confirmation: Confirmation) -> DeleteOutcome {
        let Some(index) = self.position(id) else {
            debug!(id, "delete: no such record");
            return DeleteOutcome::NoOp;
        };

        match confirmation {
            Confirmation::Unasked => DeleteOutcome::ConfirmationRequired {
                existing: self.records[index].clone(),
            },
            Confirmation::Declined => {
                debug!(id, "delete: declined");
                DeleteOutcome::Cancelled
            }
            Confirmation::Granted => {
                let before = self.records.len();
                self.records.retain(|r| r.id != id);
                info!(id, removed = before - self.records.len(), "Deleted record");
                DeleteOutcome::Deleted { saved: self.save() }
            }
        }
    }

    /// Records whose id or full name contains `query`, ignoring case
    ///
    /// An empty query yields every record. Results come in collection order.
    pub fn search(&self, query: &str) -> Matches<'_> {
        Matches::new(&self.records, Query::new(query))
    }

    /// Record with exactly this id
    pub fn find_by_id(&self, id: &str) -> Option<&PersonnelRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Fail when a save would replace a file whose content was discarded on load
    ///
    /// `force` overrides the check.
    pub fn guard_overwrite(&self, force: bool) -> Result<(), OverwriteRefused> {
        if self.load_status.is_degraded() && !force {
            warn!(file = ?self.path, "Refusing to overwrite storage file that failed to load");
            return Err(OverwriteRefused {
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    /// Upsert, asking `confirm` when the draft would replace an existing record
    ///
    /// Invalid drafts are reported before the overwrite guard is consulted,
    /// since they never write.
    pub fn upsert_with<F>(&mut self, draft: &RecordDraft, force: bool, confirm: F) -> Result<UpsertOutcome, OverwriteRefused>
    where
        F: FnOnce(&PersonnelRecord) -> bool,
    {
        if let Err(e) = self.validate(draft) {
            return Ok(UpsertOutcome::Invalid(e));
        }
        self.guard_overwrite(force)?;

        match self.upsert(draft, Confirmation::Unasked) {
            UpsertOutcome::ConfirmationRequired { existing } => {
                let answer = if confirm(&existing) {
                    Confirmation::Granted
                } else {
                    Confirmation::Declined
                };
                Ok(self.upsert(draft, answer))
            }
            other => Ok(other),
        }
    }

    /// Delete, asking `confirm` first
    ///
    /// An unknown id is a no-op even when the overwrite guard would refuse.
    pub fn delete_with<F>(&mut self, id: &str, force: bool, confirm: F) -> Result<DeleteOutcome, OverwriteRefused>
    where
        F: FnOnce(&PersonnelRecord) -> bool,
    {
        if self.position(id).is_none() {
            return Ok(DeleteOutcome::NoOp);
        }
        self.guard_overwrite(force)?;

        match self.delete(id, Confirmation::Unasked) {
            DeleteOutcome::ConfirmationRequired { existing } => {
                let answer = if confirm(&existing) {
                    Confirmation::Granted
                } else {
                    Confirmation::Declined
                };
                Ok(self.delete(id, answer))
            }
            other => Ok(other),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }
}
