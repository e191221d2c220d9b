//! Local storage: the [`LocalStore`] seam and its in-memory implementation.
//!
//! Stores follow a unit-of-work model. Lookups hand out mutable references
//! into a staged working set, creations are added to it, and nothing becomes
//! visible until [`LocalStore::commit`] succeeds.

use crate::{error::Result, JournalSnapshot, Record, RecordId, RemoteRepresentation};
use std::collections::BTreeSet;

/// The storage primitives reconciliation needs.
pub trait LocalStore {
    /// Fetch every record whose identifier is in `identifiers`, for in-place mutation.
    fn find_by_identifiers(
        &mut self,
        identifiers: &BTreeSet<RecordId>,
    ) -> Result<Vec<&mut Record>>;

    /// Stage a new record built from a remote representation.
    fn create(&mut self, representation: &RemoteRepresentation) -> Result<&mut Record>;

    /// Publish all staged creates and updates as one batch.
    fn commit(&mut self) -> Result<()>;

    /// Discard staged changes.
    fn rollback(&mut self) {}
}

/// In-memory journal store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Committed records, in insertion order
    records: Vec<Record>,
    /// Working copy holding uncommitted changes
    staged: Option<Vec<Record>>,
    commits: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose committed state is `records`.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            records: records.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Restore a store from a snapshot.
    pub fn from_snapshot(snapshot: JournalSnapshot) -> Self {
        Self::with_records(snapshot.records)
    }

    /// Snapshot of the committed state.
    pub fn snapshot(&self) -> JournalSnapshot {
        JournalSnapshot::from_records(self.records.iter().cloned())
    }

    /// Snapshot of the state a commit would publish.
    pub fn staged_snapshot(&self) -> JournalSnapshot {
        let records = self.staged.as_ref().unwrap_or(&self.records);
        JournalSnapshot::from_records(records.iter().cloned())
    }

    /// Get a committed record by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.identifier() == Some(identifier))
    }

    /// All committed records.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the committed state holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of successful commits since creation.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Whether there are staged, uncommitted changes.
    pub fn has_pending_changes(&self) -> bool {
        self.staged.is_some()
    }

    /// Stage an insert, replacing any record with the same identifier.
    pub fn upsert(&mut self, record: Record) {
        let working = self.working();
        let position = record
            .identifier()
            .and_then(|id| working.iter().position(|r| r.identifier() == Some(id)));

        match position {
            Some(index) => working[index] = record,
            None => working.push(record),
        }
    }

    /// Stage removal of the record with the given identifier.
    pub fn remove(&mut self, identifier: &str) -> Option<Record> {
        let working = self.working();
        let index = working
            .iter()
            .position(|r| r.identifier() == Some(identifier))?;
        Some(working.remove(index))
    }

    fn working(&mut self) -> &mut Vec<Record> {
        self.staged.get_or_insert_with(|| self.records.clone())
    }
}

impl LocalStore for MemoryStore {
    fn find_by_identifiers(
        &mut self,
        identifiers: &BTreeSet<RecordId>,
    ) -> Result<Vec<&mut Record>> {
        Ok(self
            .working()
            .iter_mut()
            .filter(|r| r.identifier().is_some_and(|id| identifiers.contains(id)))
            .collect())
    }

    fn create(&mut self, representation: &RemoteRepresentation) -> Result<&mut Record> {
        let working = self.working();
        let index = working.len();
        working.push(Record::from_representation(representation));
        Ok(&mut working[index])
    }

    fn commit(&mut self) -> Result<()> {
        if let Some(staged) = self.staged.take() {
            self.records = staged;
        }
        self.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) {
        self.staged = None;
    }
}
