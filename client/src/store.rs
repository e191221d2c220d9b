//! File-backed journal storage.

use journal_engine::{
    Error, JournalSnapshot, LocalStore, MemoryStore, Record, RecordId, RemoteRepresentation,
    Result,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A [`MemoryStore`] persisted as a JSON snapshot file.
///
/// Commit writes the staged state to a temporary file and renames it over the
/// snapshot, then publishes it in memory. A failed write leaves both the file
/// and the committed in-memory state as they were.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
}

impl FileStore {
    /// Open the snapshot at `path`, starting empty if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let memory = match fs::read_to_string(&path) {
            Ok(json) => MemoryStore::from_snapshot(JournalSnapshot::from_json(&json)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No snapshot yet, starting empty");
                MemoryStore::new()
            }
            Err(err) => {
                return Err(Error::Store(format!(
                    "failed to read {}: {}",
                    path.display(),
                    err
                )))
            }
        };

        tracing::debug!(path = %path.display(), records = memory.len(), "Opened journal store");
        Ok(Self { path, memory })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The committed in-memory state.
    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Get a committed record by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Record> {
        self.memory.get(identifier)
    }

    /// All committed records.
    pub fn records(&self) -> &[Record] {
        self.memory.records()
    }

    /// Stage an insert, replacing any record with the same identifier.
    pub fn upsert(&mut self, record: Record) {
        self.memory.upsert(record);
    }

    /// Stage removal of the record with the given identifier.
    pub fn remove(&mut self, identifier: &str) -> Option<Record> {
        self.memory.remove(identifier)
    }

    fn write_snapshot(&self) -> Result<()> {
        let json = self.memory.staged_snapshot().to_json_pretty()?;
        let tmp = self.path.with_extension("json.tmp");

        let io_err =
            |err: std::io::Error| Error::Commit(format!("{}: {}", self.path.display(), err));
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        Ok(())
    }
}

impl LocalStore for FileStore {
    fn find_by_identifiers(
        &mut self,
        identifiers: &BTreeSet<RecordId>,
    ) -> Result<Vec<&mut Record>> {
        self.memory.find_by_identifiers(identifiers)
    }

    fn create(&mut self, representation: &RemoteRepresentation) -> Result<&mut Record> {
        self.memory.create(representation)
    }

    fn commit(&mut self) -> Result<()> {
        self.write_snapshot()?;
        self.memory.commit()?;
        tracing::debug!(
            path = %self.path.display(),
            records = self.memory.len(),
            "Committed journal"
        );
        Ok(())
    }

    fn rollback(&mut self) {
        self.memory.rollback();
    }
}
