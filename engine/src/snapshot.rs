//! Snapshot types for persisting and restoring local journal state.
//!
//! Snapshots are the bridge between the in-memory store and persistent storage.
//! They are designed for deterministic serialization to ensure consistency.

use crate::{error::Result, Error, Record};
use serde::{Deserialize, Serialize};

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time snapshot of the local journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalSnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// Records sorted by identifier; records without one come first
    pub records: Vec<Record>,
}

impl JournalSnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            records: Vec::new(),
        }
    }

    /// Create a snapshot of the given records in deterministic order.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut records: Vec<Record> = records.into_iter().collect();
        // Stable sort keeps anonymous drafts in their original relative order
        records.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            records,
        }
    }

    /// Count records in the snapshot.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Serialize to JSON with deterministic ordering.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Serialize to pretty JSON with deterministic ordering.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))?;

        // Validate format version
        if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }
}

impl Default for JournalSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
