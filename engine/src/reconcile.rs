//! Reconciliation of a fetched remote collection into local storage.
//!
//! The remote side always wins: every field of a matched local record is
//! overwritten from its remote representation. Pull never deletes.
//!
//! # Algorithm
//!
//! 1. Key every representation that carries an identifier into a working set
//! 2. Look up all local records for those identifiers in one batch
//! 3. Overwrite each match in place and drop it from the working set
//! 4. Create a record for everything left in the working set
//! 5. Commit creates and updates as a single batch

use crate::{error::Result, Error, LocalStore, RecordId, RemoteCollection, RemoteRepresentation};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Outcome of merging a remote collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    /// Records created because no local match existed
    pub created: Vec<RecordId>,
    /// Existing records whose content changed
    pub updated: Vec<RecordId>,
    /// Existing records already equal to their remote version
    pub unchanged: Vec<RecordId>,
    /// Remote representations ignored for lacking an identifier
    pub skipped: usize,
}

impl MergeReport {
    /// Number of records created or updated.
    pub fn changes(&self) -> usize {
        self.created.len() + self.updated.len()
    }

    /// Whether the merge left local content as it was.
    pub fn is_noop(&self) -> bool {
        self.changes() == 0
    }
}

/// Merge `collection` into `store` and commit.
///
/// On any store failure the staged changes are rolled back; commit failures
/// surface as [`Error::Commit`].
pub fn merge_remote<S>(store: &mut S, collection: RemoteCollection) -> Result<MergeReport>
where
    S: LocalStore + ?Sized,
{
    let (remaining, skipped) = working_set(collection);

    let mut report = match apply(store, remaining) {
        Ok(report) => report,
        Err(err) => {
            store.rollback();
            return Err(err);
        }
    };
    report.skipped = skipped;

    if let Err(err) = store.commit() {
        store.rollback();
        return Err(match err {
            Error::Commit(_) => err,
            other => Error::Commit(other.to_string()),
        });
    }

    Ok(report)
}

/// Build the identifier-keyed working set, counting representations without one.
fn working_set(
    collection: RemoteCollection,
) -> (HashMap<RecordId, RemoteRepresentation>, usize) {
    let mut remaining = HashMap::with_capacity(collection.len());
    let mut skipped = 0;

    for representation in collection.into_representations() {
        match representation.identifier() {
            Some(id) => {
                remaining.insert(id.to_string(), representation);
            }
            None => skipped += 1,
        }
    }

    (remaining, skipped)
}

fn apply<S>(
    store: &mut S,
    mut remaining: HashMap<RecordId, RemoteRepresentation>,
) -> Result<MergeReport>
where
    S: LocalStore + ?Sized,
{
    let mut report = MergeReport::default();
    let identifiers: BTreeSet<RecordId> = remaining.keys().cloned().collect();

    for record in store.find_by_identifiers(&identifiers)? {
        let Some(id) = record.identifier().map(str::to_string) else {
            continue;
        };
        // A second local record with an already-matched identifier is left alone
        let Some(representation) = remaining.remove(&id) else {
            continue;
        };

        if record.apply_representation(&representation) {
            report.updated.push(id);
        } else {
            report.unchanged.push(id);
        }
    }

    let mut creations: Vec<_> = remaining.into_iter().collect();
    creations.sort_by(|a, b| a.0.cmp(&b.0));

    for (id, representation) in creations {
        store.create(&representation)?;
        report.created.push(id);
    }

    report.updated.sort();
    report.unchanged.sort();

    Ok(report)
}
