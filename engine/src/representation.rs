//! Wire representation of journal records.
//!
//! The remote store is a keyed document collection: the collection body is a
//! JSON object whose field names are document keys and whose values each
//! decode independently into a [`RemoteRepresentation`]. Single documents
//! (PUT bodies) use the same representation on its own.

use crate::{error::Result, Error, Mood, Record, RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire-format projection of a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRepresentation {
    /// Absent or empty identifiers make a representation unusable for merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<RecordId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_text: String,
    /// RFC 3339 on the wire
    pub timestamp: Timestamp,
    #[serde(default)]
    pub mood: Mood,
}

impl RemoteRepresentation {
    /// The identifier, treating an empty string as absent.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|id| !id.is_empty())
    }

    /// Encode as a single JSON document.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Encode(e.to_string()))
    }

    /// Decode a single JSON document.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))
    }
}

impl TryFrom<&Record> for RemoteRepresentation {
    type Error = Error;

    fn try_from(record: &Record) -> Result<Self> {
        let identifier = record.identifier().ok_or(Error::MissingIdentifier)?;
        let title = record
            .title
            .clone()
            .ok_or(Error::NoRepresentation { field: "title" })?;
        let timestamp = record
            .timestamp
            .ok_or(Error::NoRepresentation { field: "timestamp" })?;

        Ok(Self {
            identifier: Some(identifier.to_string()),
            title,
            body_text: record.body_text.clone(),
            timestamp,
            mood: record.mood.clone(),
        })
    }
}

/// A fully decoded remote collection, keyed by document key.
///
/// Uses BTreeMap so iteration and encoding are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RemoteCollection {
    documents: BTreeMap<String, RemoteRepresentation>,
}

impl RemoteCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a collection body.
    ///
    /// A JSON `null` body is an empty collection. Any document that fails to
    /// decode fails the whole collection.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let documents: Option<BTreeMap<String, RemoteRepresentation>> =
            serde_json::from_slice(bytes).map_err(|e| Error::Decode(e.to_string()))?;

        Ok(Self {
            documents: documents.unwrap_or_default(),
        })
    }

    /// Encode the collection body.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Encode(e.to_string()))
    }

    /// Insert a document under the given key.
    pub fn insert(&mut self, key: impl Into<String>, representation: RemoteRepresentation) {
        self.documents.insert(key.into(), representation);
    }

    /// Get a document by key.
    pub fn get(&self, key: &str) -> Option<&RemoteRepresentation> {
        self.documents.get(key)
    }

    /// Number of documents, including ones without identifiers.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the collection has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Iterate over the representations in key order.
    pub fn representations(&self) -> impl Iterator<Item = &RemoteRepresentation> {
        self.documents.values()
    }

    /// Consume the collection, yielding representations in key order.
    pub fn into_representations(self) -> impl Iterator<Item = RemoteRepresentation> {
        self.documents.into_values()
    }
}

impl FromIterator<RemoteRepresentation> for RemoteCollection {
    /// Key each representation by its identifier, or by position if it has none.
    fn from_iter<I: IntoIterator<Item = RemoteRepresentation>>(iter: I) -> Self {
        let mut collection = Self::new();
        for (index, representation) in iter.into_iter().enumerate() {
            let key = representation
                .identifier()
                .map(str::to_string)
                .unwrap_or_else(|| format!("~{index}"));
            collection.insert(key, representation);
        }
        collection
    }
}
