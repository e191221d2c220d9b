//! # Journal Engine
//!
//! Deterministic reconciliation for a locally persisted journal that mirrors
//! a remote keyed-document store.
//!
//! This crate holds the pure logic of journal sync: the record model, the
//! wire representation, and the merge of a freshly fetched remote collection
//! into local storage. Network access lives in the `journal-sync` crate.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same inputs always produce same outputs
//! - **Remote wins**: A pull overwrites every field of a matched record
//! - **Pull never deletes**: Local records absent remotely are left alone
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] is a journal entry: identifier, title, body text, timestamp
//! and [`Mood`]. The identifier is the only link between a local record and
//! its remote document.
//!
//! ### Representations
//!
//! A [`RemoteRepresentation`] is the wire projection of a record. A
//! [`RemoteCollection`] is a whole decoded collection body.
//!
//! ### Reconciliation
//!
//! [`merge_remote`] matches representations to local records by identifier
//! through the [`LocalStore`] seam, updates matches in place, creates the
//! rest, and commits once. The [`MergeReport`] says what happened.
//!
//! ## Quick Start
//!
//! ```rust
//! use journal_engine::{merge_remote, MemoryStore, RemoteCollection};
//!
//! let body = br#"{
//!     "-Nk1": {
//!         "identifier": "entry-1",
//!         "title": "Rainy Tuesday",
//!         "bodyText": "Stayed in and read.",
//!         "timestamp": "2024-02-06T19:30:00Z",
//!         "mood": "content"
//!     }
//! }"#;
//!
//! let collection = RemoteCollection::decode(body).unwrap();
//! let mut store = MemoryStore::new();
//!
//! let report = merge_remote(&mut store, collection).unwrap();
//! assert_eq!(report.created, vec!["entry-1".to_string()]);
//! assert_eq!(store.get("entry-1").unwrap().title.as_deref(), Some("Rainy Tuesday"));
//! ```
//!
//! ## Persistence
//!
//! Use [`MemoryStore::snapshot`] and [`MemoryStore::from_snapshot`] with
//! [`JournalSnapshot`] for persistence. Snapshots serialize to JSON with
//! deterministic ordering.

pub mod error;
pub mod reconcile;
pub mod record;
pub mod representation;
pub mod snapshot;
pub mod store;

// Re-export main types at crate root
pub use error::{Error, Result};
pub use reconcile::{merge_remote, MergeReport};
pub use record::{Mood, Record};
pub use representation::{RemoteCollection, RemoteRepresentation};
pub use snapshot::{JournalSnapshot, SNAPSHOT_FORMAT_VERSION};
pub use store::{LocalStore, MemoryStore};

/// Type aliases for clarity
pub type RecordId = String;
pub type Timestamp = chrono::DateTime<chrono::Utc>;
