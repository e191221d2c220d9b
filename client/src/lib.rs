//! Journal Sync - keeps a local journal consistent with a remote document store.
//!
//! The remote side is a keyed-document HTTP endpoint: the whole collection is
//! read with one GET, single documents are written with PUT and removed with
//! DELETE. [`SyncController`] pulls the collection and merges it into a
//! [`journal_engine::LocalStore`] (remote wins, pull never deletes), and
//! pushes or deletes individual records.
//!
//! # Quick Start
//!
//! ```no_run
//! use journal_sync::{FileStore, HttpTransport, RemoteEndpoint, SyncController};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = RemoteEndpoint::parse("https://journal.example.com/entries")?;
//! let transport = HttpTransport::new(Duration::from_secs(30))?;
//! let store = FileStore::open("journal.json")?;
//!
//! let (controller, _foreground) = SyncController::new(endpoint, transport, store);
//! let report = controller.initialize().await?;
//! println!("{} created, {} updated", report.created.len(), report.updated.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod foreground;
pub mod store;
pub mod transport;

pub use config::{Config, ConfigError, RemoteEndpoint};
pub use controller::SyncController;
pub use error::{SyncError, SyncResult};
pub use foreground::{no_op_completion, Completion, Foreground, ForegroundHandle};
pub use store::FileStore;
pub use transport::{HttpTransport, RemoteTransport, TransportError, TransportResult};
