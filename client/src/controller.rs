//! Sync controller - keeps the local journal consistent with the remote store.
//!
//! The controller owns three operations:
//! - pull-and-merge: fetch the whole remote collection and reconcile it into
//!   local storage (remote wins, pull never deletes)
//! - push: upsert one record remotely
//! - delete: remove one record remotely
//!
//! Each has an awaitable form returning a [`SyncResult`] and a `spawn_*` form
//! that runs in the background and reports through a [`Completion`] on the
//! [`Foreground`] queue. Constructing a controller performs no I/O; owners
//! call [`SyncController::initialize`] for the first pull.

use crate::config::RemoteEndpoint;
use crate::error::{SyncError, SyncResult};
use crate::foreground::{self, no_op_completion, Completion, Foreground, ForegroundHandle};
use crate::transport::RemoteTransport;
use futures::future::{BoxFuture, FutureExt, Shared};
use journal_engine::{
    merge_remote, LocalStore, MergeReport, Record, RemoteCollection, RemoteRepresentation,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

type PullFuture = Shared<BoxFuture<'static, SyncResult<MergeReport>>>;

/// Orchestrates fetch, merge, push and delete against one remote collection.
pub struct SyncController<T, S> {
    inner: Arc<Inner<T, S>>,
}

struct Inner<T, S> {
    endpoint: RemoteEndpoint,
    transport: T,
    store: Arc<Mutex<S>>,
    /// Pull currently running, joined by overlapping callers
    in_flight: Mutex<Option<PullFuture>>,
    foreground: ForegroundHandle,
}

impl<T, S> Clone for SyncController<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> SyncController<T, S>
where
    T: RemoteTransport,
    S: LocalStore + Send + 'static,
{
    /// Create a controller and the foreground queue its completions go to.
    pub fn new(endpoint: RemoteEndpoint, transport: T, store: S) -> (Self, Foreground) {
        let (foreground, queue) = foreground::channel();
        let controller = Self {
            inner: Arc::new(Inner {
                endpoint,
                transport,
                store: Arc::new(Mutex::new(store)),
                in_flight: Mutex::new(None),
                foreground,
            }),
        };
        (controller, queue)
    }

    /// The remote collection this controller syncs with.
    pub fn endpoint(&self) -> &RemoteEndpoint {
        &self.inner.endpoint
    }

    /// The transport requests go through.
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Shared handle to local storage.
    ///
    /// Merges hold this lock for their whole lookup-update-commit cycle.
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.inner.store)
    }

    /// Initial pull-and-merge, making local storage reflect the remote state.
    pub async fn initialize(&self) -> SyncResult<MergeReport> {
        tracing::info!(endpoint = %self.inner.endpoint.root(), "Initial sync");
        self.pull_and_merge().await
    }

    /// Fetch the whole remote collection and merge it into local storage.
    ///
    /// If a pull is already running this call joins it and returns its result.
    pub async fn pull_and_merge(&self) -> SyncResult<MergeReport> {
        let pull = {
            let mut slot = self.inner.in_flight.lock().await;
            match slot.as_ref() {
                Some(pull) => {
                    tracing::debug!("Joining in-flight pull");
                    pull.clone()
                }
                None => {
                    let pull = self.start_pull();
                    *slot = Some(pull.clone());
                    pull
                }
            }
        };

        pull.await
    }

    /// Upsert one record in the remote store.
    ///
    /// Local storage is not touched.
    pub async fn push(&self, record: &Record) -> SyncResult<()> {
        let representation = RemoteRepresentation::try_from(record)?;
        let identifier = record.identifier().ok_or(SyncError::MissingIdentifier)?;
        let body = representation.encode()?;

        let url = self.inner.endpoint.document_url(identifier);
        self.inner
            .transport
            .put(&url, body)
            .await
            .map_err(|err| {
                tracing::warn!(identifier, error = %err, "Push failed");
                SyncError::from(err)
            })?;

        tracing::debug!(identifier, "Pushed record");
        Ok(())
    }

    /// Remove one record from the remote store.
    ///
    /// Local storage is not touched; the caller removes the local record.
    pub async fn delete(&self, record: &Record) -> SyncResult<()> {
        let identifier = record.identifier().ok_or(SyncError::MissingIdentifier)?;

        let url = self.inner.endpoint.document_url(identifier);
        self.inner.transport.delete(&url).await.map_err(|err| {
            tracing::warn!(identifier, error = %err, "Delete failed");
            SyncError::from(err)
        })?;

        tracing::debug!(identifier, "Deleted record");
        Ok(())
    }

    /// Run [`Self::pull_and_merge`] in the background.
    pub fn spawn_pull(&self, completion: Option<Completion<MergeReport>>) -> JoinHandle<()> {
        let this = self.clone();
        let completion =
            completion.unwrap_or_else(|| Box::new(no_op_completion::<MergeReport>));

        tokio::spawn(async move {
            let result = this.pull_and_merge().await;
            this.inner.foreground.deliver(completion, result);
        })
    }

    /// Run [`Self::push`] in the background.
    pub fn spawn_push(
        &self,
        record: Record,
        completion: Option<Completion<()>>,
    ) -> JoinHandle<()> {
        let this = self.clone();
        let completion = completion.unwrap_or_else(|| Box::new(no_op_completion::<()>));

        tokio::spawn(async move {
            let result = this.push(&record).await;
            this.inner.foreground.deliver(completion, result);
        })
    }

    /// Run [`Self::delete`] in the background.
    pub fn spawn_delete(
        &self,
        record: Record,
        completion: Option<Completion<()>>,
    ) -> JoinHandle<()> {
        let this = self.clone();
        let completion = completion.unwrap_or_else(|| Box::new(no_op_completion::<()>));

        tokio::spawn(async move {
            let result = this.delete(&record).await;
            this.inner.foreground.deliver(completion, result);
        })
    }

    fn start_pull(&self) -> PullFuture {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let result = inner.pull_once().await;
            inner.in_flight.lock().await.take();
            result
        });

        async move {
            task.await.unwrap_or_else(|err| {
                Err(SyncError::Storage(format!("pull task failed: {err}")))
            })
        }
        .boxed()
        .shared()
    }
}

impl<T, S> Inner<T, S>
where
    T: RemoteTransport,
    S: LocalStore + Send + 'static,
{
    async fn pull_once(&self) -> SyncResult<MergeReport> {
        let result = self.fetch_and_merge().await;

        match &result {
            Ok(report) => {
                tracing::info!(
                    created = report.created.len(),
                    updated = report.updated.len(),
                    unchanged = report.unchanged.len(),
                    "Pull merged"
                );
                if report.skipped > 0 {
                    tracing::warn!(
                        skipped = report.skipped,
                        "Remote documents without identifier were ignored"
                    );
                }
            }
            Err(err) => tracing::warn!(error = %err, "Pull failed"),
        }

        result
    }

    async fn fetch_and_merge(&self) -> SyncResult<MergeReport> {
        let url = self.endpoint.collection_url();
        let body = self.transport.get(&url).await?;
        if body.is_empty() {
            return Err(SyncError::NoData);
        }

        // All-or-nothing: a bad document fails the pull before storage is touched
        let collection = RemoteCollection::decode(&body)?;
        tracing::debug!(documents = collection.len(), "Decoded remote collection");

        let store = Arc::clone(&self.store);
        let report = tokio::task::spawn_blocking(move || {
            let mut store = store.blocking_lock();
            merge_remote(&mut *store, collection)
        })
        .await
        .map_err(|err| SyncError::Storage(format!("merge task failed: {err}")))??;

        Ok(report)
    }
}
