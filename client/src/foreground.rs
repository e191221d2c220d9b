//! Single-threaded delivery of completion callbacks.
//!
//! Background sync work never runs user callbacks itself. It posts them to a
//! [`Foreground`] queue, and whoever owns the queue runs them one at a time
//! on its own task, in the order they were posted.

use crate::error::SyncResult;
use tokio::sync::mpsc;

/// A completion callback for a dispatched sync operation.
pub type Completion<T> = Box<dyn FnOnce(SyncResult<T>) + Send + 'static>;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// The completion used when a caller does not supply one.
pub fn no_op_completion<T>(_result: SyncResult<T>) {}

/// Create a connected handle/queue pair.
pub fn channel() -> (ForegroundHandle, Foreground) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ForegroundHandle { sender }, Foreground { receiver })
}

/// Posts completions onto the foreground queue.
#[derive(Debug, Clone)]
pub struct ForegroundHandle {
    sender: mpsc::UnboundedSender<Job>,
}

impl ForegroundHandle {
    /// Queue `completion` to be called with `result`.
    ///
    /// If the queue has been dropped the completion is discarded.
    pub fn deliver<T>(&self, completion: Completion<T>, result: SyncResult<T>)
    where
        T: Send + 'static,
    {
        if self
            .sender
            .send(Box::new(move || completion(result)))
            .is_err()
        {
            tracing::debug!("Foreground queue closed, dropping completion");
        }
    }
}

/// The consuming end: runs queued completions.
#[derive(Debug)]
pub struct Foreground {
    receiver: mpsc::UnboundedReceiver<Job>,
}

impl Foreground {
    /// Run completions until every handle has been dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.receiver.recv().await {
            job();
        }
    }

    /// Wait for the next completion and run it.
    ///
    /// Returns `false` once every handle has been dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.receiver.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run every completion already queued without waiting.
    ///
    /// Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }
}
