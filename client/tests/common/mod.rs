//! Shared helpers for client integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use journal_engine::{Error, LocalStore, MemoryStore, Mood, Record, RecordId, RemoteRepresentation};
use journal_sync::{RemoteEndpoint, RemoteTransport, TransportError, TransportResult};
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;

pub const ROOT: &str = "https://journal.test/entries";

pub fn endpoint() -> RemoteEndpoint {
    RemoteEndpoint::parse(ROOT).unwrap()
}

/// Fixed timestamp `minutes` after a reference instant.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

/// Test helper to create a local record.
pub fn record(id: &str, title: &str, minutes: i64) -> Record {
    Record {
        identifier: Some(id.to_string()),
        title: Some(title.to_string()),
        body_text: format!("{title} body"),
        timestamp: Some(at(minutes)),
        mood: Mood::Content,
    }
}

/// Wire document matching [`record`].
pub fn document(id: &str, title: &str, minutes: i64) -> Value {
    json!({
        "identifier": id,
        "title": title,
        "bodyText": format!("{title} body"),
        "timestamp": at(minutes).to_rfc3339(),
        "mood": "content",
    })
}

/// A request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get(String),
    Put(String, Value),
    Delete(String),
}

/// Scripted in-memory transport that records every request.
pub struct MockTransport {
    get_response: Mutex<TransportResult<Vec<u8>>>,
    put_response: Mutex<TransportResult<()>>,
    delete_response: Mutex<TransportResult<()>>,
    delay: Duration,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    /// A transport whose collection GET answers with `body`.
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            get_response: Mutex::new(Ok(body.into())),
            put_response: Mutex::new(Ok(())),
            delete_response: Mutex::new(Ok(())),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A transport serving `collection` as the collection body.
    pub fn serving(collection: Value) -> Self {
        Self::new(serde_json::to_vec(&collection).unwrap())
    }

    /// Hold every GET for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_get_response(&self, response: TransportResult<Vec<u8>>) {
        *self.get_response.lock().unwrap() = response;
    }

    pub fn set_put_response(&self, response: TransportResult<()>) {
        *self.put_response.lock().unwrap() = response;
    }

    pub fn set_delete_response(&self, response: TransportResult<()>) {
        *self.delete_response.lock().unwrap() = response;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Get(_)))
            .count()
    }

    fn record_call(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RemoteTransport for MockTransport {
    async fn get(&self, url: &Url) -> TransportResult<Vec<u8>> {
        self.record_call(Call::Get(url.to_string()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.get_response.lock().unwrap().clone()
    }

    async fn put(&self, url: &Url, body: Vec<u8>) -> TransportResult<()> {
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        self.record_call(Call::Put(url.to_string(), value));
        self.put_response.lock().unwrap().clone()
    }

    async fn delete(&self, url: &Url) -> TransportResult<()> {
        self.record_call(Call::Delete(url.to_string()));
        self.delete_response.lock().unwrap().clone()
    }
}

pub fn unavailable() -> TransportError {
    TransportError::status(503, "Service Unavailable")
}

/// Memory store whose commit always fails.
#[derive(Default)]
pub struct FailingCommitStore {
    pub inner: MemoryStore,
}

impl LocalStore for FailingCommitStore {
    fn find_by_identifiers(
        &mut self,
        identifiers: &BTreeSet<RecordId>,
    ) -> journal_engine::Result<Vec<&mut Record>> {
        self.inner.find_by_identifiers(identifiers)
    }

    fn create(
        &mut self,
        representation: &RemoteRepresentation,
    ) -> journal_engine::Result<&mut Record> {
        self.inner.create(representation)
    }

    fn commit(&mut self) -> journal_engine::Result<()> {
        Err(Error::Store("disk full".into()))
    }

    fn rollback(&mut self) {
        self.inner.rollback();
    }
}
