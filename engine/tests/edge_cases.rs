//! Edge case tests for journal-engine
//!
//! These tests cover boundary conditions and unusual inputs.

use journal_engine::{
    merge_remote, Error, JournalSnapshot, MemoryStore, Mood, Record, RemoteCollection,
    RemoteRepresentation,
};

fn document(id: &str, title: &str) -> String {
    serde_json::json!({
        "identifier": id,
        "title": title,
        "bodyText": "",
        "timestamp": "2024-02-01T00:00:00Z",
        "mood": "neutral"
    })
    .to_string()
}

fn collection_body(documents: &[(&str, String)]) -> Vec<u8> {
    let fields: Vec<String> = documents
        .iter()
        .map(|(key, doc)| format!("{}:{}", serde_json::to_string(key).unwrap(), doc))
        .collect();
    format!("{{{}}}", fields.join(",")).into_bytes()
}

// ============================================================================
// String Edge Cases
// ============================================================================

#[test]
fn empty_string_fields() {
    let body = collection_body(&[("k", document("e1", ""))]);
    let mut store = MemoryStore::new();

    merge_remote(&mut store, RemoteCollection::decode(&body).unwrap()).unwrap();

    let record = store.get("e1").unwrap();
    assert_eq!(record.title.as_deref(), Some(""));
    assert_eq!(record.body_text, "");
}

#[test]
fn unicode_strings() {
    let titles = vec![
        "日本語テスト",
        "Привет мир",
        "مرحبا بالعالم",
        "🎉🚀💯",
        "Hello\nWorld\tTab",
        "Null\0Test",
    ];

    let documents: Vec<(String, String)> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| (format!("k{i}"), document(&format!("e{i}"), title)))
        .collect();
    let borrowed: Vec<(&str, String)> = documents
        .iter()
        .map(|(k, d)| (k.as_str(), d.clone()))
        .collect();

    let mut store = MemoryStore::new();
    let collection = RemoteCollection::decode(&collection_body(&borrowed)).unwrap();
    merge_remote(&mut store, collection).unwrap();

    for (i, title) in titles.iter().enumerate() {
        let record = store.get(&format!("e{i}")).unwrap();
        assert_eq!(record.title.as_deref(), Some(*title), "Failed for: {}", title);
    }
}

#[test]
fn unicode_identifiers() {
    let body = collection_body(&[("k", document("日記-1", "t"))]);
    let mut store = MemoryStore::new();

    merge_remote(&mut store, RemoteCollection::decode(&body).unwrap()).unwrap();
    assert!(store.get("日記-1").is_some());
}

#[test]
fn very_long_strings() {
    // 1MB body
    let long_string = "x".repeat(1024 * 1024);
    let representation = RemoteRepresentation {
        identifier: Some("long".into()),
        title: "t".into(),
        body_text: long_string,
        timestamp: chrono::Utc::now(),
        mood: Mood::Neutral,
    };
    let collection: RemoteCollection = std::iter::once(representation).collect();
    let body = collection.encode().unwrap();

    let mut store = MemoryStore::new();
    merge_remote(&mut store, RemoteCollection::decode(&body).unwrap()).unwrap();

    assert_eq!(store.get("long").unwrap().body_text.len(), 1024 * 1024);
}

// ============================================================================
// Wire Format Edge Cases
// ============================================================================

#[test]
fn timestamp_offsets_normalize_to_utc() {
    let body = br#"{"k": {"identifier": "e", "title": "t", "timestamp": "2024-06-01T09:00:00+09:00"}}"#;
    let mut store = MemoryStore::new();

    merge_remote(&mut store, RemoteCollection::decode(body).unwrap()).unwrap();

    let timestamp = store.get("e").unwrap().timestamp.unwrap();
    assert_eq!(timestamp.to_rfc3339(), "2024-06-01T00:00:00+00:00");
}

#[test]
fn unknown_mood_survives_merge_and_encode() {
    let body = br#"{"k": {"identifier": "e", "title": "t", "timestamp": "2024-06-01T00:00:00Z", "mood": "nostalgic"}}"#;
    let mut store = MemoryStore::new();

    merge_remote(&mut store, RemoteCollection::decode(body).unwrap()).unwrap();

    let record = store.get("e").unwrap();
    assert_eq!(record.mood, Mood::Other("nostalgic".into()));

    let outbound = RemoteRepresentation::try_from(record).unwrap().encode().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&outbound).unwrap();
    assert_eq!(value["mood"], "nostalgic");
}

#[test]
fn extra_remote_fields_are_ignored() {
    let body = br#"{"k": {"identifier": "e", "title": "t", "timestamp": "2024-06-01T00:00:00Z", "weather": "rain"}}"#;
    assert_eq!(RemoteCollection::decode(body).unwrap().len(), 1);
}

#[test]
fn non_object_collection_is_decode_error() {
    let bodies: [&[u8]; 4] = [b"[]", b"42", b"\"entries\"", b""];
    for body in bodies {
        assert!(
            matches!(RemoteCollection::decode(body), Err(Error::Decode(_))),
            "expected decode failure for {:?}",
            String::from_utf8_lossy(body)
        );
    }
}

#[test]
fn map_key_does_not_override_identifier() {
    let body = collection_body(&[("not-the-id", document("real-id", "t"))]);
    let mut store = MemoryStore::new();

    let report = merge_remote(&mut store, RemoteCollection::decode(&body).unwrap()).unwrap();

    assert_eq!(report.created, vec!["real-id".to_string()]);
    assert!(store.get("not-the-id").is_none());
}

#[test]
fn same_identifier_under_two_keys_creates_one_record() {
    let body = collection_body(&[
        ("a", document("dup", "first")),
        ("b", document("dup", "second")),
    ]);
    let mut store = MemoryStore::new();

    let report = merge_remote(&mut store, RemoteCollection::decode(&body).unwrap()).unwrap();

    assert_eq!(report.created, vec!["dup".to_string()]);
    assert_eq!(store.len(), 1);
    // Keys iterate in order, so the later key wins
    assert_eq!(store.get("dup").unwrap().title.as_deref(), Some("second"));
}

// ============================================================================
// Scale and Persistence
// ============================================================================

#[test]
fn many_records_merge() {
    let existing: Vec<Record> = (0..500)
        .map(|i| {
            let mut record = Record::new(format!("old {i}"), "", Mood::Neutral);
            record.identifier = Some(format!("e{i:04}"));
            record
        })
        .collect();
    let mut store = MemoryStore::with_records(existing);

    let collection: RemoteCollection = (250..1000)
        .map(|i| RemoteRepresentation {
            identifier: Some(format!("e{i:04}")),
            title: format!("new {i}"),
            body_text: String::new(),
            timestamp: chrono::Utc::now(),
            mood: Mood::Happy,
        })
        .collect();

    let report = merge_remote(&mut store, collection).unwrap();

    assert_eq!(report.updated.len(), 250);
    assert_eq!(report.created.len(), 500);
    assert_eq!(store.len(), 1000);
    assert_eq!(store.get("e0000").unwrap().title.as_deref(), Some("old 0"));
    assert_eq!(store.get("e0999").unwrap().title.as_deref(), Some("new 999"));
}

#[test]
fn snapshot_after_merge_restores_identically() {
    let body = collection_body(&[("a", document("a", "A")), ("b", document("b", "B"))]);
    let mut store = MemoryStore::new();
    merge_remote(&mut store, RemoteCollection::decode(&body).unwrap()).unwrap();

    let json = store.snapshot().to_json().unwrap();
    let restored = MemoryStore::from_snapshot(JournalSnapshot::from_json(&json).unwrap());

    assert_eq!(restored.records(), store.snapshot().records.as_slice());
}
