//! Record Store Invariant Tests
//!
//! Tests for the persisted collection document:
//! - totalRecords always equals the length of data
//! - Failed mutations leave the document untouched
//! - Unknown top-level keys survive rewrites
//! - Ids and normalized names stay unique

use std::fs;
use std::sync::Arc;
use std::thread;

use pokedex::core::ErrorKind;
use pokedex::record::{CollectionDocument, Record};
use pokedex::schema::CandidateRecord;
use pokedex::storage::{FileStorage, MemoryStorage, RecordStore};
use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_file_store() -> (TempDir, RecordStore) {
    let tmp = TempDir::new().unwrap();
    let store = RecordStore::new(FileStorage::new(tmp.path().join("pokemons.json")));
    store.init().unwrap();
    (tmp, store)
}

fn candidate(id: u64, name: &str, types: &[&str]) -> CandidateRecord {
    CandidateRecord::new(id, name, types, format!("http://localhost:5000/images/{}.png", id))
}

fn read_json(tmp: &TempDir) -> Value {
    let text = fs::read_to_string(tmp.path().join("pokemons.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

// =============================================================================
// Count Invariant Tests
// =============================================================================

/// The stored count tracks every insert and delete.
#[test]
fn test_total_tracks_inserts_and_deletes() {
    let (tmp, store) = setup_file_store();

    store.insert(&candidate(1, "Bulbasaur", &["grass", "poison"])).unwrap();
    store.insert(&candidate(2, "Ivysaur", &["grass"])).unwrap();
    store.insert(&candidate(4, "Charmander", &["fire"])).unwrap();
    assert_eq!(read_json(&tmp)["totalRecords"], 3);

    store.delete(2).unwrap();
    let json = read_json(&tmp);
    assert_eq!(json["totalRecords"], 2);
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

/// A stale count on disk is corrected by the next write.
#[test]
fn test_stale_count_is_recomputed() {
    let storage = MemoryStorage::with_text(
        "stale",
        r#"{"data":[{"id":1,"name":"bulbasaur","types":["grass"],"imageUrl":"u"}],"totalRecords":40}"#,
    );
    let store = RecordStore::new(storage);

    store.insert(&candidate(2, "Ivysaur", &["grass"])).unwrap();
    assert_eq!(store.load().unwrap().total_records, 2);
}

/// Save then load yields the same ordered records and a fresh count.
#[test]
fn test_save_load_round_trip_preserves_order() {
    let (_tmp, store) = setup_file_store();

    let records: Vec<Record> = [3u64, 1, 2]
        .iter()
        .map(|id| {
            Record::new(
                *id,
                format!("creature-{}", id),
                vec!["normal".to_string()],
                format!("http://localhost:5000/images/{}.png", id),
            )
        })
        .collect();
    let mut doc = CollectionDocument::new(records.clone());
    doc.total_records = 99;

    store.save(&mut doc).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.data, records);
    assert_eq!(loaded.total_records, 3);
    assert_eq!(loaded.total_records, loaded.data.len());
}

// =============================================================================
// Atomicity Tests
// =============================================================================

/// A rejected insert writes nothing.
#[test]
fn test_rejected_insert_leaves_file_unchanged() {
    let (tmp, store) = setup_file_store();
    store.insert(&candidate(1, "Bulbasaur", &["grass"])).unwrap();
    let before = fs::read_to_string(tmp.path().join("pokemons.json")).unwrap();

    let err = store.insert(&candidate(2, "bulbasaur", &["grass"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateRecord);

    let err = store.insert(&candidate(3, "Venusaur", &["plant"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidType);

    let after = fs::read_to_string(tmp.path().join("pokemons.json")).unwrap();
    assert_eq!(before, after);
}

/// Deleting an absent id writes nothing.
#[test]
fn test_delete_missing_leaves_file_unchanged() {
    let (tmp, store) = setup_file_store();
    store.insert(&candidate(1, "Bulbasaur", &["grass"])).unwrap();
    let before = fs::read_to_string(tmp.path().join("pokemons.json")).unwrap();

    let err = store.delete(99).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let after = fs::read_to_string(tmp.path().join("pokemons.json")).unwrap();
    assert_eq!(before, after);
}

/// No temp file lingers after a successful write.
#[test]
fn test_no_temp_file_left_behind() {
    let (tmp, store) = setup_file_store();
    store.insert(&candidate(1, "Bulbasaur", &["grass"])).unwrap();

    let names: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["pokemons.json".to_string()]);
}

/// A failed write surfaces as a retryable storage error.
#[test]
fn test_write_failure_is_storage_error() {
    let storage = Arc::new(MemoryStorage::with_text("failing", r#"{"data":[],"totalRecords":0}"#));
    let store = RecordStore::from_arc(storage.clone());
    storage.set_fail_writes(true);

    let err = store.insert(&candidate(1, "Bulbasaur", &["grass"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert!(err.is_retryable());
    assert_eq!(storage.snapshot().unwrap(), r#"{"data":[],"totalRecords":0}"#);
}

// =============================================================================
// Document Shape Tests
// =============================================================================

/// Keys this service does not own are carried through rewrites.
#[test]
fn test_unknown_keys_survive_rewrite() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("pokemons.json");
    fs::write(&path, r#"{"data":[],"totalPokemons":0,"source":"kaggle"}"#).unwrap();

    let store = RecordStore::open_file(&path);
    store.insert(&candidate(1, "Bulbasaur", &["grass"])).unwrap();

    let json = read_json(&tmp);
    assert_eq!(json["source"], "kaggle");
    assert_eq!(json["totalRecords"], 1);
    assert!(json.get("totalPokemons").is_none());
}

/// Inserted records are stored normalized.
#[test]
fn test_inserted_record_is_normalized() {
    let (tmp, store) = setup_file_store();
    store.insert(&candidate(7, "  Squirtle ", &["Water", "water"])).unwrap();

    let json = read_json(&tmp);
    assert_eq!(json["data"][0]["name"], "squirtle");
    assert_eq!(json["data"][0]["types"], serde_json::json!(["water"]));
    assert_eq!(json["data"][0]["imageUrl"], "http://localhost:5000/images/7.png");
}

/// An unreadable document is a storage error, not an empty collection.
#[test]
fn test_corrupt_document_is_storage_error() {
    let store = RecordStore::new(MemoryStorage::with_text("corrupt", "{ not json"));
    assert_eq!(store.load().unwrap_err().kind(), ErrorKind::Storage);
}

// =============================================================================
// Concurrency Tests
// =============================================================================

/// Concurrent inserts through separate handles never lose an update.
#[test]
fn test_concurrent_inserts_are_serialized() {
    let (tmp, _store) = setup_file_store();
    let path = tmp.path().join("pokemons.json");

    let handles: Vec<_> = (1..=16u64)
        .map(|id| {
            let path = path.clone();
            thread::spawn(move || {
                let store = RecordStore::open_file(&path);
                store
                    .insert(&candidate(id, &format!("creature-{}", id), &["normal"]))
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let json = read_json(&tmp);
    assert_eq!(json["totalRecords"], 16);
    assert_eq!(json["data"].as_array().unwrap().len(), 16);
}
