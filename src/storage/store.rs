//! Record store: the read-modify-write cycle over one document
//!
//! Every operation loads the document fresh; nothing is cached between
//! calls. Mutations hold a process-wide lock keyed by the resource name
//! for the whole load -> validate/mutate -> save cycle, so writers in one
//! process cannot lose each other's updates. Writers in other processes
//! are still last-writer-wins.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::adjacency::{self, Adjacent};
use crate::core::{DexError, DexResult};
use crate::observability::Logger;
use crate::query::{self, QueryParams, QueryResult};
use crate::record::{CollectionDocument, Record};
use crate::schema::{CandidateRecord, RecordValidator};

use super::provider::{FileStorage, StorageProvider};

/// Returns the writer lock shared by every store over `resource`.
fn resource_lock(resource: &str) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<String, Arc<Mutex<()>>>>> = OnceLock::new();

    let mut locks = LOCKS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    locks.entry(resource.to_string()).or_default().clone()
}

/// Loads, validates, mutates and persists the collection document.
#[derive(Clone)]
pub struct RecordStore {
    provider: Arc<dyn StorageProvider>,
    write_lock: Arc<Mutex<()>>,
}

impl RecordStore {
    pub fn new(provider: impl StorageProvider + 'static) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    pub fn from_arc(provider: Arc<dyn StorageProvider>) -> Self {
        let write_lock = resource_lock(&provider.resource_name());
        Self {
            provider,
            write_lock,
        }
    }

    /// Store over a JSON file
    pub fn open_file(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(FileStorage::new(path))
    }

    pub fn resource_name(&self) -> String {
        self.provider.resource_name()
    }

    /// Reads and parses the current document.
    ///
    /// # Errors
    ///
    /// `Storage` if the resource is unreadable or not a valid document.
    pub fn load(&self) -> DexResult<CollectionDocument> {
        let text = self.provider.read_text()?;
        serde_json::from_str(&text).map_err(|e| {
            DexError::storage(format!(
                "{} is not a valid collection document: {}",
                self.provider.resource_name(),
                e
            ))
        })
    }

    /// Recounts and writes the whole document.
    pub fn save(&self, doc: &mut CollectionDocument) -> DexResult<()> {
        doc.recount();
        let text = serde_json::to_string(doc)
            .map_err(|e| DexError::storage(format!("Failed to serialize document: {}", e)))?;

        self.provider.write_text(&text)?;

        let resource = self.provider.resource_name();
        let total = doc.total_records.to_string();
        Logger::trace(
            "DOCUMENT_SAVED",
            &[("resource", resource.as_str()), ("total_records", total.as_str())],
        );
        Ok(())
    }

    /// Writes an empty document unless one already exists.
    ///
    /// Returns `true` when a new document was created.
    pub fn init(&self) -> DexResult<bool> {
        let _guard = self.lock();
        if self.provider.exists() {
            return Ok(false);
        }
        self.save(&mut CollectionDocument::default())?;
        Ok(true)
    }

    /// Validates `candidate` against the current document, appends it and
    /// persists. Returns the normalized record.
    pub fn insert(&self, candidate: &CandidateRecord) -> DexResult<Record> {
        let record = self.mutate(|doc| {
            let record = RecordValidator::new(doc).validate_insert(candidate)?;
            doc.data.push(record.clone());
            Ok(record)
        })?;

        let id = record.id.to_string();
        Logger::info(
            "RECORD_INSERTED",
            &[("id", id.as_str()), ("name", record.name.as_str())],
        );
        Ok(record)
    }

    /// Removes the record with `id` and persists. Returns the removed record.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record has `id`; nothing is written in that case.
    pub fn delete(&self, id: u64) -> DexResult<Record> {
        let removed = self.mutate(|doc| {
            let index = doc
                .position(id)
                .ok_or_else(|| DexError::not_found(id.to_string()))?;
            Ok(doc.data.remove(index))
        })?;

        let id = id.to_string();
        Logger::info("RECORD_DELETED", &[("id", id.as_str())]);
        Ok(removed)
    }

    /// Replaces every record, keeping the document's other top-level keys.
    /// A missing document is created.
    pub fn replace_all(&self, records: Vec<Record>) -> DexResult<CollectionDocument> {
        let _guard = self.lock();
        let mut doc = if self.provider.exists() {
            self.load()?
        } else {
            CollectionDocument::default()
        };
        doc.data = records;
        self.save(&mut doc)?;
        Ok(doc)
    }

    /// Filters and paginates a fresh snapshot.
    pub fn query(&self, params: &QueryParams) -> DexResult<QueryResult> {
        let doc = self.load()?;
        Ok(query::execute(&doc.data, params))
    }

    /// Looks up `id` and its numeric neighbors in a fresh snapshot.
    pub fn lookup(&self, id: u64) -> DexResult<Adjacent> {
        let doc = self.load()?;
        adjacency::lookup(&doc.data, id)
    }

    /// Runs `f` inside the locked load -> mutate -> save cycle. The
    /// document is only written if `f` succeeds.
    fn mutate<T, F>(&self, f: F) -> DexResult<T>
    where
        F: FnOnce(&mut CollectionDocument) -> DexResult<T>,
    {
        let _guard = self.lock();
        let mut doc = self.load()?;
        let out = f(&mut doc)?;
        self.save(&mut doc)?;
        Ok(out)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("resource", &self.provider.resource_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;
    use crate::storage::MemoryStorage;

    fn store(name: &str) -> (Arc<MemoryStorage>, RecordStore) {
        let memory = Arc::new(MemoryStorage::with_text(
            name,
            r#"{"data":[{"id":1,"name":"bulbasaur","types":["grass","poison"],"imageUrl":"u/1"}],"totalRecords":1}"#,
        ));
        let store = RecordStore::from_arc(memory.clone());
        (memory, store)
    }

    #[test]
    fn test_insert_persists_and_recounts() {
        let (_mem, store) = store("insert");
        let record = store
            .insert(&CandidateRecord::new(2, "Ivysaur", &["grass"], "u/2"))
            .unwrap();
        assert_eq!(record.name, "ivysaur");

        let doc = store.load().unwrap();
        assert_eq!(doc.total_records, 2);
        assert_eq!(doc.data.len(), 2);
        assert_eq!(doc.data[1].id, 2);
    }

    #[test]
    fn test_rejected_insert_writes_nothing() {
        let (mem, store) = store("reject");
        let before = mem.snapshot();
        let err = store
            .insert(&CandidateRecord::new(1, "other", &["grass"], "u"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateRecord);
        assert_eq!(mem.snapshot(), before);
    }

    #[test]
    fn test_delete() {
        let (_mem, store) = store("delete");
        assert_eq!(store.delete(9).unwrap_err().kind(), ErrorKind::NotFound);

        let removed = store.delete(1).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(store.load().unwrap().total_records, 0);
    }

    #[test]
    fn test_write_failure_surfaces_as_storage() {
        let (mem, store) = store("fail");
        mem.set_fail_writes(true);
        let err = store
            .insert(&CandidateRecord::new(2, "ivysaur", &["grass"], "u"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_corrupt_document() {
        let store = RecordStore::new(MemoryStorage::with_text("corrupt", "{not json"));
        assert_eq!(store.load().unwrap_err().kind(), ErrorKind::Storage);
    }

    #[test]
    fn test_init_only_once() {
        let store = RecordStore::new(MemoryStorage::new("init"));
        assert!(store.init().unwrap());
        assert!(!store.init().unwrap());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_stores_share_lock_per_resource() {
        let a = RecordStore::new(MemoryStorage::new("shared"));
        let b = RecordStore::new(MemoryStorage::new("shared"));
        let c = RecordStore::new(MemoryStorage::new("separate"));
        assert!(Arc::ptr_eq(&a.write_lock, &b.write_lock));
        assert!(!Arc::ptr_eq(&a.write_lock, &c.write_lock));
    }
}
