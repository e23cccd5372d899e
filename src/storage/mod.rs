//! Document storage for the record collection
//!
//! The whole collection lives in one JSON document. Every write replaces
//! the document; there are no incremental updates and no history.
//!
//! # Design Principles
//!
//! - Fresh load at the start of every operation, no cache
//! - `totalRecords` recomputed on every save
//! - Atomic replace on disk (temp file, fsync, rename)
//! - One writer at a time per resource within a process

mod provider;
mod store;

pub use provider::{FileStorage, MemoryStorage, StorageProvider};
pub use store::RecordStore;
