//! Record model
//!
//! A collection is an ordered sequence of records in insertion order,
//! persisted as one JSON document.

mod types;

pub use types::{CollectionDocument, CreatureType, Record};
