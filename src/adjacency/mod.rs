//! Adjacency lookup
//!
//! Neighbors are arithmetic: `previous` has id `id - 1` and `next` has id
//! `id + 1`, wherever they sit in storage order. A missing neighbor is
//! `None`, serialized as `null`.

use serde::Serialize;

use crate::core::{DexError, DexResult};
use crate::record::Record;

/// A record with its numeric neighbors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjacent {
    #[serde(rename = "pokemon")]
    pub record: Record,
    #[serde(rename = "previousPokemon")]
    pub previous: Option<Record>,
    #[serde(rename = "nextPokemon")]
    pub next: Option<Record>,
}

/// Resolves `id` and its neighbors.
///
/// # Errors
///
/// `NotFound` if no record has `id`.
pub fn lookup(records: &[Record], id: u64) -> DexResult<Adjacent> {
    let record = find(records, Some(id)).ok_or_else(|| DexError::not_found(id.to_string()))?;

    Ok(Adjacent {
        record,
        previous: find(records, id.checked_sub(1)),
        next: find(records, id.checked_add(1)),
    })
}

fn find(records: &[Record], id: Option<u64>) -> Option<Record> {
    let id = id?;
    records.iter().find(|r| r.id == id).cloned()
}
