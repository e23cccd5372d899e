//! Insert validation
//!
//! Rules, checked in this order:
//! - `id`, `name` and `imageUrl` must be present
//! - at most two type entries
//! - at least one non-empty type entry
//! - every normalized type belongs to the enumeration
//! - neither the id nor the normalized name is already taken
//!
//! Validation is pure: it reads a snapshot and returns the normalized
//! record. Appending and persisting is the caller's job.

use crate::core::{DexError, DexResult};
use crate::record::{CollectionDocument, CreatureType, Record};

use super::candidate::CandidateRecord;

/// Maximum number of type entries a record may carry
pub const MAX_TYPES: usize = 2;

/// Validates candidates against a collection snapshot.
pub struct RecordValidator<'a> {
    snapshot: &'a CollectionDocument,
}

impl<'a> RecordValidator<'a> {
    pub fn new(snapshot: &'a CollectionDocument) -> Self {
        Self { snapshot }
    }

    /// Validates and normalizes a candidate for insertion.
    ///
    /// # Errors
    ///
    /// - `MissingField` if `id`, `name` or `imageUrl` is absent
    /// - `TooManyTypes` for three or more type entries
    /// - `MissingType` if no type entry is non-empty
    /// - `InvalidType` for a type outside the enumeration
    /// - `DuplicateRecord` if the id or the normalized name collides
    pub fn validate_insert(&self, candidate: &CandidateRecord) -> DexResult<Record> {
        let id = candidate.id.ok_or_else(|| DexError::missing_field("id"))?;
        let name = candidate
            .name
            .as_deref()
            .ok_or_else(|| DexError::missing_field("name"))?;
        let image_url = candidate
            .image_url
            .as_deref()
            .ok_or_else(|| DexError::missing_field("imageUrl"))?;

        if candidate.types.len() > MAX_TYPES {
            return Err(DexError::TooManyTypes(candidate.types.len()));
        }

        let types = normalize_types(&candidate.types);
        if types.is_empty() {
            return Err(DexError::MissingType);
        }

        if let Some(bad) = types.iter().find(|t| CreatureType::from_tag(t).is_none()) {
            return Err(DexError::InvalidType(bad.clone()));
        }

        let name = name.trim().to_lowercase();

        if let Some(existing) = self
            .snapshot
            .data
            .iter()
            .find(|r| r.id == id || r.normalized_name() == name)
        {
            let reason = if existing.id == id {
                format!("id {}", id)
            } else {
                format!("name '{}'", name)
            };
            return Err(DexError::DuplicateRecord(reason));
        }

        Ok(Record::new(id, name, types, image_url))
    }
}

/// Trims, lower-cases and deduplicates type entries, dropping empty ones.
/// First occurrence wins.
pub fn normalize_types(raw: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        let tag = entry.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
