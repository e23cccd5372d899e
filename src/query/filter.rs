//! # Filter Expressions
//!
//! Query keys resolve once into a closed set of filter kinds.

use crate::core::{DexError, DexResult};
use crate::record::Record;

/// Declared scalar fields usable as equality filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    Id,
    Name,
    ImageUrl,
}

impl ScalarField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "id" => Some(ScalarField::Id),
            "name" => Some(ScalarField::Name),
            "imageUrl" => Some(ScalarField::ImageUrl),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarField::Id => "id",
            ScalarField::Name => "name",
            ScalarField::ImageUrl => "imageUrl",
        }
    }

    /// Field value in the form filters compare against (trimmed, lower-case)
    fn comparable(&self, record: &Record) -> String {
        match self {
            ScalarField::Id => record.id.to_string(),
            ScalarField::Name => record.normalized_name(),
            ScalarField::ImageUrl => record.image_url.trim().to_lowercase(),
        }
    }
}

/// What a query key filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    /// Id when the value is all digits, name substring otherwise
    Search,
    /// Membership in the record's types
    Type,
    /// Equality on a declared field
    Field(ScalarField),
}

impl FilterKey {
    /// Resolves a raw query key.
    ///
    /// # Errors
    ///
    /// `UnsupportedFilter` for any key that is not `search`, `type` or a
    /// declared field.
    pub fn resolve(key: &str) -> DexResult<Self> {
        match key {
            "search" => Ok(FilterKey::Search),
            "type" => Ok(FilterKey::Type),
            other => ScalarField::from_key(other)
                .map(FilterKey::Field)
                .ok_or_else(|| DexError::UnsupportedFilter(other.to_string())),
        }
    }
}

/// A single resolved filter with its normalized value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub key: FilterKey,
    pub value: String,
}

impl Filter {
    /// Creates a filter; the value is trimmed and lower-cased.
    pub fn new(key: FilterKey, value: &str) -> Self {
        Self {
            key,
            value: value.trim().to_lowercase(),
        }
    }

    /// Check if a record matches this filter
    pub fn matches(&self, record: &Record) -> bool {
        match self.key {
            FilterKey::Search => {
                if is_all_digits(&self.value) {
                    // Too large for an id: nothing can match
                    self.value.parse::<u64>().map_or(false, |id| record.id == id)
                } else {
                    record.name.to_lowercase().contains(&self.value)
                }
            }
            FilterKey::Type => record.has_type(&self.value),
            FilterKey::Field(field) => field.comparable(record) == self.value,
        }
    }
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
