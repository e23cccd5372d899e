//! Record and collection document types
//!
//! Wire format:
//! ```json
//! {
//!   "data": [
//!     { "id": 1, "name": "bulbasaur", "types": ["grass", "poison"], "imageUrl": "..." }
//!   ],
//!   "totalRecords": 1
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed enumeration of allowed type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

impl CreatureType {
    pub const ALL: [CreatureType; 18] = [
        CreatureType::Bug,
        CreatureType::Dark,
        CreatureType::Dragon,
        CreatureType::Electric,
        CreatureType::Fairy,
        CreatureType::Fighting,
        CreatureType::Fire,
        CreatureType::Flying,
        CreatureType::Ghost,
        CreatureType::Grass,
        CreatureType::Ground,
        CreatureType::Ice,
        CreatureType::Normal,
        CreatureType::Poison,
        CreatureType::Psychic,
        CreatureType::Rock,
        CreatureType::Steel,
        CreatureType::Water,
    ];

    /// Returns the lower-case tag
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureType::Bug => "bug",
            CreatureType::Dark => "dark",
            CreatureType::Dragon => "dragon",
            CreatureType::Electric => "electric",
            CreatureType::Fairy => "fairy",
            CreatureType::Fighting => "fighting",
            CreatureType::Fire => "fire",
            CreatureType::Flying => "flying",
            CreatureType::Ghost => "ghost",
            CreatureType::Grass => "grass",
            CreatureType::Ground => "ground",
            CreatureType::Ice => "ice",
            CreatureType::Normal => "normal",
            CreatureType::Poison => "poison",
            CreatureType::Psychic => "psychic",
            CreatureType::Rock => "rock",
            CreatureType::Steel => "steel",
            CreatureType::Water => "water",
        }
    }

    /// Looks up an already normalized (trimmed, lower-case) tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == tag)
    }
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single creature entry
///
/// Types are kept as strings so that a document written by another tool
/// still loads; inserts go through the validator, which only admits
/// members of [`CreatureType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub types: Vec<String>,
    #[serde(alias = "url")]
    pub image_url: String,
}

impl Record {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        types: Vec<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            types,
            image_url: image_url.into(),
        }
    }

    /// Name compared the way uniqueness is defined: trimmed, lower-case.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

/// The full persisted state
///
/// `total_records` is derived; [`CollectionDocument::recount`] must run
/// before every write. Top-level keys this crate does not know about are
/// carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionDocument {
    #[serde(default)]
    pub data: Vec<Record>,

    #[serde(rename = "totalRecords", alias = "totalPokemons", default)]
    pub total_records: usize,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CollectionDocument {
    pub fn new(data: Vec<Record>) -> Self {
        let mut doc = Self {
            data,
            total_records: 0,
            extra: Map::new(),
        };
        doc.recount();
        doc
    }

    /// Recomputes the derived record count.
    pub fn recount(&mut self) {
        self.total_records = self.data.len();
    }

    pub fn find(&self, id: u64) -> Option<&Record> {
        self.data.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: u64) -> Option<usize> {
        self.data.iter().position(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
