//! Insert validation for creature records
//!
//! # Design Principles
//!
//! - Pure: validation reads a snapshot, never storage
//! - Violations abort the insert before anything is written
//! - Deterministic rule order, so one payload always yields the same error

mod candidate;
mod validator;

pub use candidate::CandidateRecord;
pub use validator::{normalize_types, RecordValidator, MAX_TYPES};
