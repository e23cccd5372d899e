//! # Core Module
//!
//! Error kinds shared by every layer of the record engine.

pub mod error;

pub use error::{DexError, DexResult, ErrorKind};
