//! Observability for the record service
//!
//! Structured JSON logging only. Logging is read-only with respect to
//! the store: a failed log write never fails an operation.
//!
//! # Usage
//!
//! ```ignore
//! use pokedex::observability::Logger;
//!
//! Logger::info("RECORD_INSERTED", &[("id", "42")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
