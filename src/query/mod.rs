//! # Query Module
//!
//! Search, type and field filters plus page-window pagination over a
//! collection snapshot. No indexes: every filter is a linear scan.

pub mod engine;
pub mod filter;
pub mod parser;

pub use engine::{execute, QueryResult};
pub use filter::{Filter, FilterKey, ScalarField};
pub use parser::{QueryParams, DEFAULT_LIMIT, DEFAULT_PAGE};
