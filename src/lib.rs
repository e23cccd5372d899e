//! pokedex - a flat-file creature record service
//!
//! One JSON document holds the whole collection. The engine validates
//! inserts, filters and pages queries, resolves numeric neighbors, and
//! persists through a locked read-modify-write cycle.

pub mod adjacency;
pub mod cli;
pub mod core;
pub mod http_server;
pub mod import;
pub mod observability;
pub mod query;
pub mod record;
pub mod rest_api;
pub mod schema;
pub mod storage;
