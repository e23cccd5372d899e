//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/pokemons` - Record list, insert
//! - `/pokemons/:id` - Record lookup with neighbors, delete

pub mod config;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{health_routes, HttpServer};
