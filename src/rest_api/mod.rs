//! # REST API Module
//!
//! HTTP endpoints for the record collection. Handlers are thin: they
//! decode the request, call the [`crate::storage::RecordStore`], and let
//! [`errors`] turn error kinds into status codes.

pub mod errors;
pub mod response;
pub mod server;

pub use errors::{status_code, ErrorResponse, RestResult};
pub use response::{DeleteResponse, SingleResponse};
pub use server::record_routes;
