//! # Response Formatting
//!
//! Response bodies for the record endpoints. List responses are
//! [`crate::query::QueryResult`] as-is.

use serde::Serialize;

/// Single record response
#[derive(Debug, Clone, Serialize)]
pub struct SingleResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> SingleResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Delete response
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self {
            success: true,
            message: "Delete successfully".to_string(),
        }
    }
}
