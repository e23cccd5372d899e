//! # REST API Errors
//!
//! Maps core error kinds to HTTP status codes. This is the only place the
//! mapping exists.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::core::{DexError, ErrorKind};
use crate::observability::Logger;

/// Result type for REST operations
pub type RestResult<T> = Result<T, DexError>;

/// HTTP status code for an error kind
pub fn status_code(kind: ErrorKind) -> StatusCode {
    match kind {
        // Missing or invalid input
        ErrorKind::MissingField
        | ErrorKind::TooManyTypes
        | ErrorKind::MissingType
        | ErrorKind::InvalidType
        | ErrorKind::UnsupportedFilter => StatusCode::UNAUTHORIZED,

        // Existing clients expect 404 for a taken id or name
        ErrorKind::NotFound | ErrorKind::DuplicateRecord => StatusCode::NOT_FOUND,

        ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl From<&DexError> for ErrorResponse {
    fn from(err: &DexError) -> Self {
        Self {
            error: err.to_string(),
            code: status_code(err.kind()).as_u16(),
            kind: err.code(),
        }
    }
}

impl IntoResponse for DexError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from(&self);
        let status = status_code(self.kind());
        let code = status.as_u16().to_string();
        let fields = [
            ("kind", body.kind),
            ("message", body.error.as_str()),
            ("status", code.as_str()),
        ];

        if self.is_retryable() {
            Logger::error("STORAGE_FAILURE", &fields);
        } else {
            Logger::warn("REQUEST_REJECTED", &fields);
        }

        (status, Json(body)).into_response()
    }
}
