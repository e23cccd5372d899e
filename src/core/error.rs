//! Core Error Types
//!
//! Every failure the record engine can produce. The HTTP boundary maps
//! [`ErrorKind`] to a status code; nothing below it knows about HTTP.

use std::fmt;

use thiserror::Error;

/// Core module result type
pub type DexResult<T> = Result<T, DexError>;

/// Closed set of error kinds surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    TooManyTypes,
    MissingType,
    InvalidType,
    DuplicateRecord,
    UnsupportedFilter,
    NotFound,
    Storage,
}

impl ErrorKind {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "DEX_MISSING_FIELD",
            ErrorKind::TooManyTypes => "DEX_TOO_MANY_TYPES",
            ErrorKind::MissingType => "DEX_MISSING_TYPE",
            ErrorKind::InvalidType => "DEX_INVALID_TYPE",
            ErrorKind::DuplicateRecord => "DEX_DUPLICATE_RECORD",
            ErrorKind::UnsupportedFilter => "DEX_UNSUPPORTED_FILTER",
            ErrorKind::NotFound => "DEX_NOT_FOUND",
            ErrorKind::Storage => "DEX_STORAGE_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Core error type
#[derive(Debug, Clone, Error)]
pub enum DexError {
    // ==================
    // Caller input faults
    // ==================
    /// `id`, `name` or `imageUrl` absent or empty
    #[error("Missing required data: {0}")]
    MissingField(String),

    /// Three or more type entries supplied
    #[error("A record can only have one or two types, got {0}")]
    TooManyTypes(usize),

    /// No non-empty type entries supplied
    #[error("Missing required data. You must specify a type for the record")]
    MissingType,

    /// Type outside the fixed enumeration
    #[error("Record type is invalid: {0}")]
    InvalidType(String),

    /// Id or normalized name already taken
    #[error("The record already exists: {0}")]
    DuplicateRecord(String),

    /// Query key that is neither a search, a type nor a declared field
    #[error("Query {0} is not allowed")]
    UnsupportedFilter(String),

    /// No record with the given id
    #[error("Record not found: {0}")]
    NotFound(String),

    // ==================
    // Environment faults
    // ==================
    /// Durable storage unreadable, unwritable or corrupt
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DexError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a not found error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// The kind tag of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::TooManyTypes(_) => ErrorKind::TooManyTypes,
            Self::MissingType => ErrorKind::MissingType,
            Self::InvalidType(_) => ErrorKind::InvalidType,
            Self::DuplicateRecord(_) => ErrorKind::DuplicateRecord,
            Self::UnsupportedFilter(_) => ErrorKind::UnsupportedFilter,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Get error code for API responses
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Only environment faults may be retried by the caller.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Storage
    }
}

impl From<std::io::Error> for DexError {
    fn from(e: std::io::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for DexError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(format!("Invalid document JSON: {}", e))
    }
}
