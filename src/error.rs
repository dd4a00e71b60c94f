//! Error types for modelcast.

use crate::{DocumentKey, FieldName};
use thiserror::Error;

/// All possible errors from document conversion and the record cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Document shape errors
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("type mismatch for field '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        field: FieldName,
        expected: String,
        got: String,
    },

    // Transformer errors
    #[error("transform failed for field '{field}': {reason}")]
    Transform { field: FieldName, reason: String },

    #[error("no reverse transform for field '{0}'")]
    UnsupportedReverseTransform(FieldName),

    // Key mapping errors
    #[error("document key '{key}' is mapped by both '{first}' and '{second}'")]
    KeyCollision {
        key: DocumentKey,
        first: FieldName,
        second: FieldName,
    },

    #[error("unknown field: {0}")]
    UnknownField(FieldName),

    // Serialization errors
    #[error("value not representable as a document: {0}")]
    Encoding(String),

    // Cache errors
    #[error("storage backend failure: {0}")]
    Storage(String),

    #[error("corrupt cache entry for key '{key}': {reason}")]
    CorruptEntry { key: String, reason: String },
}

/// Result type for modelcast operations.
pub type Result<T> = std::result::Result<T, Error>;
