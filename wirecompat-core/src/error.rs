//! Error types for wirecompat-core.
//!
//! This module provides structured error types for all decoding operations:
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`WireError`] - Structural errors from the binary wire format
//! - [`TextError`] - Errors from the textual (JSON) codec
//! - [`SchemaError`] - Illegal schema-pair evolution
//!
//! Structural wire errors always abort the enclosing decode call: a stream
//! that fails a varint, tag, or length read cannot be partially trusted.
//! Schema mismatches (unknown field numbers, missing fields) are never
//! errors; they are the specified compatibility behavior and are handled by
//! the projector. Malformed UTF-8 inside a string field is recovered
//! locally and reported as a [`crate::record::Diagnostic`], not an error.

use thiserror::Error;

/// Main error type for wirecompat-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Structural error in the binary wire format
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// Error in the textual (JSON) encoding
    #[error("text error: {0}")]
    Text(#[from] TextError),

    /// Illegal schema evolution between two compared schemas
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Structural errors in the binary wire format.
///
/// Every variant carries the byte offset at which decoding failed so that
/// callers can log where a malformed payload went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Buffer ended before a structurally required read completed
    #[error("truncated input at byte {offset}: need {needed} byte(s), have {have}")]
    Truncated {
        offset: usize,
        needed: usize,
        have: usize,
    },

    /// A varint ran past the 10-byte maximum for 64-bit values
    #[error("varint at byte {offset} exceeds 10 bytes")]
    VarintOverflow { offset: usize },

    /// A wire type outside {0 = varint, 2 = length-delimited} appeared
    #[error("unsupported wire type {wire_type} at byte {offset}")]
    UnsupportedWireType { offset: usize, wire_type: u8 },

    /// Field number 0 (or one too large to represent) was decoded
    #[error("invalid field number {number} at byte {offset}")]
    InvalidFieldNumber { offset: usize, number: u64 },
}

impl WireError {
    /// Byte offset at which the structural error occurred.
    pub fn offset(&self) -> usize {
        match self {
            WireError::Truncated { offset, .. }
            | WireError::VarintOverflow { offset }
            | WireError::UnsupportedWireType { offset, .. }
            | WireError::InvalidFieldNumber { offset, .. } => *offset,
        }
    }
}

/// Errors from the textual (JSON) codec.
#[derive(Error, Debug)]
pub enum TextError {
    /// Input is not well-formed JSON
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Top-level value (or a nested message value) is not a JSON object
    #[error("textual message must be a JSON object")]
    NotAnObject,

    /// A key has no corresponding field descriptor and `discard_unknown`
    /// is off
    #[error("unknown field {key:?}")]
    UnknownField { key: String },

    /// A value does not match the field's semantic type
    #[error("field {field:?}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// A timestamp value is not valid RFC 3339 or is out of range
    #[error("field {field:?}: invalid timestamp: {reason}")]
    InvalidTimestamp { field: &'static str, reason: String },
}

/// Illegal evolution between two schemas under comparison.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field number present in both schemas has differing definitions.
    /// Only whole-field additions and removals are permitted evolution.
    #[error("field {number} redefined between schemas ({old} vs {new})")]
    Redefined {
        number: u32,
        old: &'static str,
        new: &'static str,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
