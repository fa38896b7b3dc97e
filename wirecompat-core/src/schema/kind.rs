//! Semantic field type definitions.

use super::Schema;

/// Semantic type of a field, independent of its wire representation.
///
/// String, repeated-string, timestamp, and embedded-message fields all
/// travel as wire type 2 (length-delimited); int64 travels as wire type 0
/// (varint). The projector dispatches on this kind to turn raw spans into
/// typed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SemanticKind {
    /// UTF-8 string.
    Str,
    /// Signed 64-bit integer, varint-encoded.
    Int64,
    /// Well-known timestamp submessage (seconds = field 1, nanos = field 2).
    Timestamp,
    /// Repeated UTF-8 string: one length-delimited entry per element.
    RepeatedStr,
    /// Embedded message projected through a nested schema.
    Message(&'static Schema),
}

impl SemanticKind {
    /// Human-readable type name for display and error reporting.
    pub fn type_name(&self) -> &'static str {
        match self {
            SemanticKind::Str => "string",
            SemanticKind::Int64 => "int64",
            SemanticKind::Timestamp => "timestamp",
            SemanticKind::RepeatedStr => "repeated string",
            SemanticKind::Message(_) => "message",
        }
    }

    /// Wire type this kind is encoded with.
    pub fn wire_type(&self) -> crate::wire::WireType {
        match self {
            SemanticKind::Int64 => crate::wire::WireType::Varint,
            _ => crate::wire::WireType::LengthDelimited,
        }
    }

    /// Whether absent fields of this kind take a present default value
    /// (empty string, zero, empty list) rather than staying absent.
    pub fn has_scalar_default(&self) -> bool {
        matches!(
            self,
            SemanticKind::Str | SemanticKind::Int64 | SemanticKind::RepeatedStr
        )
    }
}

impl std::fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}
