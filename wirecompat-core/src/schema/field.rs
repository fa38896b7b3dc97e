//! Field descriptor for message schemas.

use super::{Schema, SemanticKind};

/// One field definition in a schema: wire number, names, and semantic
/// type. Immutable once the schema is constructed; field numbers are
/// unique within a schema.
///
/// `json_name` is the camelCase spelling the textual codec emits; the
/// textual decoder accepts either spelling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDescriptor {
    /// Positive wire field number.
    pub number: u32,

    /// snake_case field name (e.g. "execution_id").
    pub name: &'static str,

    /// camelCase name used by the textual encoding (e.g. "executionId").
    pub json_name: &'static str,

    /// Semantic type driving projection and textual conversion.
    pub kind: SemanticKind,

    /// Whether the field may occur multiple times on the wire.
    pub repeated: bool,
}

impl FieldDescriptor {
    /// String field.
    pub const fn string(number: u32, name: &'static str, json_name: &'static str) -> Self {
        Self {
            number,
            name,
            json_name,
            kind: SemanticKind::Str,
            repeated: false,
        }
    }

    /// Varint-encoded int64 field.
    pub const fn int64(number: u32, name: &'static str, json_name: &'static str) -> Self {
        Self {
            number,
            name,
            json_name,
            kind: SemanticKind::Int64,
            repeated: false,
        }
    }

    /// Timestamp submessage field.
    pub const fn timestamp(number: u32, name: &'static str, json_name: &'static str) -> Self {
        Self {
            number,
            name,
            json_name,
            kind: SemanticKind::Timestamp,
            repeated: false,
        }
    }

    /// Repeated string field.
    pub const fn repeated_string(
        number: u32,
        name: &'static str,
        json_name: &'static str,
    ) -> Self {
        Self {
            number,
            name,
            json_name,
            kind: SemanticKind::RepeatedStr,
            repeated: true,
        }
    }

    /// Embedded message field projected through `schema`.
    pub const fn message(
        number: u32,
        name: &'static str,
        json_name: &'static str,
        schema: &'static Schema,
    ) -> Self {
        Self {
            number,
            name,
            json_name,
            kind: SemanticKind::Message(schema),
            repeated: false,
        }
    }

    /// Whether `key` names this field in textual input (either spelling).
    pub fn matches_key(&self, key: &str) -> bool {
        key == self.name || key == self.json_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_const_constructors() {
        let f = FieldDescriptor::string(1, "execution_id", "executionId");
        assert_eq!(f.number, 1);
        assert_eq!(f.kind, SemanticKind::Str);
        assert!(!f.repeated);

        let r = FieldDescriptor::repeated_string(5, "instance_ids", "instanceIds");
        assert!(r.repeated);
        assert_eq!(r.kind, SemanticKind::RepeatedStr);
    }

    #[test]
    fn test_matches_key_both_spellings() {
        let f = FieldDescriptor::string(2, "infrastructure_id", "infrastructureId");
        assert!(f.matches_key("infrastructure_id"));
        assert!(f.matches_key("infrastructureId"));
        assert!(!f.matches_key("infrastructure"));
    }
}
