//! Message schemas: ordered field descriptor tables.
//!
//! Schemas are plain immutable data loaded once at process start (no code
//! generation step). Lookups are linear; the schemas in scope have a
//! handful of fields.
//!
//! # Example
//!
//! ```rust
//! use wirecompat_core::schema::{versions, SemanticKind};
//!
//! let v2 = &versions::V2;
//! let message = v2.field_by_number(6).unwrap();
//! assert_eq!(message.name, "message");
//! assert_eq!(message.kind, SemanticKind::Str);
//! ```

mod field;
mod kind;
pub mod versions;

pub use field::FieldDescriptor;
pub use kind::SemanticKind;

/// An ordered, immutable set of field descriptors under a version name.
///
/// Two schemas compared for compatibility must share identical definitions
/// for every field number present in both; `crate::compat::evaluate`
/// enforces this.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    /// Version name, e.g. "v1".
    pub version: &'static str,

    /// Field definitions in declaration order.
    pub fields: &'static [FieldDescriptor],
}

impl Schema {
    /// Look up a field by wire number.
    pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Look up a field by snake_case name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Look up a field by either its snake_case or camelCase spelling.
    pub fn field_by_key(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.matches_key(key))
    }

    /// Whether `number` is defined in this schema.
    pub fn contains_number(&self, number: u32) -> bool {
        self.field_by_number(number).is_some()
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version)
    }
}
