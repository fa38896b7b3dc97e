//! Typed record values produced by projection and textual decode.
//!
//! A [`DecodedRecord`] maps field names to typed [`Value`]s. Every key
//! corresponds to a descriptor in the schema the record was projected
//! through; wire fields absent from that schema never appear. Records are
//! transient and exclusively owned by the call that produced them.
//!
//! Recoverable projection problems (malformed UTF-8 in a string field)
//! ride along as [`Diagnostic`]s instead of aborting the decode;
//! diagnostics are excluded from record equality.

use compact_str::CompactString;
use smallvec::SmallVec;

/// Timestamp as carried on the wire: a two-field submessage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireTimestamp {
    /// Seconds since the Unix epoch (field 1).
    pub seconds: i64,
    /// Nanosecond remainder (field 2).
    pub nanos: i32,
}

impl WireTimestamp {
    /// Construct from seconds and nanos.
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

/// A typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 string. Uses CompactString for small-string optimization.
    Str(CompactString),
    /// Signed 64-bit integer.
    Int64(i64),
    /// Timestamp seconds/nanos pair.
    Timestamp(WireTimestamp),
    /// Repeated string elements in wire order.
    StrList(Vec<CompactString>),
    /// Nested record projected through an embedded schema.
    Message(Box<DecodedRecord>),
}

impl Value {
    /// Empty-string value.
    pub fn empty_str() -> Self {
        Value::Str(CompactString::default())
    }

    /// Build a string value.
    pub fn str(s: impl AsRef<str>) -> Self {
        Value::Str(CompactString::new(s.as_ref()))
    }

    /// Build a string-list value.
    pub fn str_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Value::StrList(items.into_iter().map(|s| CompactString::new(s.as_ref())).collect())
    }

    /// Try to get as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a timestamp.
    pub fn as_timestamp(&self) -> Option<WireTimestamp> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Try to get as a string list.
    pub fn as_list(&self) -> Option<&[CompactString]> {
        match self {
            Value::StrList(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Try to get as a nested record.
    pub fn as_record(&self) -> Option<&DecodedRecord> {
        match self {
            Value::Message(inner) => Some(inner),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Timestamp(ts) => write!(f, "{{seconds: {}, nanos: {}}}", ts.seconds, ts.nanos),
            Value::StrList(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item:?}")?;
                }
                write!(f, "]")
            }
            Value::Message(inner) => write!(f, "{inner}"),
        }
    }
}

/// A recoverable problem noticed while projecting a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Field the problem occurred in.
    pub field: &'static str,
    /// Byte offset of the field's tag in the decoded buffer.
    pub offset: usize,
    /// What went wrong.
    pub detail: String,
}

/// Field entry: (field_name, value). Names come from schema descriptors.
pub type RecordEntry = (&'static str, Value);

/// An ordered mapping from field name to typed value.
///
/// Entries keep schema declaration order. Lookup is linear; schemas in
/// scope have a handful of fields. Equality compares entries only, not
/// diagnostics, so binary- and text-decoded records of the same logical
/// message compare equal even when one path recorded a recovery.
#[derive(Debug, Clone, Default)]
pub struct DecodedRecord {
    /// Projected entries in schema order. Most schemas have <8 fields.
    pub fields: SmallVec<[RecordEntry; 8]>,

    /// Recoverable problems hit during projection.
    pub diagnostics: Vec<Diagnostic>,
}

impl DecodedRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn insert(&mut self, name: &'static str, value: Value) {
        self.fields.push((name, value));
    }

    /// Get a value by field name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Whether the record has an entry for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Record a recoverable problem.
    pub fn diagnose(&mut self, field: &'static str, offset: usize, detail: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            field,
            offset,
            detail: detail.into(),
        });
    }

    /// Whether projection completed without recoverable problems.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Equality is field-for-field; diagnostics are bookkeeping, not data.
impl PartialEq for DecodedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl std::fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut record = DecodedRecord::new();
        record.insert("execution_id", Value::str("frontend"));
        record.insert("started_at", Value::Timestamp(WireTimestamp::new(100, 5)));

        assert_eq!(record.get("execution_id").unwrap().as_str(), Some("frontend"));
        assert_eq!(
            record.get("started_at").unwrap().as_timestamp(),
            Some(WireTimestamp::new(100, 5))
        );
        assert!(record.get("missing").is_none());
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_equality_ignores_diagnostics() {
        let mut a = DecodedRecord::new();
        a.insert("message", Value::empty_str());

        let mut b = DecodedRecord::new();
        b.insert("message", Value::empty_str());
        b.diagnose("message", 3, "invalid UTF-8");

        assert_eq!(a, b);
        assert!(a.is_clean());
        assert!(!b.is_clean());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::str("x").as_str(), Some("x"));
        assert_eq!(Value::Int64(7).as_i64(), Some(7));
        assert_eq!(Value::str("x").as_i64(), None);

        let list = Value::str_list(["i-001", "i-002"]);
        assert_eq!(list.as_list().unwrap().len(), 2);
        assert_eq!(list.as_list().unwrap()[0], "i-001");
    }

    #[test]
    fn test_display() {
        let mut record = DecodedRecord::new();
        record.insert("execution_id", Value::str("frontend"));
        record.insert("instance_ids", Value::str_list(["i-001"]));
        assert_eq!(
            record.to_string(),
            "{execution_id: \"frontend\", instance_ids: [\"i-001\"]}"
        );
    }
}
