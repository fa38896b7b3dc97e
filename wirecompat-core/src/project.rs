//! Schema projection: raw wire fields to typed records.
//!
//! [`project`] maps a decoded [`RawField`] list into a [`DecodedRecord`]
//! under a schema. Dispatch is on each descriptor's [`SemanticKind`], one
//! conversion per kind. The forward/backward compatibility rules live
//! here:
//!
//! - Raw fields whose number has no descriptor are silently ignored (old
//!   consumers drop new producers' fields).
//! - Descriptors with no matching raw field take their default: empty
//!   string, zero, empty list, or stay absent for timestamps and embedded
//!   messages (new consumers default old producers' missing fields).
//!
//! Only a genuinely malformed byte layout (inside an embedded message)
//! fails projection. Malformed UTF-8 in a string field is recovered with
//! a replacement-character value plus a diagnostic, matching permissive
//! real-world consumers. A wire-type mismatch against the descriptor is
//! likewise diagnosed and the occurrence skipped.

use compact_str::CompactString;

use crate::error::WireError;
use crate::record::{DecodedRecord, Value, WireTimestamp};
use crate::schema::{FieldDescriptor, Schema, SemanticKind};
use crate::wire::{decode_message, RawField};

/// Project raw fields through a schema, producing a typed record.
pub fn project(raw_fields: &[RawField<'_>], schema: &Schema) -> Result<DecodedRecord, WireError> {
    let mut record = DecodedRecord::new();

    for desc in schema.fields {
        match desc.kind {
            SemanticKind::Str => project_string(raw_fields, desc, &mut record),
            SemanticKind::Int64 => project_int64(raw_fields, desc, &mut record),
            SemanticKind::Timestamp => project_timestamp(raw_fields, desc, &mut record)?,
            SemanticKind::RepeatedStr => project_repeated(raw_fields, desc, &mut record),
            SemanticKind::Message(nested) => {
                project_message(raw_fields, desc, nested, &mut record)?
            }
        }
    }

    Ok(record)
}

/// Last wire occurrence of `desc` carrying a byte span, with mismatched
/// wire types diagnosed and skipped.
fn last_span<'d>(
    raw_fields: &[RawField<'d>],
    desc: &FieldDescriptor,
    record: &mut DecodedRecord,
) -> Option<(&'d [u8], usize)> {
    let mut found = None;
    for field in raw_fields.iter().filter(|f| f.number == desc.number) {
        match field.as_bytes() {
            Some(span) => found = Some((span, field.offset)),
            None => record.diagnose(
                desc.name,
                field.offset,
                format!("expected length-delimited value, got {}", field.wire_type),
            ),
        }
    }
    found
}

fn decode_utf8(
    span: &[u8],
    desc: &FieldDescriptor,
    offset: usize,
    record: &mut DecodedRecord,
) -> CompactString {
    match std::str::from_utf8(span) {
        Ok(s) => CompactString::new(s),
        Err(err) => {
            record.diagnose(desc.name, offset, format!("invalid UTF-8: {err}"));
            CompactString::new(String::from_utf8_lossy(span))
        }
    }
}

fn project_string(raw_fields: &[RawField<'_>], desc: &FieldDescriptor, record: &mut DecodedRecord) {
    let value = match last_span(raw_fields, desc, record) {
        Some((span, offset)) => Value::Str(decode_utf8(span, desc, offset, record)),
        None => Value::empty_str(),
    };
    record.insert(desc.name, value);
}

fn project_int64(raw_fields: &[RawField<'_>], desc: &FieldDescriptor, record: &mut DecodedRecord) {
    let mut value = 0i64;
    for field in raw_fields.iter().filter(|f| f.number == desc.number) {
        match field.as_varint() {
            Some(v) => value = v as i64,
            None => record.diagnose(
                desc.name,
                field.offset,
                format!("expected varint value, got {}", field.wire_type),
            ),
        }
    }
    record.insert(desc.name, Value::Int64(value));
}

fn project_timestamp(
    raw_fields: &[RawField<'_>],
    desc: &FieldDescriptor,
    record: &mut DecodedRecord,
) -> Result<(), WireError> {
    let Some((span, _)) = last_span(raw_fields, desc, record) else {
        // Absent timestamps stay absent rather than defaulting to epoch
        return Ok(());
    };

    let inner = decode_message(span)?;
    let mut ts = WireTimestamp::default();
    for field in &inner {
        match (field.number, field.as_varint()) {
            (1, Some(v)) => ts.seconds = v as i64,
            (2, Some(v)) => ts.nanos = v as i32,
            _ => {}
        }
    }
    record.insert(desc.name, Value::Timestamp(ts));
    Ok(())
}

fn project_repeated(
    raw_fields: &[RawField<'_>],
    desc: &FieldDescriptor,
    record: &mut DecodedRecord,
) {
    let mut items = Vec::new();
    for field in raw_fields.iter().filter(|f| f.number == desc.number) {
        match field.as_bytes() {
            Some(span) => items.push(decode_utf8(span, desc, field.offset, record)),
            None => record.diagnose(
                desc.name,
                field.offset,
                format!("expected length-delimited value, got {}", field.wire_type),
            ),
        }
    }
    record.insert(desc.name, Value::StrList(items));
}

fn project_message(
    raw_fields: &[RawField<'_>],
    desc: &FieldDescriptor,
    nested: &Schema,
    record: &mut DecodedRecord,
) -> Result<(), WireError> {
    let Some((span, _)) = last_span(raw_fields, desc, record) else {
        return Ok(());
    };

    let inner_fields = decode_message(span)?;
    let mut inner = project(&inner_fields, nested)?;
    // Hoist nested diagnostics so each problem is reported exactly once
    record.diagnostics.append(&mut inner.diagnostics);
    record.insert(desc.name, Value::Message(Box::new(inner)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::versions;
    use crate::wire::MessageWriter;

    fn decode_and_project(buf: &[u8], schema: &Schema) -> DecodedRecord {
        let raw = decode_message(buf).unwrap();
        project(&raw, schema).unwrap()
    }

    #[test]
    fn test_defaults_for_empty_input() {
        let record = decode_and_project(&[], &versions::V2);
        assert_eq!(record.get("execution_id").unwrap().as_str(), Some(""));
        assert_eq!(record.get("infrastructure_id").unwrap().as_str(), Some(""));
        assert_eq!(record.get("message").unwrap().as_str(), Some(""));
        assert!(record.get("instance_ids").unwrap().as_list().unwrap().is_empty());
        // Absent timestamps stay absent
        assert!(record.get("started_at").is_none());
        assert!(record.get("stopped_at").is_none());
    }

    #[test]
    fn test_unknown_field_numbers_ignored() {
        let mut w = MessageWriter::new();
        w.string_field(1, "frontend");
        w.string_field(6, "from the future");
        w.varint_field(99, 7);
        let record = decode_and_project(&w.into_bytes(), &versions::V1);

        assert_eq!(record.get("execution_id").unwrap().as_str(), Some("frontend"));
        assert!(record.get("message").is_none());
        assert_eq!(record.len(), versions::V1.fields.len());
        assert!(record.is_clean());
    }

    #[test]
    fn test_timestamp_projection() {
        let mut w = MessageWriter::new();
        w.timestamp_field(3, WireTimestamp::new(1_763_719_234, 305_285_000));
        let record = decode_and_project(&w.into_bytes(), &versions::V1);

        assert_eq!(
            record.get("started_at").unwrap().as_timestamp(),
            Some(WireTimestamp::new(1_763_719_234, 305_285_000))
        );
    }

    #[test]
    fn test_timestamp_missing_components_default_to_zero() {
        let mut w = MessageWriter::new();
        w.message_field(3, |inner| inner.varint_field(1, 77));
        let record = decode_and_project(&w.into_bytes(), &versions::V1);

        assert_eq!(
            record.get("started_at").unwrap().as_timestamp(),
            Some(WireTimestamp::new(77, 0))
        );
    }

    #[test]
    fn test_repeated_strings_preserve_order() {
        let mut w = MessageWriter::new();
        w.string_field(5, "i-001");
        w.string_field(5, "i-002");
        w.string_field(5, "i-003");
        let record = decode_and_project(&w.into_bytes(), &versions::V1);

        let list: Vec<&str> = record
            .get("instance_ids")
            .unwrap()
            .as_list()
            .unwrap()
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(list, ["i-001", "i-002", "i-003"]);
    }

    #[test]
    fn test_scalar_last_occurrence_wins() {
        let mut w = MessageWriter::new();
        w.string_field(1, "first");
        w.string_field(1, "second");
        let record = decode_and_project(&w.into_bytes(), &versions::V1);
        assert_eq!(record.get("execution_id").unwrap().as_str(), Some("second"));
    }

    #[test]
    fn test_invalid_utf8_recovered_with_diagnostic() {
        let mut w = MessageWriter::new();
        w.bytes_field(1, &[0x66, 0xFF, 0xFE]);
        w.string_field(2, "ok");
        let record = decode_and_project(&w.into_bytes(), &versions::V1);

        // Projection did not abort; the bad field got a replacement value
        assert_eq!(record.get("infrastructure_id").unwrap().as_str(), Some("ok"));
        let s = record.get("execution_id").unwrap().as_str().unwrap();
        assert!(s.contains('\u{FFFD}'));

        assert_eq!(record.diagnostics.len(), 1);
        assert_eq!(record.diagnostics[0].field, "execution_id");
        assert_eq!(record.diagnostics[0].offset, 0);
        assert!(record.diagnostics[0].detail.contains("UTF-8"));
    }

    #[test]
    fn test_wire_type_mismatch_diagnosed_not_fatal() {
        // Field 1 is a string but arrives as a varint
        let mut w = MessageWriter::new();
        w.varint_field(1, 42);
        let record = decode_and_project(&w.into_bytes(), &versions::V1);

        assert_eq!(record.get("execution_id").unwrap().as_str(), Some(""));
        assert_eq!(record.diagnostics.len(), 1);
        assert!(record.diagnostics[0].detail.contains("length-delimited"));
    }

    #[test]
    fn test_nested_diagnostics_reported_once() {
        static INNER: Schema = Schema {
            version: "inner",
            fields: &[FieldDescriptor::string(1, "label", "label")],
        };
        static OUTER: Schema = Schema {
            version: "outer",
            fields: &[FieldDescriptor::message(4, "detail", "detail", &INNER)],
        };

        // Nested string field carries invalid UTF-8
        let mut w = MessageWriter::new();
        w.message_field(4, |inner| inner.bytes_field(1, &[0x66, 0xFF]));
        let record = decode_and_project(&w.into_bytes(), &OUTER);

        // The recovery surfaces on the outer record only
        assert_eq!(record.diagnostics.len(), 1);
        assert_eq!(record.diagnostics[0].field, "label");

        let nested = record.get("detail").unwrap().as_record().unwrap();
        assert!(nested.is_clean());
        let s = nested.get("label").unwrap().as_str().unwrap();
        assert!(s.contains('\u{FFFD}'));
    }

    #[test]
    fn test_malformed_embedded_message_is_structural() {
        // Timestamp span contains a truncated varint
        let mut w = MessageWriter::new();
        w.bytes_field(3, &[0x08, 0x80]);
        let bytes = w.into_bytes();
        let raw = decode_message(&bytes).unwrap();
        let err = project(&raw, &versions::V1).unwrap_err();
        assert!(matches!(err, WireError::Truncated { .. }));
    }
}
