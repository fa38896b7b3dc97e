//! Textual (JSON) codec.
//!
//! Mirrors the binary decode/project pair for a human-readable encoding,
//! keyed by field name instead of field number. The encoder emits
//! camelCase keys; the decoder accepts camelCase or snake_case. int64
//! values are emitted as decimal strings and accepted as either number or
//! string. Timestamps render as canonical RFC 3339 UTC strings.
//!
//! Absent optional fields (timestamps, embedded messages) are omitted from
//! the output entirely; present-but-default scalars are emitted.
//!
//! Unknown keys are strict by default: decoding fails with
//! [`TextError::UnknownField`] unless [`TextOptions::discard_unknown`] is
//! set, which skips them silently. This is the one asymmetry against the
//! binary path, whose projection is always permissive; setting
//! `discard_unknown` brings the textual path to parity.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value as JsonValue};

use crate::error::TextError;
use crate::record::{DecodedRecord, Value, WireTimestamp};
use crate::schema::{FieldDescriptor, Schema, SemanticKind};

/// Textual codec configuration, passed explicitly at the call boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Skip unknown keys instead of failing on them.
    pub discard_unknown: bool,

    /// Pretty-print encoder output.
    pub pretty: bool,
}

impl TextOptions {
    /// Permissive decoding: unknown keys are skipped.
    pub fn permissive() -> Self {
        Self {
            discard_unknown: true,
            pretty: false,
        }
    }
}

/// Decode a textual message under a schema.
pub fn decode_text(
    text: &str,
    schema: &Schema,
    options: &TextOptions,
) -> Result<DecodedRecord, TextError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let obj = root.as_object().ok_or(TextError::NotAnObject)?;
    object_to_record(obj, schema, options)
}

/// Encode a record under a schema as a textual message.
pub fn encode_text(
    record: &DecodedRecord,
    schema: &Schema,
    options: &TextOptions,
) -> Result<String, TextError> {
    let obj = record_to_object(record, schema)?;
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&JsonValue::Object(obj))?
    } else {
        serde_json::to_string(&JsonValue::Object(obj))?
    };
    Ok(rendered)
}

fn object_to_record(
    obj: &Map<String, JsonValue>,
    schema: &Schema,
    options: &TextOptions,
) -> Result<DecodedRecord, TextError> {
    for key in obj.keys() {
        if schema.field_by_key(key).is_none() && !options.discard_unknown {
            return Err(TextError::UnknownField { key: key.clone() });
        }
    }

    let mut record = DecodedRecord::new();
    for desc in schema.fields {
        // JSON null is treated the same as an omitted key
        let value = obj
            .get(desc.json_name)
            .or_else(|| obj.get(desc.name))
            .filter(|v| !v.is_null());

        match (&desc.kind, value) {
            (SemanticKind::Str, Some(v)) => {
                record.insert(desc.name, Value::str(expect_str(v, desc)?));
            }
            (SemanticKind::Str, None) => record.insert(desc.name, Value::empty_str()),

            (SemanticKind::Int64, Some(v)) => {
                record.insert(desc.name, Value::Int64(expect_i64(v, desc)?));
            }
            (SemanticKind::Int64, None) => record.insert(desc.name, Value::Int64(0)),

            (SemanticKind::Timestamp, Some(v)) => {
                let ts = parse_timestamp(expect_str(v, desc)?, desc)?;
                record.insert(desc.name, Value::Timestamp(ts));
            }
            (SemanticKind::Timestamp, None) => {}

            (SemanticKind::RepeatedStr, Some(v)) => {
                let items = v.as_array().ok_or_else(|| type_mismatch(desc, v, "array"))?;
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    list.push(compact_str::CompactString::new(expect_str(item, desc)?));
                }
                record.insert(desc.name, Value::StrList(list));
            }
            (SemanticKind::RepeatedStr, None) => {
                record.insert(desc.name, Value::StrList(Vec::new()));
            }

            (SemanticKind::Message(nested), Some(v)) => {
                let inner_obj = v.as_object().ok_or_else(|| type_mismatch(desc, v, "object"))?;
                let inner = object_to_record(inner_obj, nested, options)?;
                record.insert(desc.name, Value::Message(Box::new(inner)));
            }
            (SemanticKind::Message(_), None) => {}
        }
    }

    Ok(record)
}

fn record_to_object(
    record: &DecodedRecord,
    schema: &Schema,
) -> Result<Map<String, JsonValue>, TextError> {
    let mut obj = Map::new();

    for desc in schema.fields {
        let Some(value) = record.get(desc.name) else {
            continue;
        };
        let rendered = match (&desc.kind, value) {
            (SemanticKind::Str, Value::Str(s)) => JsonValue::String(s.to_string()),
            // int64 renders as a decimal string so values above 2^53
            // survive JSON number parsers
            (SemanticKind::Int64, Value::Int64(v)) => JsonValue::String(v.to_string()),
            (SemanticKind::Timestamp, Value::Timestamp(ts)) => {
                JsonValue::String(format_timestamp(*ts, desc)?)
            }
            (SemanticKind::RepeatedStr, Value::StrList(items)) => JsonValue::Array(
                items.iter().map(|s| JsonValue::String(s.to_string())).collect(),
            ),
            (SemanticKind::Message(nested), Value::Message(inner)) => {
                JsonValue::Object(record_to_object(inner, nested)?)
            }
            _ => continue,
        };
        obj.insert(desc.json_name.to_string(), rendered);
    }

    Ok(obj)
}

fn expect_str<'v>(v: &'v JsonValue, desc: &FieldDescriptor) -> Result<&'v str, TextError> {
    v.as_str().ok_or_else(|| type_mismatch(desc, v, "string"))
}

fn expect_i64(v: &JsonValue, desc: &FieldDescriptor) -> Result<i64, TextError> {
    if let Some(n) = v.as_i64() {
        return Ok(n);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<i64>().map_err(|err| TextError::InvalidValue {
            field: desc.name,
            reason: format!("cannot parse {s:?} as int64: {err}"),
        });
    }
    Err(type_mismatch(desc, v, "number or string"))
}

fn type_mismatch(desc: &FieldDescriptor, v: &JsonValue, wanted: &str) -> TextError {
    TextError::InvalidValue {
        field: desc.name,
        reason: format!("expected {wanted} for {} field, got {v}", desc.kind),
    }
}

fn parse_timestamp(s: &str, desc: &FieldDescriptor) -> Result<WireTimestamp, TextError> {
    let dt = DateTime::parse_from_rfc3339(s).map_err(|err| TextError::InvalidTimestamp {
        field: desc.name,
        reason: format!("{err} in {s:?}"),
    })?;
    Ok(WireTimestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    })
}

fn format_timestamp(ts: WireTimestamp, desc: &FieldDescriptor) -> Result<String, TextError> {
    if ts.nanos < 0 {
        return Err(TextError::InvalidTimestamp {
            field: desc.name,
            reason: format!("negative nanos {}", ts.nanos),
        });
    }
    let dt = Utc
        .timestamp_opt(ts.seconds, ts.nanos as u32)
        .single()
        .ok_or_else(|| TextError::InvalidTimestamp {
            field: desc.name,
            reason: format!("seconds {} out of range", ts.seconds),
        })?;
    Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
