//! Wire-format encoder.
//!
//! [`MessageWriter`] builds a byte buffer field by field; [`encode_record`]
//! walks a schema in field order and emits every entry present in a
//! [`DecodedRecord`]. Presence is explicit: an entry holding an empty
//! string is emitted as a zero-length field, while fields with no entry
//! are omitted entirely. Zero-valued timestamp components are omitted
//! inside the submessage.

use crate::record::{DecodedRecord, Value, WireTimestamp};
use crate::schema::{Schema, SemanticKind};

use super::tag::{encode_tag, WireType};
use super::varint::{encode_varint, varint_len};

/// Incremental wire-format message builder.
#[derive(Debug, Default)]
pub struct MessageWriter {
    buf: Vec<u8>,
}

impl MessageWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a wire type 0 field.
    pub fn varint_field(&mut self, number: u32, value: u64) {
        encode_tag(number, WireType::Varint, &mut self.buf);
        encode_varint(value, &mut self.buf);
    }

    /// Emit a wire type 2 field from raw bytes.
    pub fn bytes_field(&mut self, number: u32, payload: &[u8]) {
        encode_tag(number, WireType::LengthDelimited, &mut self.buf);
        self.buf.reserve(varint_len(payload.len() as u64) + payload.len());
        encode_varint(payload.len() as u64, &mut self.buf);
        self.buf.extend_from_slice(payload);
    }

    /// Emit a string field. Empty strings produce a zero-length field.
    pub fn string_field(&mut self, number: u32, value: &str) {
        self.bytes_field(number, value.as_bytes());
    }

    /// Emit an embedded message built by `build`.
    pub fn message_field(&mut self, number: u32, build: impl FnOnce(&mut MessageWriter)) {
        let mut nested = MessageWriter::new();
        build(&mut nested);
        self.bytes_field(number, &nested.buf);
    }

    /// Emit a timestamp submessage (seconds = field 1, nanos = field 2,
    /// zero components omitted).
    pub fn timestamp_field(&mut self, number: u32, ts: WireTimestamp) {
        self.message_field(number, |w| {
            if ts.seconds != 0 {
                w.varint_field(1, ts.seconds as u64);
            }
            if ts.nanos != 0 {
                w.varint_field(2, ts.nanos as u64);
            }
        });
    }

    /// Finish and take the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Encoded length so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Encode a record under a schema, in schema field order.
///
/// Entries whose value kind does not match their descriptor are skipped;
/// records produced by projection or textual decode always match.
pub fn encode_record(record: &DecodedRecord, schema: &Schema) -> Vec<u8> {
    let mut w = MessageWriter::new();

    for desc in schema.fields {
        let Some(value) = record.get(desc.name) else {
            continue;
        };
        match (&desc.kind, value) {
            (SemanticKind::Str, Value::Str(s)) => w.string_field(desc.number, s),
            (SemanticKind::Int64, Value::Int64(v)) => w.varint_field(desc.number, *v as u64),
            (SemanticKind::Timestamp, Value::Timestamp(ts)) => {
                w.timestamp_field(desc.number, *ts)
            }
            (SemanticKind::RepeatedStr, Value::StrList(items)) => {
                for item in items {
                    w.string_field(desc.number, item);
                }
            }
            (SemanticKind::Message(nested), Value::Message(inner)) => {
                w.bytes_field(desc.number, &encode_record(inner, nested));
            }
            _ => {}
        }
    }

    w.into_bytes()
}
