//! Wire-type value reader and message decoder.
//!
//! [`decode_message`] walks a byte buffer tag by tag and produces an
//! ordered list of [`RawField`]s. Values are zero-copy: length-delimited
//! payloads are returned as spans into the input buffer. The decoder does
//! not interpret a span's semantic type (string vs nested message); that
//! is the projector's job, driven by the schema.
//!
//! Repeated field numbers are all preserved in encounter order; nothing is
//! deduplicated or overwritten. Unknown field numbers are not an error at
//! this layer (or any layer).

use smallvec::SmallVec;

use crate::error::WireError;

use super::tag::{decode_tag, WireType};
use super::varint::decode_varint;

/// A decoded wire value, untyped beyond its wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'data> {
    /// Wire type 0 payload.
    Varint(u64),
    /// Wire type 2 payload: a raw span into the input buffer.
    Bytes(&'data [u8]),
}

/// One field occurrence as it appeared on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawField<'data> {
    /// Field number from the tag.
    pub number: u32,
    /// Wire type from the tag.
    pub wire_type: WireType,
    /// Byte offset of this field's tag in the decoded buffer.
    pub offset: usize,
    /// The field payload.
    pub value: RawValue<'data>,
}

impl<'data> RawField<'data> {
    /// The varint payload, if this is a wire type 0 field.
    pub fn as_varint(&self) -> Option<u64> {
        match self.value {
            RawValue::Varint(v) => Some(v),
            RawValue::Bytes(_) => None,
        }
    }

    /// The byte span, if this is a wire type 2 field.
    pub fn as_bytes(&self) -> Option<&'data [u8]> {
        match self.value {
            RawValue::Bytes(b) => Some(b),
            RawValue::Varint(_) => None,
        }
    }
}

/// Inline-capacity list of raw fields. Messages in scope have well under
/// 16 field occurrences.
pub type RawFields<'data> = SmallVec<[RawField<'data>; 16]>;

/// Read one value of the given wire type starting at `offset`.
///
/// Returns the value and the number of bytes consumed. A declared
/// length-delimited length is bounds-checked against the remaining buffer
/// before any span is taken, so a pathological length fails eagerly with
/// [`WireError::Truncated`] instead of allocating.
pub fn read_value<'data>(
    buf: &'data [u8],
    offset: usize,
    wire_type: WireType,
) -> Result<(RawValue<'data>, usize), WireError> {
    match wire_type {
        WireType::Varint => {
            let (value, consumed) = decode_varint(buf, offset)?;
            Ok((RawValue::Varint(value), consumed))
        }
        WireType::LengthDelimited => {
            let (declared, len_bytes) = decode_varint(buf, offset)?;
            let payload_start = offset + len_bytes;
            let have = buf.len().saturating_sub(payload_start);
            let length = usize::try_from(declared).unwrap_or(usize::MAX);
            if length > have {
                return Err(WireError::Truncated {
                    offset: payload_start,
                    needed: length,
                    have,
                });
            }
            let span = &buf[payload_start..payload_start + length];
            Ok((RawValue::Bytes(span), len_bytes + length))
        }
    }
}

/// Decode an entire buffer into an ordered list of raw fields.
///
/// Terminates cleanly at the exact buffer end; any read that would overrun
/// the buffer fails with a structural [`WireError`] carrying the offending
/// offset.
pub fn decode_message(buf: &[u8]) -> Result<RawFields<'_>, WireError> {
    let mut fields = RawFields::new();
    let mut offset = 0;

    while offset < buf.len() {
        let tag_offset = offset;
        let (number, wire_type, tag_bytes) = decode_tag(buf, offset)?;
        offset += tag_bytes;

        let (value, value_bytes) = read_value(buf, offset, wire_type)?;
        offset += value_bytes;

        fields.push(RawField {
            number,
            wire_type,
            offset: tag_offset,
            value,
        });
    }

    Ok(fields)
}
