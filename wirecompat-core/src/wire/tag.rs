//! Field tag decomposition.
//!
//! A tag is a single varint carrying `(field_number << 3) | wire_type`.
//! Only the two wire types used by the schemas in scope are modeled;
//! fixed32/fixed64/group tags are rejected as unsupported.

use crate::error::WireError;

use super::varint::{decode_varint, encode_varint};

/// Highest field number representable in a tag (29 bits).
pub const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;

/// How the bytes following a tag are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Unsigned base-128 varint payload.
    Varint = 0,
    /// Length varint followed by exactly that many raw bytes.
    LengthDelimited = 2,
}

impl WireType {
    /// Convert a raw 3-bit wire-type code, rejecting unsupported codes.
    pub fn from_raw(raw: u8, offset: usize) -> Result<Self, WireError> {
        match raw {
            0 => Ok(WireType::Varint),
            2 => Ok(WireType::LengthDelimited),
            other => Err(WireError::UnsupportedWireType {
                offset,
                wire_type: other,
            }),
        }
    }

    /// Human-readable name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::LengthDelimited => "length-delimited",
        }
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decode one field tag starting at `offset`.
///
/// Returns `(field_number, wire_type, bytes_consumed)`. Field number 0 is
/// invalid on the wire and fails with [`WireError::InvalidFieldNumber`].
pub fn decode_tag(buf: &[u8], offset: usize) -> Result<(u32, WireType, usize), WireError> {
    let (tag, consumed) = decode_varint(buf, offset)?;
    let number = tag >> 3;
    if number == 0 || number > MAX_FIELD_NUMBER {
        return Err(WireError::InvalidFieldNumber { offset, number });
    }
    let wire_type = WireType::from_raw((tag & 0x7) as u8, offset)?;
    Ok((number as u32, wire_type, consumed))
}

/// Append the tag for `(number, wire_type)` to `out`.
pub fn encode_tag(number: u32, wire_type: WireType, out: &mut Vec<u8>) {
    encode_varint((u64::from(number) << 3) | wire_type as u64, out);
}
