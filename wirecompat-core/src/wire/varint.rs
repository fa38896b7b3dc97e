//! Base-128 variable-length integer codec.
//!
//! Varints carry 7 data bits per byte, least-significant group first, with
//! the high bit of each byte as the continuation flag. They encode field
//! tags, lengths, and numeric field values.

use crate::error::WireError;

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Decode one varint starting at `offset`.
///
/// Returns the decoded value and the number of bytes consumed. Fails with
/// [`WireError::Truncated`] if the buffer ends before a terminating byte
/// (high bit clear) and [`WireError::VarintOverflow`] if the encoding runs
/// past 10 bytes.
pub fn decode_varint(buf: &[u8], offset: usize) -> Result<(u64, usize), WireError> {
    let mut value = 0u64;
    let mut shift = 0u32;

    for (i, &byte) in buf[offset.min(buf.len())..].iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(WireError::VarintOverflow { offset });
        }
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
    }

    let have = buf.len().saturating_sub(offset);
    Err(WireError::Truncated {
        offset,
        needed: have + 1,
        have,
    })
}

/// Append the minimal-length varint encoding of `value` to `out`.
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Number of bytes `value` occupies when varint-encoded.
pub fn varint_len(value: u64) -> usize {
    // 1 byte per 7 bits, at least one byte for zero
    (64 - value.leading_zeros() as usize).div_ceil(7).max(1)
}
