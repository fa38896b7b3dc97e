//! Binary wire format: varints, tags, the message decoder, and the
//! encoder.
//!
//! Layering, leaves first: [`varint`] encodes/decodes base-128 integers;
//! [`tag`] splits tags into `(field_number, wire_type)`; [`reader`] loops
//! tag/value pairs into an ordered [`RawField`] list; [`writer`] is the
//! inverse. Everything here is schema-free; mapping raw fields to typed
//! records is `crate::project`'s job.

pub mod reader;
pub mod tag;
pub mod varint;
pub mod writer;

pub use reader::{decode_message, read_value, RawField, RawFields, RawValue};
pub use tag::{decode_tag, encode_tag, WireType, MAX_FIELD_NUMBER};
pub use varint::{decode_varint, encode_varint, varint_len, MAX_VARINT_LEN};
pub use writer::{encode_record, MessageWriter};
