//! # wirecompat-core
//!
//! Engine-agnostic wire-format decoding with schema-evolution semantics.
//!
//! Given two versions of a message schema differing by appended fields,
//! this crate determines whether a message encoded by a producer on one
//! version can be decoded safely by a consumer on the other, field by
//! field, for both the compact binary wire encoding and the textual
//! (JSON) encoding.
//!
//! ## Quick Start
//!
//! ```rust
//! use wirecompat_core::prelude::*;
//!
//! // A v2 producer writes a message with the appended `message` field
//! let mut record = DecodedRecord::new();
//! record.insert("execution_id", Value::str("exec-789"));
//! record.insert("message", Value::str("completed"));
//! let bytes = encode_record(&record, &versions::V2);
//!
//! // A v1 consumer decodes it: the unknown field is silently dropped
//! let raw = decode_message(&bytes).unwrap();
//! let seen = project(&raw, &versions::V1).unwrap();
//! assert_eq!(seen.get("execution_id").unwrap().as_str(), Some("exec-789"));
//! assert!(seen.get("message").is_none());
//!
//! // The evaluator predicts exactly that, from the schemas alone
//! let verdicts = evaluate(&versions::V1, &versions::V2).unwrap();
//! let v = verdict_for(&verdicts, "message", Direction::NewToOld).unwrap();
//! assert_eq!(v.outcome, Outcome::Dropped);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |                       wirecompat-core                             |
//! +-------------------------------------------------------------------+
//! |  wire/     - varint codec, tag decomposer, message decoder,       |
//! |              encoder (zero-copy RawField spans)                   |
//! |  schema/   - FieldDescriptor, SemanticKind, built-in versions     |
//! |  record    - Value, DecodedRecord, projection diagnostics         |
//! |  project   - raw fields -> typed record under a schema            |
//! |  compat    - schema-pair verdict matrix (carried/defaulted/       |
//! |              dropped per field per direction)                     |
//! |  text/     - JSON codec mirroring the binary path                 |
//! |  error     - structural wire/text/schema error types              |
//! +-------------------------------------------------------------------+
//! ```
//!
//! Raw bytes flow through `wire::decode_message` into an ordered
//! [`RawField`] list, then through [`project`] under a target schema into
//! a [`DecodedRecord`]. The [`compat::evaluate`] matrix is computed from
//! schema definitions alone and states what the pipeline must do with
//! every field in each transfer direction.
//!
//! The core is purely functional: decode and projection take an immutable
//! buffer and an immutable schema and return an independently owned
//! result. Schemas are static tables, safe to share across threads.

pub mod compat;
pub mod error;
pub mod prelude;
pub mod project;
pub mod record;
pub mod schema;
pub mod text;
pub mod wire;

// Re-export commonly used types at crate root for convenience
pub use compat::{evaluate, verdict_for, Direction, Outcome, Verdict};
pub use error::{Error, Result, SchemaError, TextError, WireError};
pub use project::project;
pub use record::{DecodedRecord, Diagnostic, Value, WireTimestamp};
pub use schema::{versions, FieldDescriptor, Schema, SemanticKind};
pub use text::{decode_text, encode_text, TextOptions};
pub use wire::{
    decode_message, decode_tag, decode_varint, encode_record, encode_tag, encode_varint,
    MessageWriter, RawField, RawFields, RawValue, WireType,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
