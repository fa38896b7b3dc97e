//! Convenience re-exports for common usage.
//!
//! ```rust
//! use wirecompat_core::prelude::*;
//!
//! let raw = decode_message(&[]).unwrap();
//! let record = project(&raw, &versions::V1).unwrap();
//! assert_eq!(record.get("execution_id").unwrap().as_str(), Some(""));
//! ```

pub use crate::compat::{evaluate, verdict_for, Direction, Outcome, Verdict};
pub use crate::error::{Error, Result, SchemaError, TextError, WireError};
pub use crate::project::project;
pub use crate::record::{DecodedRecord, Value, WireTimestamp};
pub use crate::schema::{versions, FieldDescriptor, Schema, SemanticKind};
pub use crate::text::{decode_text, encode_text, TextOptions};
pub use crate::wire::{decode_message, encode_record, MessageWriter, RawField, WireType};
