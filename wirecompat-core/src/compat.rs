//! Schema-pair compatibility evaluation.
//!
//! [`evaluate`] is a pure function of two schemas: it never touches an
//! encoded message. For every field in either schema it states the
//! expected fate in each transfer direction, turning "does schema
//! evolution work" into a checkable property. The decode pipeline's
//! behavior on concrete messages must match these verdicts exactly;
//! the integration tests assert that.

use crate::error::SchemaError;
use crate::schema::Schema;

/// Transfer direction between an old-schema and a new-schema party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Old producer, new consumer (forward compatibility).
    OldToNew,
    /// New producer, old consumer (backward compatibility).
    NewToOld,
}

impl Direction {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::OldToNew => "old->new",
            Direction::NewToOld => "new->old",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expected fate of one field in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Field exists on both sides; the value transfers unchanged.
    Carried,
    /// The producer never emits the field; the consumer fills its default.
    Defaulted,
    /// The producer emits the field; the consumer has no descriptor for it
    /// and silently discards it.
    Dropped,
}

impl Outcome {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Carried => "carried",
            Outcome::Defaulted => "defaulted",
            Outcome::Dropped => "dropped",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One field's expected fate in one direction for a schema pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    /// Field name (from whichever schema defines it).
    pub field_name: &'static str,
    /// Wire field number.
    pub number: u32,
    /// Transfer direction this verdict covers.
    pub direction: Direction,
    /// Expected fate.
    pub outcome: Outcome,
}

/// Evaluate the compatibility matrix for a schema pair.
///
/// Produces two verdicts (one per direction) for every field present in
/// either schema, old-schema fields first in declaration order, then
/// new-only fields. Fails with [`SchemaError::Redefined`] if a field
/// number present in both schemas has differing definitions; only pure
/// additions and removals of whole field numbers are permitted evolution.
pub fn evaluate(old: &Schema, new: &Schema) -> Result<Vec<Verdict>, SchemaError> {
    let mut verdicts = Vec::with_capacity(2 * (old.fields.len() + new.fields.len()));

    for field in old.fields {
        match new.field_by_number(field.number) {
            Some(counterpart) => {
                if counterpart != field {
                    return Err(SchemaError::Redefined {
                        number: field.number,
                        old: field.kind.type_name(),
                        new: counterpart.kind.type_name(),
                    });
                }
                push_pair(&mut verdicts, field.name, field.number, Outcome::Carried, Outcome::Carried);
            }
            None => {
                // Schema shrinkage: old producer emits, new consumer drops;
                // new producer never emits, old consumer defaults.
                push_pair(&mut verdicts, field.name, field.number, Outcome::Dropped, Outcome::Defaulted);
            }
        }
    }

    for field in new.fields {
        if old.contains_number(field.number) {
            continue;
        }
        // Appended field: old producer never emits, new consumer defaults;
        // new producer emits, old consumer drops.
        push_pair(&mut verdicts, field.name, field.number, Outcome::Defaulted, Outcome::Dropped);
    }

    Ok(verdicts)
}

fn push_pair(
    verdicts: &mut Vec<Verdict>,
    field_name: &'static str,
    number: u32,
    old_to_new: Outcome,
    new_to_old: Outcome,
) {
    verdicts.push(Verdict {
        field_name,
        number,
        direction: Direction::OldToNew,
        outcome: old_to_new,
    });
    verdicts.push(Verdict {
        field_name,
        number,
        direction: Direction::NewToOld,
        outcome: new_to_old,
    });
}

/// Convenience lookup into an evaluated matrix.
pub fn verdict_for<'v>(
    verdicts: &'v [Verdict],
    field_name: &str,
    direction: Direction,
) -> Option<&'v Verdict> {
    verdicts
        .iter()
        .find(|v| v.field_name == field_name && v.direction == direction)
}
