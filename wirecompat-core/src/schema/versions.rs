//! Built-in schema versions.
//!
//! [`V1`] and [`V2`] are the infrastructure-execution message layouts
//! under evolution: V2 appends `message` (field 6) and is otherwise
//! identical. [`CAPTURE_V1`]/[`CAPTURE_V2`] describe the layout of the
//! documented capture payload, which carries its timestamps at fields 5
//! and 6 and the trailing empty `message` at field 7.

use super::{FieldDescriptor, Schema};

/// Infrastructure execution, version 1: fields 1-5.
pub static V1: Schema = Schema {
    version: "v1",
    fields: &[
        FieldDescriptor::string(1, "execution_id", "executionId"),
        FieldDescriptor::string(2, "infrastructure_id", "infrastructureId"),
        FieldDescriptor::timestamp(3, "started_at", "startedAt"),
        FieldDescriptor::timestamp(4, "stopped_at", "stoppedAt"),
        FieldDescriptor::repeated_string(5, "instance_ids", "instanceIds"),
    ],
};

/// Infrastructure execution, version 2: V1 plus `message` (field 6).
pub static V2: Schema = Schema {
    version: "v2",
    fields: &[
        FieldDescriptor::string(1, "execution_id", "executionId"),
        FieldDescriptor::string(2, "infrastructure_id", "infrastructureId"),
        FieldDescriptor::timestamp(3, "started_at", "startedAt"),
        FieldDescriptor::timestamp(4, "stopped_at", "stoppedAt"),
        FieldDescriptor::repeated_string(5, "instance_ids", "instanceIds"),
        FieldDescriptor::string(6, "message", "message"),
    ],
};

/// Layout of the documented capture payload, without its message field.
pub static CAPTURE_V1: Schema = Schema {
    version: "capture-v1",
    fields: &[
        FieldDescriptor::string(1, "execution_id", "executionId"),
        FieldDescriptor::string(2, "infrastructure_id", "infrastructureId"),
        FieldDescriptor::timestamp(5, "started_at", "startedAt"),
        FieldDescriptor::timestamp(6, "stopped_at", "stoppedAt"),
    ],
};

/// Layout of the documented capture payload: [`CAPTURE_V1`] plus
/// `message` (field 7).
pub static CAPTURE_V2: Schema = Schema {
    version: "capture-v2",
    fields: &[
        FieldDescriptor::string(1, "execution_id", "executionId"),
        FieldDescriptor::string(2, "infrastructure_id", "infrastructureId"),
        FieldDescriptor::timestamp(5, "started_at", "startedAt"),
        FieldDescriptor::timestamp(6, "stopped_at", "stoppedAt"),
        FieldDescriptor::string(7, "message", "message"),
    ],
};

/// Look up a built-in schema by version name.
pub fn by_name(name: &str) -> Option<&'static Schema> {
    match name {
        "v1" => Some(&V1),
        "v2" => Some(&V2),
        "capture-v1" => Some(&CAPTURE_V1),
        "capture-v2" => Some(&CAPTURE_V2),
        _ => None,
    }
}

/// All built-in schemas.
pub fn all() -> &'static [&'static Schema] {
    static ALL: [&Schema; 4] = [&V1, &V2, &CAPTURE_V1, &CAPTURE_V2];
    &ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v2_extends_v1_by_one_field() {
        assert_eq!(V2.fields.len(), V1.fields.len() + 1);
        for (a, b) in V1.fields.iter().zip(V2.fields.iter()) {
            assert_eq!(a, b);
        }
        let added = V2.fields.last().unwrap();
        assert_eq!(added.number, 6);
        assert_eq!(added.name, "message");
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("v1").unwrap().version, "v1");
        assert_eq!(by_name("capture-v2").unwrap().version, "capture-v2");
        assert!(by_name("v3").is_none());
    }
}
