//! Integration tests for schema evolution between v1 and v2.
//!
//! Tests validate that:
//! - New consumers read old data (missing fields take defaults)
//! - Old consumers read new data (unknown fields are dropped)
//! - The evaluator's verdict matrix matches actual pipeline behavior
//! - Binary and textual decode paths agree field for field
//! - The documented capture payload decodes and re-encodes exactly

use wirecompat_core::prelude::*;

/// The hex payload documented in the capture analysis: fields 1 and 2 are
/// strings, 5 and 6 are timestamps, 7 is an explicitly empty message.
const CAPTURE_HEX: &str = "0A0866726F6E74656E64120E7373656D6F757470757464656D6F2A0C08C2F080C90610888FC99101320C08C2F080C90610888FC991013A00";

const CAPTURE_TS: WireTimestamp = WireTimestamp::new(1_763_719_234, 305_285_000);

/// Build a producer-side record; `message` switches v1/v2 content.
fn producer_record(message: Option<&str>) -> DecodedRecord {
    let mut record = DecodedRecord::new();
    record.insert("execution_id", Value::str("exec-123"));
    record.insert("infrastructure_id", Value::str("infra-456"));
    record.insert(
        "started_at",
        Value::Timestamp(WireTimestamp::new(1_704_110_400, 0)),
    );
    record.insert(
        "stopped_at",
        Value::Timestamp(WireTimestamp::new(1_704_114_000, 0)),
    );
    record.insert("instance_ids", Value::str_list(["i-001", "i-002", "i-003"]));
    if let Some(message) = message {
        record.insert("message", Value::str(message));
    }
    record
}

fn roundtrip(producer: &DecodedRecord, encode_as: &Schema, decode_as: &Schema) -> DecodedRecord {
    let bytes = encode_record(producer, encode_as);
    let raw = decode_message(&bytes).unwrap();
    project(&raw, decode_as).unwrap()
}

/// Old producer, new consumer: the appended field takes its default.
#[test]
fn test_forward_compatibility_defaults_new_field() {
    let consumer = roundtrip(&producer_record(None), &versions::V1, &versions::V2);

    assert_eq!(consumer.get("execution_id").unwrap().as_str(), Some("exec-123"));
    assert_eq!(
        consumer.get("infrastructure_id").unwrap().as_str(),
        Some("infra-456")
    );
    assert_eq!(
        consumer.get("started_at").unwrap().as_timestamp(),
        Some(WireTimestamp::new(1_704_110_400, 0))
    );
    assert_eq!(consumer.get("instance_ids").unwrap().as_list().unwrap().len(), 3);
    // The v2-only field was never on the wire; the consumer fills its default
    assert_eq!(consumer.get("message").unwrap().as_str(), Some(""));
}

/// New producer, old consumer: the appended field is silently dropped and
/// every shared field arrives unchanged.
#[test]
fn test_backward_compatibility_drops_new_field() {
    let producer = producer_record(Some("Execution completed successfully"));
    let consumer = roundtrip(&producer, &versions::V2, &versions::V1);

    assert!(consumer.get("message").is_none());
    assert_eq!(consumer.len(), versions::V1.fields.len());
    assert!(consumer.is_clean());

    // Shared fields carried exactly
    for (name, value) in &consumer.fields {
        assert_eq!(producer.get(name), Some(value), "field {name} changed in transit");
    }
}

/// The evaluator's matrix, computed from schemas alone, matches what the
/// decode pipeline actually does with concrete messages.
#[test]
fn test_verdicts_match_pipeline_behavior() {
    let verdicts = evaluate(&versions::V1, &versions::V2).unwrap();

    let old_producer = producer_record(None);
    let new_producer = producer_record(Some("done"));
    let old_to_new = roundtrip(&old_producer, &versions::V1, &versions::V2);
    let new_to_old = roundtrip(&new_producer, &versions::V2, &versions::V1);

    for verdict in &verdicts {
        let (record, producer) = match verdict.direction {
            Direction::OldToNew => (&old_to_new, &old_producer),
            Direction::NewToOld => (&new_to_old, &new_producer),
        };
        match verdict.outcome {
            Outcome::Carried => {
                assert_eq!(
                    record.get(verdict.field_name),
                    producer.get(verdict.field_name),
                    "{} should be carried {}",
                    verdict.field_name,
                    verdict.direction
                );
            }
            Outcome::Defaulted => {
                // Producer never emitted it; consumer holds the default
                assert!(producer.get(verdict.field_name).is_none());
                assert_eq!(record.get(verdict.field_name).unwrap().as_str(), Some(""));
            }
            Outcome::Dropped => {
                // Producer emitted it; consumer has no entry at all
                assert!(producer.get(verdict.field_name).is_some());
                assert!(record.get(verdict.field_name).is_none());
            }
        }
    }
}

/// Binary and textual decode agree field for field, in both directions,
/// once the textual path is given `discard_unknown` to match the binary
/// path's default permissiveness.
#[test]
fn test_cross_format_parity() {
    let cases = [
        (producer_record(None), &versions::V1, &versions::V2),
        (
            producer_record(Some("Execution completed successfully")),
            &versions::V2,
            &versions::V1,
        ),
    ];

    for (producer, produce_as, consume_as) in cases {
        let via_binary = roundtrip(&producer, produce_as, consume_as);

        let text = encode_text(&producer, produce_as, &TextOptions::default()).unwrap();
        let via_text = decode_text(&text, consume_as, &TextOptions::permissive()).unwrap();

        assert_eq!(
            via_binary, via_text,
            "binary and textual decode diverged for {} -> {}",
            produce_as, consume_as
        );
    }
}

/// Textual decode is strict about unknown keys unless told otherwise.
#[test]
fn test_textual_unknown_field_strictness() {
    let producer = producer_record(Some("done"));
    let text = encode_text(&producer, &versions::V2, &TextOptions::default()).unwrap();

    let err = decode_text(&text, &versions::V1, &TextOptions::default()).unwrap_err();
    match err {
        TextError::UnknownField { key } => assert_eq!(key, "message"),
        other => panic!("expected UnknownField, got {other}"),
    }

    let record = decode_text(&text, &versions::V1, &TextOptions::permissive()).unwrap();
    assert!(record.get("message").is_none());
    assert_eq!(record.get("execution_id").unwrap().as_str(), Some("exec-123"));
}

/// Repeated field order and count survive the full pipeline.
#[test]
fn test_repeated_field_ordering() {
    let consumer = roundtrip(&producer_record(None), &versions::V1, &versions::V1);
    let list: Vec<&str> = consumer
        .get("instance_ids")
        .unwrap()
        .as_list()
        .unwrap()
        .iter()
        .map(|s| s.as_str())
        .collect();
    assert_eq!(list, ["i-001", "i-002", "i-003"]);
}

/// The documented capture payload decodes field for field under its own
/// layout and re-encodes byte-identically, empty message marker included.
#[test]
fn test_documented_capture_payload() {
    let payload = hex::decode(CAPTURE_HEX).unwrap();

    let raw = decode_message(&payload).unwrap();
    let numbers: Vec<u32> = raw.iter().map(|f| f.number).collect();
    assert_eq!(numbers, [1, 2, 5, 6, 7]);

    let record = project(&raw, &versions::CAPTURE_V2).unwrap();
    assert_eq!(record.get("execution_id").unwrap().as_str(), Some("frontend"));
    assert_eq!(
        record.get("infrastructure_id").unwrap().as_str(),
        Some("ssemoutputdemo")
    );
    assert_eq!(record.get("started_at").unwrap().as_timestamp(), Some(CAPTURE_TS));
    assert_eq!(record.get("stopped_at").unwrap().as_timestamp(), Some(CAPTURE_TS));
    // Trailing 3A 00: field 7 explicitly present and empty
    assert_eq!(record.get("message").unwrap().as_str(), Some(""));
    assert!(record.is_clean());

    // Re-encoding the projected record reproduces the payload exactly
    assert_eq!(encode_record(&record, &versions::CAPTURE_V2), payload);
}

/// An old consumer of the capture layout ignores the message field, and
/// the evaluator predicts it.
#[test]
fn test_capture_payload_under_old_layout() {
    let payload = hex::decode(CAPTURE_HEX).unwrap();
    let raw = decode_message(&payload).unwrap();

    let record = project(&raw, &versions::CAPTURE_V1).unwrap();
    assert!(record.get("message").is_none());
    assert_eq!(record.get("execution_id").unwrap().as_str(), Some("frontend"));
    assert_eq!(record.len(), versions::CAPTURE_V1.fields.len());

    let verdicts = evaluate(&versions::CAPTURE_V1, &versions::CAPTURE_V2).unwrap();
    let verdict = verdict_for(&verdicts, "message", Direction::NewToOld).unwrap();
    assert_eq!(verdict.outcome, Outcome::Dropped);
}

/// Truncating the capture payload anywhere strictly inside it either
/// fails structurally or stops cleanly at a field boundary; it never
/// produces a silently wrong value.
#[test]
fn test_capture_payload_truncation_safety() {
    let payload = hex::decode(CAPTURE_HEX).unwrap();
    // Field boundaries: after field 1 (10), field 2 (26), field 5 (40),
    // field 6 (54); the full payload ends after field 7 (56).
    let boundaries = [10, 26, 40, 54];

    for cut in 1..payload.len() {
        match decode_message(&payload[..cut]) {
            Ok(fields) => {
                assert!(
                    boundaries.contains(&cut),
                    "clean decode at non-boundary cut {cut}"
                );
                assert!(!fields.is_empty());
            }
            Err(err) => {
                assert!(
                    matches!(err, WireError::Truncated { .. }),
                    "cut at {cut}: unexpected error {err}"
                );
            }
        }
    }
}
