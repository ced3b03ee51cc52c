#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for the TLV engine: truncated buffers, unknown codes,
//! and the deliberate leniencies (falsy-value dropping, silent skips)
//! that give schemas optional-field semantics.

use tlv_codec::{CodecError, FramingOptions, Schema, SingleCodec, Value, ValueMap};

fn schema() -> Schema {
    Schema::builder()
        .field("alpha", 0x01, SingleCodec::from_layout("u16").unwrap())
        .field("beta", 0x02, SingleCodec::from_layout("u8").unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// PARSE FAILURES
// ============================================================================

#[test]
fn empty_buffer_parses_to_empty_map() {
    assert!(schema().parse(&[]).unwrap().is_empty());
}

#[test]
fn buffer_no_longer_than_one_header_is_rejected() {
    // One byte short of a header, and exactly one header with no payload:
    // both fail.
    for buffer in [&[0x01][..], &[0x01, 0x02][..]] {
        assert!(matches!(
            schema().parse(buffer),
            Err(CodecError::InsufficientBuffer { .. })
        ));
    }
}

#[test]
fn declared_length_beyond_buffer_is_rejected() {
    // Record claims 4 payload bytes but only 2 remain.
    let result = schema().parse(&[0x01, 0x04, 0x00, 0xB4]);
    assert!(matches!(
        result,
        Err(CodecError::InsufficientBuffer {
            expected: 4,
            actual: 2
        })
    ));
}

#[test]
fn huge_declared_length_under_wide_framing_is_rejected() {
    // An 8-byte length field can declare a length near u64::MAX; the
    // parser must fail cleanly instead of overflowing the slice bound.
    let schema = Schema::builder()
        .framing(FramingOptions::with_widths(1, 8).unwrap())
        .field("alpha", 0x01, SingleCodec::from_layout("u16").unwrap())
        .build()
        .unwrap();

    let mut buffer = vec![0x01];
    buffer.extend_from_slice(&[0xFF; 8]); // length = u64::MAX
    buffer.push(0x00);

    assert!(matches!(
        schema.parse(&buffer),
        Err(CodecError::InsufficientBuffer { actual: 1, .. })
    ));

    // Same shape with a 4-byte length field.
    let schema = Schema::builder()
        .framing(FramingOptions::with_widths(1, 4).unwrap())
        .field("alpha", 0x01, SingleCodec::from_layout("u16").unwrap())
        .build()
        .unwrap();
    let buffer = [0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];
    assert!(matches!(
        schema.parse(&buffer),
        Err(CodecError::InsufficientBuffer { .. })
    ));
}

#[test]
fn unknown_code_aborts_the_whole_parse() {
    // First record is fine; the second carries code 0x7F which the schema
    // does not declare. No partial result comes back.
    let result = schema().parse(&[0x01, 0x02, 0x00, 0xB4, 0x7F, 0x01, 0xAA]);
    assert!(matches!(result, Err(CodecError::InvalidCode(0x7F))));
}

#[test]
fn payload_shorter_than_codec_layout_is_rejected() {
    // Record framing is consistent (length 1) but the u16 codec needs 2.
    let result = schema().parse(&[0x01, 0x01, 0xB4]);
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

// ============================================================================
// DELIBERATE LENIENCY (pinned behavior)
// ============================================================================

#[test]
fn trailing_bytes_shorter_than_a_header_are_ignored() {
    let parsed = schema().parse(&[0x01, 0x02, 0x00, 0xB4, 0xFF]).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.get("alpha"), Some(&Value::Int(180)));
}

#[test]
fn falsy_decoded_values_are_dropped() {
    // beta decodes to zero: the entry never appears.
    let parsed = schema().parse(&[0x02, 0x01, 0x00]).unwrap();
    assert!(parsed.is_empty());

    // A zero next to a non-zero drops only the zero.
    let parsed = schema()
        .parse(&[0x02, 0x01, 0x00, 0x01, 0x02, 0x00, 0xB4])
        .unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.get("alpha"), Some(&Value::Int(180)));
}

#[test]
fn unknown_names_are_silently_skipped_on_build() {
    let mut values = ValueMap::new();
    values.insert("nonexistent".into(), Value::Int(7));
    values.insert("beta".into(), Value::Int(9));
    let bytes = schema().build(&values).unwrap();
    assert_eq!(bytes, vec![0x02, 0x01, 0x09]);
}

#[test]
fn codec_less_field_emits_nothing_without_a_hook() {
    let schema = Schema::builder()
        .raw_field("opaque", 0x01)
        .build()
        .unwrap();
    let mut values = ValueMap::new();
    values.insert("opaque".into(), Value::Int(1));
    assert!(schema.build(&values).unwrap().is_empty());
}

#[test]
fn zero_value_still_builds_a_record() {
    // The falsy rule applies to decoded values and empty encodings, not to
    // a zero that encodes to non-empty bytes. Parsing it back drops it.
    let mut values = ValueMap::new();
    values.insert("alpha".into(), Value::Int(0));
    let bytes = schema().build(&values).unwrap();
    assert_eq!(bytes, vec![0x01, 0x02, 0x00, 0x00]);
    assert!(schema().parse(&bytes).unwrap().is_empty());
}

// ============================================================================
// BUILD FAILURES
// ============================================================================

#[test]
fn out_of_range_value_fails_build() {
    let mut values = ValueMap::new();
    values.insert("beta".into(), Value::Int(300));
    assert!(matches!(
        schema().build(&values),
        Err(CodecError::OutOfRange { .. })
    ));
}

#[test]
fn payload_longer_than_length_field_fails_build() {
    // Default framing has a 1-byte length field; a 256-byte payload
    // cannot be framed.
    let schema = Schema::builder()
        .field("blob", 0x01, tlv_codec::FixedStringCodec::new(256))
        .build()
        .unwrap();
    let mut values = ValueMap::new();
    values.insert("blob".into(), Value::from("x"));
    assert!(matches!(
        schema.build(&values),
        Err(CodecError::HeaderOverflow { .. })
    ));
}
