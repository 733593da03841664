#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

//! Round trips through a shared buffer, including the boundary values.

use pep_hessian::{ByteBuffer, CHUNK_SIZE, HessianMap, HessianValue};

fn roundtrip(value: &HessianValue) -> HessianValue {
    let mut buffer = ByteBuffer::new();
    value.serialize(&mut buffer).unwrap();
    let decoded = HessianValue::deserialize(&mut buffer).unwrap();
    assert!(buffer.is_eof(), "trailing bytes after {:?}", value.kind());
    decoded
}

#[test]
fn test_integer_bounds() {
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        assert_eq!(roundtrip(&HessianValue::integer(v)), HessianValue::Integer(v));
        assert_eq!(roundtrip(&HessianValue::reference(v)), HessianValue::Ref(v));
    }
}

#[test]
fn test_long_bounds() {
    for v in [i64::MIN, -1, 0, i64::MAX] {
        assert_eq!(roundtrip(&HessianValue::long(v)), HessianValue::Long(v));
        assert_eq!(roundtrip(&HessianValue::date(v)), HessianValue::Date(v));
    }
}

#[test]
fn test_doubles_are_bit_exact() {
    let full_mantissa = f64::from_bits(0x3ff0_0000_0000_0001);
    for v in [0.0, -0.0, -12.5, full_mantissa, f64::MAX, f64::MIN_POSITIVE] {
        let decoded = roundtrip(&HessianValue::double(v)).as_f64().unwrap();
        assert_eq!(decoded.to_bits(), v.to_bits());
    }
}

#[test]
fn test_nan_keeps_its_payload() {
    let nan = f64::from_bits(0x7ff8_0000_0000_0abc);
    let decoded = roundtrip(&HessianValue::double(nan)).as_f64().unwrap();
    assert_eq!(decoded.to_bits(), nan.to_bits());
}

#[test]
fn test_text_and_binary_at_chunk_boundaries() {
    for len in [0, 1, CHUNK_SIZE - 1, CHUNK_SIZE, CHUNK_SIZE + 1] {
        let text = "a".repeat(len);
        assert_eq!(roundtrip(&HessianValue::string(text.clone())).as_str(), Some(text.as_str()));
        assert_eq!(roundtrip(&HessianValue::xml(text.clone())).as_str(), Some(text.as_str()));

        let bytes: Vec<u8> = (0..len).map(|i| u8::try_from(i % 251).unwrap()).collect();
        assert_eq!(
            roundtrip(&HessianValue::binary(bytes.clone())).as_bytes(),
            Some(bytes.as_slice())
        );
    }
}

#[test]
fn test_multibyte_text_across_segments() {
    // 3-byte characters never line up with the segment boundary
    let text = "\u{20ac}".repeat(CHUNK_SIZE / 2);
    assert_eq!(roundtrip(&HessianValue::string(text.clone())).as_str(), Some(text.as_str()));
}

#[test]
fn test_chunk_layout_for_two_full_segments_and_a_tail() {
    let payload = "q".repeat(2 * CHUNK_SIZE + 5);
    let bytes = HessianValue::string(payload.clone()).to_bytes().unwrap();

    let segment = 3 + CHUNK_SIZE;
    assert_eq!(bytes.len(), 2 * segment + 3 + 5);
    assert_eq!(&bytes[..3], &[b's', 0x80, 0x00]);
    assert_eq!(&bytes[segment..segment + 3], &[b's', 0x80, 0x00]);
    assert_eq!(&bytes[2 * segment..2 * segment + 3], &[b'S', 0x00, 0x05]);

    let decoded = HessianValue::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.as_str(), Some(payload.as_str()));
}

#[test]
fn test_map_list_map_nesting_keeps_order() {
    let inner = HessianMap::typed("Inner")
        .with("z", "last-first")
        .with("a", HessianValue::Null)
        .with(7_i32, 8_i64);
    let list = HessianValue::list(vec![
        HessianValue::map(inner.clone()),
        HessianValue::boolean(false),
        HessianValue::map(HessianMap::new()),
    ]);
    let outer = HessianMap::typed("Outer")
        .with("items", list)
        .with("items", "duplicate key kept");

    let decoded = roundtrip(&HessianValue::map(outer.clone()));
    assert_eq!(decoded, HessianValue::Map(outer));

    let decoded = decoded.as_map().unwrap();
    assert_eq!(decoded.type_name(), Some("Outer"));
    assert_eq!(decoded.len(), 2);
    let items = decoded.get("items").unwrap().as_list().unwrap();
    assert_eq!(items[0].as_map(), Some(&inner));
    assert_eq!(items[2].as_map().unwrap().type_name(), None);
}

#[test]
fn test_empty_type_name_round_trips_as_untyped() {
    let value = HessianValue::map(HessianMap::typed("").with("k", 1_i32));
    assert_eq!(value.to_bytes().unwrap()[..4], *b"Mt\0\0");

    let decoded = roundtrip(&value);
    assert_eq!(decoded, value);
    assert_eq!(decoded.as_map().unwrap().type_name(), None);
}

#[test]
fn test_scenario_two_longs_in_one_buffer() {
    let mut buffer = ByteBuffer::new();
    HessianValue::long(979_798_797_798).serialize(&mut buffer).unwrap();
    HessianValue::long(-65_422_454).serialize(&mut buffer).unwrap();

    assert_eq!(
        HessianValue::deserialize(&mut buffer).unwrap(),
        HessianValue::Long(979_798_797_798)
    );
    assert_eq!(
        HessianValue::deserialize(&mut buffer).unwrap(),
        HessianValue::Long(-65_422_454)
    );
    assert!(buffer.is_eof());
}

#[test]
fn test_scenario_negative_double() {
    let v = -0.678_687_687_f64;
    let mut buffer = ByteBuffer::new();
    HessianValue::double(v).serialize(&mut buffer).unwrap();
    let decoded = HessianValue::deserialize(&mut buffer).unwrap();
    assert_eq!(decoded.as_f64().unwrap().to_bits(), v.to_bits());
}

#[test]
fn test_scenario_empty_then_hello() {
    let mut buffer = ByteBuffer::new();
    HessianValue::string("").serialize(&mut buffer).unwrap();
    HessianValue::string("hello").serialize(&mut buffer).unwrap();

    assert_eq!(HessianValue::deserialize(&mut buffer).unwrap().as_str(), Some(""));
    assert_eq!(
        HessianValue::deserialize(&mut buffer).unwrap().as_str(),
        Some("hello")
    );
}
