//! Hostile and malformed input handling at the file level.

use matbin_codec::error::CodecError;
use matbin_codec::reader;
use matbin_codec::writer::{MatWriter, WriteOptions};
use matbin_types::{ElementType, Endianness, NumericPayload, TypeId, Variable, HEADER_LEN};
use std::io::Cursor;

fn valid_container() -> Vec<u8> {
    let mut buf = Vec::new();
    let mut writer = MatWriter::create(&mut buf, WriteOptions::new()).unwrap();
    writer
        .write_variable(&Variable::new(
            "ok",
            vec![2, 2],
            ElementType::Int32,
            NumericPayload::Int32(vec![1, 2, 3, 4]),
        ))
        .unwrap();
    buf
}

#[test]
fn empty_input_is_malformed_header() {
    let err = reader::read(Cursor::new(Vec::new())).unwrap_err();
    assert!(matches!(err, CodecError::MalformedHeader { .. }));
}

#[test]
fn bad_endian_token_rejected() {
    let mut bytes = valid_container();
    bytes[126] = b'Z';
    bytes[127] = b'Z';
    let err = reader::read(Cursor::new(bytes)).unwrap_err();
    match err {
        CodecError::MalformedHeader { reason } => {
            assert!(reason.contains("ZZ"), "{reason}");
        }
        other => panic!("expected MalformedHeader, got {other:?}"),
    }
}

#[test]
fn declared_size_past_ceiling_rejected_before_allocation() {
    let order = Endianness::Little;
    let mut bytes = valid_container();
    // Element declaring a 2 GiB + 1 payload that does not exist.
    let mut tag = [0u8; 8];
    order.write_u32(&mut tag[0..4], TypeId::Matrix as u32);
    order.write_u32(&mut tag[4..8], 2_147_483_649);
    bytes.extend_from_slice(&tag);

    let err = reader::read(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, CodecError::TagTooLarge { .. }));
}

#[test]
fn truncation_mid_element_reports_offsets() {
    let mut bytes = valid_container();
    bytes.truncate(HEADER_LEN + 20);
    let err = reader::read(Cursor::new(bytes)).unwrap_err();
    match err {
        CodecError::TruncatedInput {
            needed, available, ..
        } => assert!(available < needed),
        other => panic!("expected TruncatedInput, got {other:?}"),
    }
}

#[test]
fn overflowing_dimension_product_rejected() {
    let order = Endianness::Little;
    let mut bytes = valid_container();

    // Hand-build a matrix element whose dimension product overflows i64:
    // flags, then three i32::MAX dimensions.
    let mut content = Vec::new();
    let mut flags = [0u8; 8];
    order.write_u32(&mut flags[4..8], 6); // double class
    content.extend_from_slice(&encode_sub(TypeId::UInt32, &flags, order));
    let mut dims = [0u8; 12];
    for chunk in dims.chunks_exact_mut(4) {
        order.write_u32(chunk, i32::MAX as u32);
    }
    content.extend_from_slice(&encode_sub(TypeId::Int32, &dims, order));
    content.extend_from_slice(&encode_sub(TypeId::Int8, b"evil", order));
    content.extend_from_slice(&encode_sub(TypeId::Double, &[], order));

    let mut tag = [0u8; 8];
    order.write_u32(&mut tag[0..4], TypeId::Matrix as u32);
    order.write_u32(&mut tag[4..8], content.len() as u32);
    bytes.extend_from_slice(&tag);
    bytes.extend_from_slice(&content);

    let err = reader::read(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, CodecError::DimensionOverflow { .. }));
}

#[test]
fn compressed_element_is_a_hard_error() {
    let order = Endianness::Little;
    let mut bytes = valid_container();
    let mut tag = [0u8; 8];
    order.write_u32(&mut tag[0..4], TypeId::Compressed as u32);
    order.write_u32(&mut tag[4..8], 16);
    bytes.extend_from_slice(&tag);
    bytes.extend_from_slice(&[0u8; 16]);

    let err = reader::read(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedType { .. }));
}

#[test]
fn unknown_top_level_elements_are_skipped_not_fatal() {
    let order = Endianness::Little;
    let mut bytes = valid_container();
    let mut tag = [0u8; 8];
    order.write_u32(&mut tag[0..4], 12345);
    order.write_u32(&mut tag[4..8], 24);
    bytes.extend_from_slice(&tag);
    bytes.extend_from_slice(&[0xAB; 24]);

    let file = reader::read(Cursor::new(bytes)).unwrap();
    assert_eq!(file.variables.len(), 1);
    assert_eq!(file.variables[0].name, "ok");
}

#[test]
fn hdf_style_container_directed_elsewhere() {
    let mut bytes = vec![0u8; 256];
    bytes[..8].copy_from_slice(&[0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n']);
    let err = reader::read(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, CodecError::UnsupportedVersion { .. }));
}

// Normal-layout sub-element: tag, payload, zero padding.
fn encode_sub(type_id: TypeId, payload: &[u8], order: Endianness) -> Vec<u8> {
    let pad = (8 - payload.len() % 8) % 8;
    let mut buf = vec![0u8; 8 + payload.len() + pad];
    order.write_u32(&mut buf[0..4], type_id as u32);
    order.write_u32(&mut buf[4..8], payload.len() as u32);
    buf[8..8 + payload.len()].copy_from_slice(payload);
    buf
}
