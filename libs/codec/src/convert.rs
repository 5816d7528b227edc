//! # Type Conversion Engine - Raw Bytes to Typed Payloads
//!
//! ## Purpose
//!
//! Bidirectional mapping between [`NumericPayload`] variants and their raw
//! byte encodings, applying the active byte order. Ten fixed-width numeric
//! kinds, a UTF-8 text kind decoded as one value, and a raw passthrough for
//! type ids this implementation does not recognize.
//!
//! ## Decode Tolerance
//!
//! Decoding deliberately degrades gracefully on payloads whose length is
//! not a multiple of the element width: the integral elements that fit are
//! decoded and the ragged tail is discarded (container files in the wild
//! are sometimes slightly malformed but salvageable). That tolerance is
//! limited to this module; size fields and tags elsewhere are validated
//! strictly.

use matbin_types::{Endianness, NumericPayload, TypeId};
use tracing::warn;

/// Decode a payload's raw bytes according to its on-disk type id.
///
/// Unrecognized ids produce [`NumericPayload::Raw`] rather than an error,
/// keeping forward-compatible files inspectable.
pub fn decode(data: &[u8], type_id: u32, order: Endianness) -> NumericPayload {
    let known = match TypeId::try_from(type_id) {
        Ok(id) => id,
        Err(_) => return NumericPayload::Raw(data.to_vec()),
    };

    if let Some(width) = known.element_width() {
        let tail = data.len() % width;
        if tail != 0 {
            warn!(
                type_id,
                payload_len = data.len(),
                discarded = tail,
                "payload length not a multiple of element width; discarding tail"
            );
        }
    }

    match known {
        TypeId::Double => NumericPayload::Double(
            data.chunks_exact(8)
                .map(|c| f64::from_bits(order.read_u64(c)))
                .collect(),
        ),
        TypeId::Single => NumericPayload::Single(
            data.chunks_exact(4)
                .map(|c| f32::from_bits(order.read_u32(c)))
                .collect(),
        ),
        TypeId::Int8 => NumericPayload::Int8(data.iter().map(|&b| b as i8).collect()),
        TypeId::UInt8 => NumericPayload::UInt8(data.to_vec()),
        TypeId::Int16 => NumericPayload::Int16(
            data.chunks_exact(2)
                .map(|c| order.read_u16(c) as i16)
                .collect(),
        ),
        TypeId::UInt16 => NumericPayload::UInt16(
            data.chunks_exact(2).map(|c| order.read_u16(c)).collect(),
        ),
        TypeId::Int32 => NumericPayload::Int32(
            data.chunks_exact(4)
                .map(|c| order.read_u32(c) as i32)
                .collect(),
        ),
        TypeId::UInt32 => NumericPayload::UInt32(
            data.chunks_exact(4).map(|c| order.read_u32(c)).collect(),
        ),
        TypeId::Int64 => NumericPayload::Int64(
            data.chunks_exact(8)
                .map(|c| order.read_u64(c) as i64)
                .collect(),
        ),
        TypeId::UInt64 => NumericPayload::UInt64(
            data.chunks_exact(8).map(|c| order.read_u64(c)).collect(),
        ),
        TypeId::Utf8 => NumericPayload::Text(String::from_utf8_lossy(data).into_owned()),
        // Marker types carry no scalar payload of their own; preserve bytes
        TypeId::Matrix | TypeId::Compressed => NumericPayload::Raw(data.to_vec()),
    }
}

/// Encode a payload into raw bytes, returning the type id its data
/// sub-element must be tagged with.
pub fn encode(payload: &NumericPayload, order: Endianness) -> (TypeId, Vec<u8>) {
    match payload {
        NumericPayload::Double(values) => {
            let mut buf = vec![0u8; values.len() * 8];
            for (chunk, v) in buf.chunks_exact_mut(8).zip(values) {
                order.write_u64(chunk, v.to_bits());
            }
            (TypeId::Double, buf)
        }
        NumericPayload::Single(values) => {
            let mut buf = vec![0u8; values.len() * 4];
            for (chunk, v) in buf.chunks_exact_mut(4).zip(values) {
                order.write_u32(chunk, v.to_bits());
            }
            (TypeId::Single, buf)
        }
        NumericPayload::Int8(values) => {
            (TypeId::Int8, values.iter().map(|&v| v as u8).collect())
        }
        NumericPayload::UInt8(values) => (TypeId::UInt8, values.clone()),
        NumericPayload::Int16(values) => {
            let mut buf = vec![0u8; values.len() * 2];
            for (chunk, &v) in buf.chunks_exact_mut(2).zip(values) {
                order.write_u16(chunk, v as u16);
            }
            (TypeId::Int16, buf)
        }
        NumericPayload::UInt16(values) => {
            let mut buf = vec![0u8; values.len() * 2];
            for (chunk, &v) in buf.chunks_exact_mut(2).zip(values) {
                order.write_u16(chunk, v);
            }
            (TypeId::UInt16, buf)
        }
        NumericPayload::Int32(values) => {
            let mut buf = vec![0u8; values.len() * 4];
            for (chunk, &v) in buf.chunks_exact_mut(4).zip(values) {
                order.write_u32(chunk, v as u32);
            }
            (TypeId::Int32, buf)
        }
        NumericPayload::UInt32(values) => {
            let mut buf = vec![0u8; values.len() * 4];
            for (chunk, &v) in buf.chunks_exact_mut(4).zip(values) {
                order.write_u32(chunk, v);
            }
            (TypeId::UInt32, buf)
        }
        NumericPayload::Int64(values) => {
            let mut buf = vec![0u8; values.len() * 8];
            for (chunk, &v) in buf.chunks_exact_mut(8).zip(values) {
                order.write_u64(chunk, v as u64);
            }
            (TypeId::Int64, buf)
        }
        NumericPayload::UInt64(values) => {
            let mut buf = vec![0u8; values.len() * 8];
            for (chunk, &v) in buf.chunks_exact_mut(8).zip(values) {
                order.write_u64(chunk, v);
            }
            (TypeId::UInt64, buf)
        }
        NumericPayload::Text(text) => (TypeId::Utf8, text.as_bytes().to_vec()),
        // Raw passthrough re-encodes as plain bytes
        NumericPayload::Raw(bytes) => (TypeId::UInt8, bytes.clone()),
    }
}
