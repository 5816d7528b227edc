//! # Tag Codec - TLV Element Tags
//!
//! ## Purpose
//!
//! Encodes and decodes the tag that opens every data element. The format
//! uses two tag layouts:
//!
//! ```text
//! normal:  [type id: u32][size: u32][payload: size bytes][zero padding]
//! compact: [size:1-4 | type id][4 inline payload bytes]      (8 bytes total)
//! ```
//!
//! A tag word whose upper 16 bits fall in 1..=4 is compact: the size lives
//! in those bits, the type id in the lower 16, and the next 4 bytes are the
//! payload itself. Anything else is a normal tag whose declared size is
//! checked against the 2 GiB ceiling before any buffer is allocated.
//!
//! The encoder always emits the normal layout - one deterministic,
//! round-trippable shape. Compact is a decode-only accommodation for files
//! produced elsewhere.

use crate::cursor::ByteCursor;
use crate::error::CodecResult;
use crate::validation::check_tag_size;
use matbin_types::Endianness;

/// Transient TLV element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementTag {
    /// Data type identifier of the payload.
    pub type_id: u32,
    /// Payload length in bytes.
    pub size: u32,
    /// True when the payload is packed inline in the tag's second word.
    pub compact: bool,
}

/// Padding after a normal-layout payload: up to the next multiple of 8
/// bytes, measured from the start of the tag.
pub fn padding_for(size: u32) -> usize {
    ((8 - size % 8) % 8) as usize
}

/// Decode one element tag. For a compact tag the cursor is left positioned
/// at the 4 inline payload bytes; for a normal tag it is left at the start
/// of the separate payload.
pub fn decode(cursor: &mut ByteCursor<'_>, order: Endianness) -> CodecResult<ElementTag> {
    let word = cursor.read_u32(order)?;

    // Compact layout: upper 16 bits carry a size of 1..=4
    let small_size = word >> 16;
    if (1..=4).contains(&small_size) {
        return Ok(ElementTag {
            type_id: word & 0xFFFF,
            size: small_size,
            compact: true,
        });
    }

    let size = cursor.read_u32(order)?;
    check_tag_size(size)?;

    Ok(ElementTag {
        type_id: word,
        size,
        compact: false,
    })
}

/// Consume the payload belonging to `tag` from the cursor, honoring the
/// layout's padding law: a compact element always occupies exactly 8 bytes
/// (4-byte tag word + 4 inline bytes, of which the first `size` are
/// payload); a normal element is followed by zero padding to the next
/// 8-byte boundary.
///
/// Trailing elements whose padding was cut short are tolerated; the codec
/// takes whatever padding is present.
pub fn read_payload<'a>(cursor: &mut ByteCursor<'a>, tag: &ElementTag) -> CodecResult<&'a [u8]> {
    if tag.compact {
        let inline = cursor.take(4)?;
        return Ok(&inline[..tag.size as usize]);
    }

    let payload = cursor.take(tag.size as usize)?;
    let pad = padding_for(tag.size).min(cursor.remaining());
    cursor.skip(pad)?;
    Ok(payload)
}

/// Encode one element in the normal layout: 8-byte tag, payload, zero
/// padding to the next multiple of 8.
pub fn encode(type_id: u32, payload: &[u8], order: Endianness) -> Vec<u8> {
    let size = payload.len() as u32;
    let padding = padding_for(size);

    let mut buf = vec![0u8; 8 + payload.len() + padding];
    order.write_u32(&mut buf[0..4], type_id);
    order.write_u32(&mut buf[4..8], size);
    buf[8..8 + payload.len()].copy_from_slice(payload);
    // Padding bytes are already zero

    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use matbin_types::TypeId;

    fn normal_tag_bytes(type_id: u32, size: u32, order: Endianness) -> [u8; 8] {
        let mut buf = [0u8; 8];
        order.write_u32(&mut buf[0..4], type_id);
        order.write_u32(&mut buf[4..8], size);
        buf
    }

    #[test]
    fn test_padding_law() {
        for (size, expected) in [(0u32, 0usize), (1, 7), (4, 4), (8, 0), (10, 6)] {
            assert_eq!(padding_for(size), expected, "size {size}");
        }
    }

    #[test]
    fn test_sizes_one_through_four_decode_compact() {
        for size in 1u32..=4 {
            let word = (size << 16) | TypeId::UInt8 as u32;
            let mut bytes = [0u8; 8];
            Endianness::Little.write_u32(&mut bytes[0..4], word);
            let mut cur = ByteCursor::new(&bytes);
            let tag = decode(&mut cur, Endianness::Little).unwrap();
            assert!(tag.compact, "size {size} must be compact");
            assert_eq!(tag.size, size);
            assert_eq!(tag.type_id, TypeId::UInt8 as u32);
            // Only the tag word is consumed; the inline payload is next
            assert_eq!(cur.position(), 4);
        }
    }

    #[test]
    fn test_size_five_and_up_decode_normal() {
        let bytes = normal_tag_bytes(TypeId::Double as u32, 5, Endianness::Little);
        let mut cur = ByteCursor::new(&bytes);
        let tag = decode(&mut cur, Endianness::Little).unwrap();
        assert!(!tag.compact);
        assert_eq!(tag.size, 5);
        assert_eq!(cur.position(), 8);
    }

    #[test]
    fn test_size_zero_is_normal() {
        let bytes = normal_tag_bytes(TypeId::Int8 as u32, 0, Endianness::Little);
        let mut cur = ByteCursor::new(&bytes);
        let tag = decode(&mut cur, Endianness::Little).unwrap();
        assert!(!tag.compact);
        assert_eq!(tag.size, 0);
    }

    #[test]
    fn test_tag_size_ceiling() {
        // Exactly 2 GiB decodes
        let bytes = normal_tag_bytes(TypeId::UInt8 as u32, 2_147_483_648, Endianness::Little);
        let mut cur = ByteCursor::new(&bytes);
        assert!(decode(&mut cur, Endianness::Little).is_ok());

        // 2 GiB + 1 is rejected before any allocation
        let bytes = normal_tag_bytes(TypeId::UInt8 as u32, 2_147_483_649, Endianness::Little);
        let mut cur = ByteCursor::new(&bytes);
        assert!(matches!(
            decode(&mut cur, Endianness::Little),
            Err(CodecError::TagTooLarge { .. })
        ));

        // All-ones size field is rejected
        let bytes = normal_tag_bytes(TypeId::UInt8 as u32, 0xFFFF_FFFF, Endianness::Little);
        let mut cur = ByteCursor::new(&bytes);
        assert!(matches!(
            decode(&mut cur, Endianness::Little),
            Err(CodecError::TagTooLarge { .. })
        ));
    }

    #[test]
    fn test_encoder_always_emits_normal_layout() {
        // Even a 2-byte payload, which a compact tag could hold, is written
        // in the normal layout.
        let encoded = encode(TypeId::UInt8 as u32, &[0xAA, 0xBB], Endianness::Little);
        assert_eq!(encoded.len(), 16); // 8 tag + 2 payload + 6 padding
        let mut cur = ByteCursor::new(&encoded);
        let tag = decode(&mut cur, Endianness::Little).unwrap();
        assert!(!tag.compact);
        assert_eq!(tag.size, 2);
        let payload = read_payload(&mut cur, &tag).unwrap();
        assert_eq!(payload, &[0xAA, 0xBB]);
        assert!(cur.is_empty());
    }

    #[test]
    fn test_padded_region_is_zero() {
        for payload_len in [0usize, 1, 4, 8, 10] {
            let payload = vec![0xFFu8; payload_len];
            let encoded = encode(TypeId::UInt8 as u32, &payload, Endianness::Little);
            let pad = padding_for(payload_len as u32);
            assert_eq!(encoded.len(), 8 + payload_len + pad);
            assert!(
                encoded[8 + payload_len..].iter().all(|&b| b == 0),
                "padding after {payload_len}-byte payload must be zero"
            );
        }
    }

    #[test]
    fn test_compact_payload_extraction() {
        // Compact tag, size 3, inline payload [1,2,3] with one slack byte
        let word = (3u32 << 16) | TypeId::Int8 as u32;
        let mut bytes = [0u8; 8];
        Endianness::Little.write_u32(&mut bytes[0..4], word);
        bytes[4..8].copy_from_slice(&[1, 2, 3, 0xEE]);
        let mut cur = ByteCursor::new(&bytes);
        let tag = decode(&mut cur, Endianness::Little).unwrap();
        let payload = read_payload(&mut cur, &tag).unwrap();
        assert_eq!(payload, &[1, 2, 3]);
        // The whole compact element is exactly 8 bytes, slack included
        assert!(cur.is_empty());
    }

    #[test]
    fn test_big_endian_tag_words() {
        let encoded = encode(TypeId::Double as u32, &[0u8; 16], Endianness::Big);
        assert_eq!(&encoded[0..4], &[0, 0, 0, 9]);
        assert_eq!(&encoded[4..8], &[0, 0, 0, 16]);
        let mut cur = ByteCursor::new(&encoded);
        let tag = decode(&mut cur, Endianness::Big).unwrap();
        assert_eq!(tag.type_id, TypeId::Double as u32);
        assert_eq!(tag.size, 16);
    }

    #[test]
    fn test_truncated_normal_tag() {
        let bytes = [0u8; 6]; // not even a full tag
        let mut cur = ByteCursor::new(&bytes);
        let word = decode(&mut cur, Endianness::Little);
        assert!(matches!(word, Err(CodecError::TruncatedInput { .. })));
    }
}
