//! # Header Codec - 128-Byte File Header
//!
//! ## Purpose
//!
//! Encodes and decodes the fixed-size header that opens every v5 container:
//!
//! ```text
//! bytes 0-115   description text, right-padded with zero bytes
//! bytes 116-123 reserved, zero on encode, ignored on decode
//! bytes 124-125 version constant (0x0100), stored in the detected order
//! bytes 126-127 endian token, verbatim ASCII ("MI" little, "IM" big)
//! ```
//!
//! A successful decode fixes the byte order used for every subsequent
//! multi-byte field in the container. An unrecognized token is a hard
//! error, never a fallback.

use crate::error::{CodecError, CodecResult};
use matbin_types::{Endianness, Header, DESCRIPTION_LEN, HEADER_LEN};

/// Decode a 128-byte header block.
pub fn decode(block: &[u8; HEADER_LEN]) -> CodecResult<Header> {
    let token = [block[126], block[127]];
    let endianness =
        Endianness::from_token(token).ok_or_else(|| CodecError::invalid_endian_token(token))?;

    let version = endianness.read_u16(&block[124..126]);

    let description_bytes = &block[..DESCRIPTION_LEN];
    let trimmed_len = description_bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |i| i + 1);
    let description = String::from_utf8_lossy(&description_bytes[..trimmed_len]).into_owned();

    Ok(Header {
        description,
        version,
        endianness,
    })
}

/// Encode a header into its 128-byte on-disk form. Description text longer
/// than 116 bytes is truncated silently; the reserved region is zero.
pub fn encode(header: &Header) -> [u8; HEADER_LEN] {
    let mut block = [0u8; HEADER_LEN];

    let desc = header.description.as_bytes();
    let len = desc.len().min(DESCRIPTION_LEN);
    block[..len].copy_from_slice(&desc[..len]);

    header
        .endianness
        .write_u16(&mut block[124..126], header.version);
    block[126..128].copy_from_slice(&header.endianness.token());

    block
}
