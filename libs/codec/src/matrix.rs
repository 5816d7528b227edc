//! # Matrix Codec - Named Array Elements
//!
//! ## Purpose
//!
//! Decodes and encodes one complete named array element. A matrix element
//! is an outer tag (type id 14) wrapping, in fixed order:
//!
//! ```text
//! 1. array flags    8 bytes: bit flags (bit 11 complex, bit 10 sparse)
//!                   in the low word, class id in the high word
//! 2. dimensions     N x 4-byte signed integers
//! 3. name           raw bytes (empty tolerated on read)
//! 4. real data      converted via the type conversion engine
//! 5. imaginary data present iff the complex bit is set
//! ```
//!
//! The outer tag's payload is read whole and re-parsed as an independent
//! bounded cursor, so a malformed inner tag can never read past the
//! matrix's declared extent. Any failure at any step aborts the whole
//! matrix; no partial variable is returned.

use crate::convert;
use crate::cursor::ByteCursor;
use crate::error::{CodecError, CodecResult};
use crate::tag;
use crate::validation::{checked_product, validate_variable};
use matbin_types::{ClassId, ElementType, Endianness, TypeId, Variable};
use tracing::trace;

/// Complex bit (bit 11) in the array-flags word.
const FLAG_COMPLEX: u32 = 0x0800;

/// Sparse bit (bit 10) in the array-flags word.
const FLAG_SPARSE: u32 = 0x0400;

/// Decode a complete matrix element from the byte range declared by its
/// outer tag.
pub fn decode(content: &[u8], order: Endianness) -> CodecResult<Variable> {
    let mut cursor = ByteCursor::new(content);

    // Sub-element 1: array flags
    let flags_tag = tag::decode(&mut cursor, order)?;
    let flags_data = tag::read_payload(&mut cursor, &flags_tag)?;
    if flags_data.len() != 8 {
        return Err(CodecError::Validation {
            reason: format!(
                "array flags sub-element must be 8 bytes, got {}",
                flags_data.len()
            ),
        });
    }
    let flags = order.read_u32(&flags_data[0..4]);
    let class_word = order.read_u32(&flags_data[4..8]);
    let is_complex = flags & FLAG_COMPLEX != 0;
    let is_sparse = flags & FLAG_SPARSE != 0;
    let element_type = ClassId::try_from(class_word)
        .map(ElementType::from)
        .unwrap_or(ElementType::Unknown);

    // Sub-element 2: dimensions
    let dims_tag = tag::decode(&mut cursor, order)?;
    let dims_data = tag::read_payload(&mut cursor, &dims_tag)?;
    let dimensions: Vec<i32> = dims_data
        .chunks_exact(4)
        .map(|c| order.read_i32(c))
        .collect();
    // Overflow guard; zero-sized arrays from other producers are tolerated
    checked_product(&dimensions)?;

    // Sub-element 3: name
    let name_tag = tag::decode(&mut cursor, order)?;
    let name_data = tag::read_payload(&mut cursor, &name_tag)?;
    let name = String::from_utf8_lossy(name_data).into_owned();

    // Sub-element 4: real data
    let real_tag = tag::decode(&mut cursor, order)?;
    let real_data = tag::read_payload(&mut cursor, &real_tag)?;
    let real = convert::decode(real_data, real_tag.type_id, order);

    // Sub-element 5: imaginary data, only when the complex bit is set
    let imag = if is_complex {
        let imag_tag = tag::decode(&mut cursor, order)?;
        let imag_data = tag::read_payload(&mut cursor, &imag_tag)?;
        Some(convert::decode(imag_data, imag_tag.type_id, order))
    } else {
        None
    };

    trace!(
        name = %name,
        ?element_type,
        is_complex,
        dims = ?dimensions,
        "decoded matrix element"
    );

    Ok(Variable {
        name,
        dimensions,
        element_type,
        is_complex,
        is_sparse,
        real,
        imag,
    })
}

/// Encode the inner content of a matrix element: the concatenation of its
/// sub-elements, each in the normal tag layout. The caller wraps this in
/// the outer matrix tag.
pub fn encode_content(v: &Variable, order: Endianness) -> CodecResult<Vec<u8>> {
    validate_variable(v)?;

    let mut content = Vec::new();

    // Sub-element 1: array flags
    let mut flags: u32 = 0;
    if v.is_complex {
        flags |= FLAG_COMPLEX;
    }
    if v.is_sparse {
        flags |= FLAG_SPARSE;
    }
    // Validation guarantees an encodable element type with a class id
    let class = v
        .element_type
        .class_id()
        .ok_or_else(|| CodecError::unencodable_type(v.element_type))?;
    let mut flags_data = [0u8; 8];
    order.write_u32(&mut flags_data[0..4], flags);
    order.write_u32(&mut flags_data[4..8], class as u32);
    content.extend_from_slice(&tag::encode(TypeId::UInt32 as u32, &flags_data, order));

    // Sub-element 2: dimensions
    let mut dims_data = vec![0u8; v.dimensions.len() * 4];
    for (chunk, &d) in dims_data.chunks_exact_mut(4).zip(&v.dimensions) {
        order.write_u32(chunk, d as u32);
    }
    content.extend_from_slice(&tag::encode(TypeId::Int32 as u32, &dims_data, order));

    // Sub-element 3: name
    content.extend_from_slice(&tag::encode(TypeId::Int8 as u32, v.name.as_bytes(), order));

    // Sub-element 4: real data
    let (real_type, real_bytes) = convert::encode(&v.real, order);
    content.extend_from_slice(&tag::encode(real_type as u32, &real_bytes, order));

    // Sub-element 5: imaginary data
    if v.is_complex {
        // Presence checked by validation
        let imag = v
            .imag
            .as_ref()
            .ok_or_else(|| CodecError::missing_payload("imaginary"))?;
        let (imag_type, imag_bytes) = convert::encode(imag, order);
        content.extend_from_slice(&tag::encode(imag_type as u32, &imag_bytes, order));
    }

    Ok(content)
}

/// Encode one complete matrix element: outer matrix tag, content, zero
/// padding to the next 8-byte boundary.
pub fn encode_element(v: &Variable, order: Endianness) -> CodecResult<Vec<u8>> {
    let content = encode_content(v, order)?;
    Ok(tag::encode(TypeId::Matrix as u32, &content, order))
}
