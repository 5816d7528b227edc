//! Validation rules consulted by both the read and write paths.
//!
//! All checks here are pure predicates over sizes and dimension lists; they
//! run before the corresponding allocation or I/O so that adversarial size
//! fields can never drive memory use.

pub mod bounds;

pub use bounds::{
    check_compressed_bounds, check_tag_size, checked_product, validate_dimensions,
    MAX_COMPRESSION_RATIO, MAX_DECOMPRESSED_SIZE, MAX_TAG_SIZE,
};

use crate::error::{CodecError, CodecResult};
use matbin_types::Variable;

/// Maximum variable name length in bytes.
pub const MAX_NAME_LEN: usize = 63;

/// Write-side validation of a complete variable, run before any bytes are
/// produced. First violation wins; nothing is partially encoded.
pub fn validate_variable(v: &Variable) -> CodecResult<()> {
    if v.name.is_empty() {
        return Err(CodecError::empty_name());
    }
    if v.name.len() > MAX_NAME_LEN {
        return Err(CodecError::name_too_long(v.name.len()));
    }
    validate_dimensions(&v.dimensions)?;

    let actual = v.real.element_type();
    if actual != v.element_type {
        return Err(CodecError::type_mismatch(v.element_type, actual));
    }
    if !v.element_type.is_numeric() && v.element_type != matbin_types::ElementType::Char {
        return Err(CodecError::unencodable_type(v.element_type));
    }

    if v.is_complex {
        let imag = v
            .imag
            .as_ref()
            .ok_or_else(|| CodecError::missing_payload("imaginary"))?;
        let imag_type = imag.element_type();
        if imag_type != v.element_type {
            return Err(CodecError::type_mismatch(v.element_type, imag_type));
        }
        if imag.len() != v.real.len() {
            return Err(CodecError::Validation {
                reason: format!(
                    "real and imaginary parts differ in length: {} vs {}",
                    v.real.len(),
                    imag.len()
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matbin_types::{ElementType, NumericPayload, Variable};

    fn sample() -> Variable {
        Variable::new(
            "a",
            vec![2, 3],
            ElementType::Double,
            NumericPayload::Double(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        )
    }

    #[test]
    fn test_valid_variable_passes() {
        assert!(validate_variable(&sample()).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut v = sample();
        v.name = String::new();
        assert!(matches!(
            validate_variable(&v),
            Err(CodecError::Validation { .. })
        ));
    }

    #[test]
    fn test_name_of_64_bytes_rejected() {
        let mut v = sample();
        v.name = "x".repeat(64);
        let err = validate_variable(&v).unwrap_err();
        assert!(err.to_string().contains("64"));
        // 63 bytes is the boundary and must pass
        v.name = "x".repeat(63);
        assert!(validate_variable(&v).is_ok());
    }

    #[test]
    fn test_zero_dimension_cites_index() {
        let mut v = sample();
        v.dimensions = vec![3, 0, 2];
        let err = validate_variable(&v).unwrap_err();
        assert!(err.to_string().contains("dimension[1]"));
    }

    #[test]
    fn test_type_payload_mismatch_names_both_kinds() {
        let mut v = sample();
        v.real = NumericPayload::Int32(vec![1, 2, 3, 4, 5, 6]);
        let err = validate_variable(&v).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("double"), "missing expected kind: {msg}");
        assert!(msg.contains("int32"), "missing actual kind: {msg}");
    }

    #[test]
    fn test_complex_without_imag_rejected() {
        let mut v = sample();
        v.is_complex = true;
        assert!(matches!(
            validate_variable(&v),
            Err(CodecError::Validation { .. })
        ));
    }

    #[test]
    fn test_complex_length_mismatch_rejected() {
        let mut v = sample();
        v.is_complex = true;
        v.imag = Some(NumericPayload::Double(vec![1.0]));
        let err = validate_variable(&v).unwrap_err();
        assert!(err.to_string().contains("differ in length"));
    }

    #[test]
    fn test_struct_variable_rejected_on_write() {
        let mut v = sample();
        v.element_type = ElementType::Struct;
        v.real = NumericPayload::Raw(vec![]);
        assert!(matches!(
            validate_variable(&v),
            Err(CodecError::UnsupportedType { .. })
        ));
    }
}
