//! Resource bounds for untrusted input.
//!
//! Three families of checks guard the codec against resource exhaustion:
//! the tag size ceiling, dimension-product overflow, and the decompression
//! bounds. All are pure functions consulted before the allocation they
//! protect.

use crate::error::{CodecError, CodecResult};

/// Ceiling for any single normal-tag payload: 2 GiB inclusive. A size of
/// exactly 2 GiB is accepted; one byte more is a hard decode error.
pub const MAX_TAG_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Maximum allowed size after decompressing a compressed element (100 MiB).
pub const MAX_DECOMPRESSED_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum allowed compression ratio. Typical zlib streams land between
/// 2:1 and 10:1; anything near 1000:1 is a bomb.
pub const MAX_COMPRESSION_RATIO: u64 = 1000;

/// Reject a declared tag payload size above [`MAX_TAG_SIZE`]. Must run
/// before any buffer sized by the tag is allocated.
pub fn check_tag_size(size: u32) -> CodecResult<()> {
    if u64::from(size) > MAX_TAG_SIZE {
        return Err(CodecError::TagTooLarge {
            size: u64::from(size),
            limit: MAX_TAG_SIZE,
        });
    }
    Ok(())
}

/// Checked product of a dimension list in a 64-bit signed accumulator.
///
/// Used on the read path, where zero or negative entries in third-party
/// files are tolerated (the product is still guarded against overflow).
/// The write path goes through [`validate_dimensions`] instead.
pub fn checked_product(dimensions: &[i32]) -> CodecResult<i64> {
    let mut total: i64 = 1;
    for &d in dimensions {
        let d = i64::from(d);
        // Guard before multiplying so the overflow itself never happens.
        if d > 0 && total > i64::MAX / d {
            return Err(CodecError::DimensionOverflow {
                dimensions: dimensions.to_vec(),
            });
        }
        total *= d;
    }
    Ok(total)
}

/// Strict dimension validation for the write path: non-empty, every entry
/// positive (error cites the offending index), product within a 64-bit
/// signed accumulator. Returns the element count.
pub fn validate_dimensions(dimensions: &[i32]) -> CodecResult<i64> {
    if dimensions.is_empty() {
        return Err(CodecError::empty_dimensions());
    }
    let mut total: i64 = 1;
    for (i, &d) in dimensions.iter().enumerate() {
        if d <= 0 {
            return Err(CodecError::nonpositive_dimension(i, d));
        }
        let d = i64::from(d);
        if total > i64::MAX / d {
            return Err(CodecError::DimensionOverflow {
                dimensions: dimensions.to_vec(),
            });
        }
        total *= d;
    }
    Ok(total)
}

/// Incremental decompression bound, designed to be consulted while a
/// compressed stream is being inflated rather than only after the fact:
/// `produced` is the byte count inflated so far, `compressed` the size of
/// the compressed payload it came from.
pub fn check_compressed_bounds(produced: u64, compressed: u64) -> CodecResult<()> {
    if produced > MAX_DECOMPRESSED_SIZE {
        return Err(CodecError::Validation {
            reason: format!(
                "decompressed size exceeds limit: {produced} > {MAX_DECOMPRESSED_SIZE} bytes"
            ),
        });
    }
    if compressed > 0 && produced / compressed > MAX_COMPRESSION_RATIO {
        return Err(CodecError::Validation {
            reason: format!(
                "compression ratio too high: {}:1 (max {MAX_COMPRESSION_RATIO}:1)",
                produced / compressed
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_size_ceiling_edges() {
        // 2 GiB exactly is fine
        assert!(check_tag_size(2_147_483_648).is_ok());
        // One byte more is not
        assert!(matches!(
            check_tag_size(2_147_483_649),
            Err(CodecError::TagTooLarge { .. })
        ));
        assert!(matches!(
            check_tag_size(u32::MAX),
            Err(CodecError::TagTooLarge { .. })
        ));
        assert!(check_tag_size(0).is_ok());
    }

    #[test]
    fn test_validate_dimensions_product() {
        assert_eq!(validate_dimensions(&[2, 3]).unwrap(), 6);
        assert_eq!(validate_dimensions(&[1]).unwrap(), 1);
    }

    #[test]
    fn test_dimension_overflow_detected_before_multiply() {
        let dims = [i32::MAX, i32::MAX, i32::MAX];
        let err = validate_dimensions(&dims).unwrap_err();
        assert!(matches!(err, CodecError::DimensionOverflow { .. }));
    }

    #[test]
    fn test_nonpositive_dimension_cites_index() {
        let err = validate_dimensions(&[3, 0, 2]).unwrap_err();
        assert!(err.to_string().contains("dimension[1]"));
        let err = validate_dimensions(&[3, 2, -1]).unwrap_err();
        assert!(err.to_string().contains("dimension[2]"));
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        assert!(matches!(
            validate_dimensions(&[]),
            Err(CodecError::Validation { .. })
        ));
    }

    #[test]
    fn test_checked_product_tolerates_zero_on_read() {
        assert_eq!(checked_product(&[3, 0, 2]).unwrap(), 0);
        assert_eq!(checked_product(&[]).unwrap(), 1);
        assert!(checked_product(&[i32::MAX, i32::MAX, i32::MAX]).is_err());
    }

    #[test]
    fn test_decompression_bounds() {
        assert!(check_compressed_bounds(1024, 512).is_ok());
        assert!(check_compressed_bounds(MAX_DECOMPRESSED_SIZE, 1024 * 1024).is_ok());
        assert!(check_compressed_bounds(MAX_DECOMPRESSED_SIZE + 1, 1024 * 1024).is_err());
        // 2000:1 ratio trips the bomb check even under the size limit
        assert!(check_compressed_bounds(2_000_000, 1_000).is_err());
        // Zero compressed size cannot divide; size limit still applies
        assert!(check_compressed_bounds(1024, 0).is_ok());
    }
}
