//! Codec errors for v5 container processing.
//!
//! Every decode or encode step fails fast: the first violation aborts the
//! operation and no partial variable or partial file is ever surfaced. Each
//! variant carries the context needed to diagnose the specific malformed
//! input - the offending size, the offending dimension index, the expected
//! versus actual element kind.

use matbin_types::ElementType;
use thiserror::Error;

/// Errors produced by the v5 codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Header bytes do not form a valid v5 header (bad endian token,
    /// truncated header block).
    #[error("malformed header: {reason}")]
    MalformedHeader { reason: String },

    /// A normal tag declared a payload size above the 2 GiB ceiling.
    /// Raised before any buffer is allocated for the payload.
    #[error("tag size too large: {size} bytes (max {limit})")]
    TagTooLarge { size: u64, limit: u64 },

    /// Dimension product overflows a 64-bit signed accumulator.
    #[error("dimension product overflows (total elements too large): {dimensions:?}")]
    DimensionOverflow { dimensions: Vec<i32> },

    /// Write-time element type does not match the supplied payload variant,
    /// or an element kind this engine cannot process was encountered.
    #[error("unsupported type: expected {expected}, got {actual}")]
    UnsupportedType { expected: String, actual: String },

    /// A variable failed write-side validation.
    #[error("invalid variable: {reason}")]
    Validation { reason: String },

    /// The byte source ended in the middle of an element.
    #[error("truncated input: need {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        needed: usize,
        available: usize,
        offset: usize,
    },

    /// An unrecognized container version was requested at create time, or a
    /// container in a different format family was handed to this engine.
    #[error("unsupported container version: {requested}")]
    UnsupportedVersion { requested: String },

    /// Failure reported by an external hierarchical-format backend.
    #[error("backend error: {0}")]
    Backend(String),

    /// Underlying stream failure.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Bad endian token in a header. The token is reported both as ASCII
    /// and as hex so corrupted bytes stay diagnosable.
    pub fn invalid_endian_token(token: [u8; 2]) -> Self {
        Self::MalformedHeader {
            reason: format!(
                "invalid endian token {:?} ({:02x} {:02x}); expected \"MI\" or \"IM\"",
                String::from_utf8_lossy(&token),
                token[0],
                token[1]
            ),
        }
    }

    pub fn truncated_header(got: usize) -> Self {
        Self::MalformedHeader {
            reason: format!("truncated header: got {got} bytes, need 128"),
        }
    }

    pub fn truncated(needed: usize, available: usize, offset: usize) -> Self {
        Self::TruncatedInput {
            needed,
            available,
            offset,
        }
    }

    /// Write-time mismatch between a variable's declared element type and
    /// the payload variant actually supplied.
    pub fn type_mismatch(expected: ElementType, actual: ElementType) -> Self {
        Self::UnsupportedType {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Element type with no v5 numeric encoding (struct, cell, object,
    /// unknown) supplied on the write path.
    pub fn unencodable_type(actual: ElementType) -> Self {
        Self::UnsupportedType {
            expected: "a numeric or char element type".to_string(),
            actual: actual.to_string(),
        }
    }

    /// Compressed elements are recognized but rejected; the decompression
    /// path is not implemented, only its resource bounds are.
    pub fn compressed_unsupported() -> Self {
        Self::UnsupportedType {
            expected: "an uncompressed matrix element".to_string(),
            actual: "compressed element".to_string(),
        }
    }

    pub fn empty_name() -> Self {
        Self::Validation {
            reason: "variable name is required".to_string(),
        }
    }

    pub fn name_too_long(len: usize) -> Self {
        Self::Validation {
            reason: format!("variable name too long (max 63 bytes): {len}"),
        }
    }

    pub fn empty_dimensions() -> Self {
        Self::Validation {
            reason: "dimensions are required".to_string(),
        }
    }

    pub fn nonpositive_dimension(index: usize, value: i32) -> Self {
        Self::Validation {
            reason: format!("dimension[{index}] must be positive, got {value}"),
        }
    }

    pub fn missing_payload(part: &str) -> Self {
        Self::Validation {
            reason: format!("{part} data is required"),
        }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
