//! Array payload union.

use crate::element::ElementType;

/// Decoded array data: exactly one concrete primitive slice per payload,
/// matching the owning variable's declared element type.
///
/// Replacing the source format's "anything goes" payload slot with a closed
/// union means every conversion and validation path can match exhaustively;
/// adding a kind is a compile error until all of them handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericPayload {
    Double(Vec<f64>),
    Single(Vec<f32>),
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
    /// UTF-8 text, decoded as one value rather than an array of scalars.
    Text(String),
    /// Raw byte passthrough for sub-blocks with an unrecognized type id.
    /// Kept for forward compatibility and inspection; never encodable.
    Raw(Vec<u8>),
}

impl NumericPayload {
    /// The element type this payload variant corresponds to.
    pub fn element_type(&self) -> ElementType {
        match self {
            NumericPayload::Double(_) => ElementType::Double,
            NumericPayload::Single(_) => ElementType::Single,
            NumericPayload::Int8(_) => ElementType::Int8,
            NumericPayload::UInt8(_) => ElementType::UInt8,
            NumericPayload::Int16(_) => ElementType::Int16,
            NumericPayload::UInt16(_) => ElementType::UInt16,
            NumericPayload::Int32(_) => ElementType::Int32,
            NumericPayload::UInt32(_) => ElementType::UInt32,
            NumericPayload::Int64(_) => ElementType::Int64,
            NumericPayload::UInt64(_) => ElementType::UInt64,
            NumericPayload::Text(_) => ElementType::Char,
            NumericPayload::Raw(_) => ElementType::Unknown,
        }
    }

    /// Number of elements held: scalar count for numeric variants, character
    /// count for text, byte count for raw passthrough.
    pub fn len(&self) -> usize {
        match self {
            NumericPayload::Double(v) => v.len(),
            NumericPayload::Single(v) => v.len(),
            NumericPayload::Int8(v) => v.len(),
            NumericPayload::UInt8(v) => v.len(),
            NumericPayload::Int16(v) => v.len(),
            NumericPayload::UInt16(v) => v.len(),
            NumericPayload::Int32(v) => v.len(),
            NumericPayload::UInt32(v) => v.len(),
            NumericPayload::Int64(v) => v.len(),
            NumericPayload::UInt64(v) => v.len(),
            NumericPayload::Text(s) => s.chars().count(),
            NumericPayload::Raw(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_element_types() {
        assert_eq!(
            NumericPayload::Double(vec![1.0]).element_type(),
            ElementType::Double
        );
        assert_eq!(
            NumericPayload::Int32(vec![1]).element_type(),
            ElementType::Int32
        );
        assert_eq!(
            NumericPayload::Text("abc".into()).element_type(),
            ElementType::Char
        );
        assert_eq!(
            NumericPayload::Raw(vec![0xde, 0xad]).element_type(),
            ElementType::Unknown
        );
    }

    #[test]
    fn test_len() {
        assert_eq!(NumericPayload::Double(vec![1.0, 2.0, 3.0]).len(), 3);
        assert_eq!(NumericPayload::Text("héllo".into()).len(), 5);
        assert!(NumericPayload::UInt8(vec![]).is_empty());
    }
}
