//! Named array variables.

use crate::element::ElementType;
use crate::payload::NumericPayload;

/// One named, typed, multi-dimensional array from a container.
///
/// Invariants enforced by the codec on write:
/// - `name` is non-empty and at most 63 bytes;
/// - `dimensions` is non-empty, every entry positive, and the element count
///   fits a 64-bit signed accumulator;
/// - if `is_complex`, `imag` is present with the same variant and length as
///   `real`.
///
/// Elements are stored in column-major order on disk; this model passes the
/// ordering through as received.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Variable name, at most 63 bytes.
    pub name: String,
    /// Array dimensions as stored on disk (4-byte signed integers).
    pub dimensions: Vec<i32>,
    /// Logical element type declared by the variable's class id.
    pub element_type: ElementType,
    /// True when the variable carries an imaginary part.
    pub is_complex: bool,
    /// True when the variable was flagged sparse. Sparse storage itself is
    /// not interpreted by this engine; the flag is round-tripped as is.
    pub is_sparse: bool,
    /// Real part data.
    pub real: NumericPayload,
    /// Imaginary part data, present iff `is_complex`.
    pub imag: Option<NumericPayload>,
}

impl Variable {
    /// Create a real-valued variable.
    pub fn new(
        name: impl Into<String>,
        dimensions: Vec<i32>,
        element_type: ElementType,
        real: NumericPayload,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions,
            element_type,
            is_complex: false,
            is_sparse: false,
            real,
            imag: None,
        }
    }

    /// Create a complex variable with separate real and imaginary parts.
    pub fn new_complex(
        name: impl Into<String>,
        dimensions: Vec<i32>,
        element_type: ElementType,
        real: NumericPayload,
        imag: NumericPayload,
    ) -> Self {
        Self {
            name: name.into(),
            dimensions,
            element_type,
            is_complex: true,
            is_sparse: false,
            real,
            imag: Some(imag),
        }
    }

    /// Total element count (product of dimensions), or `None` if the product
    /// overflows a 64-bit signed accumulator. Zero for an empty dimension
    /// list.
    pub fn element_count(&self) -> Option<i64> {
        if self.dimensions.is_empty() {
            return Some(0);
        }
        let mut total: i64 = 1;
        for &d in &self.dimensions {
            total = total.checked_mul(i64::from(d))?;
        }
        Some(total)
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {:?}", self.name, self.element_type, self.dimensions)
    }
}
