//! # Element Type Registry - v5 Container Type System
//!
//! ## Purpose
//!
//! Central registry mapping the three type namespaces of the v5 format onto
//! each other: the abstract [`ElementType`] used by the API, the on-disk
//! [`TypeId`] naming the raw encoding of one physical sub-block, and the
//! on-disk [`ClassId`] naming the logical type of a whole variable. Keeping
//! the mapping in one place is what guarantees the decoder, the encoder and
//! the class-id translation cannot disagree about a type.
//!
//! ## Type Id vs Class Id
//!
//! The two on-disk namespaces use different numbering: `TypeId::Double` is 9
//! while `ClassId::Double` is 6. A double-precision variable is declared with
//! class id 6 in its array-flags sub-element, and its data sub-element is
//! tagged with type id 9.

use num_enum::TryFromPrimitive;

/// On-disk data type identifier for one TLV sub-block.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum TypeId {
    Int8 = 1,
    UInt8 = 2,
    Int16 = 3,
    UInt16 = 4,
    Int32 = 5,
    UInt32 = 6,
    Single = 7,
    Double = 9,
    Int64 = 12,
    UInt64 = 13,
    /// Marker for a complete matrix element wrapping nested sub-elements.
    Matrix = 14,
    /// Marker for a zlib-compressed element.
    Compressed = 15,
    Utf8 = 16,
}

impl TypeId {
    /// Element width in bytes, or `None` for marker and text types whose
    /// payload is not an array of fixed-width scalars.
    pub fn element_width(&self) -> Option<usize> {
        match self {
            TypeId::Int8 | TypeId::UInt8 => Some(1),
            TypeId::Int16 | TypeId::UInt16 => Some(2),
            TypeId::Int32 | TypeId::UInt32 | TypeId::Single => Some(4),
            TypeId::Int64 | TypeId::UInt64 | TypeId::Double => Some(8),
            TypeId::Matrix | TypeId::Compressed | TypeId::Utf8 => None,
        }
    }
}

/// On-disk array class identifier carried in the array-flags sub-element.
///
/// Distinct numbering from [`TypeId`]; identifies the variable's logical
/// element type rather than the raw encoding of a sub-block.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum ClassId {
    Cell = 1,
    Struct = 2,
    Object = 3,
    Char = 4,
    Double = 6,
    Single = 7,
    Int8 = 8,
    UInt8 = 9,
    Int16 = 10,
    UInt16 = 11,
    Int32 = 12,
    UInt32 = 13,
    Int64 = 14,
    UInt64 = 15,
}

/// Abstract element type of a container variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Double,
    Single,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Char,
    Struct,
    Cell,
    Object,
    /// Class id not recognized by this implementation. Decoded payloads are
    /// preserved as raw bytes for inspection.
    Unknown,
}

impl ElementType {
    /// Type id used to encode this element type's data sub-element, or
    /// `None` for aggregate and unknown types this engine cannot encode.
    pub fn type_id(&self) -> Option<TypeId> {
        match self {
            ElementType::Double => Some(TypeId::Double),
            ElementType::Single => Some(TypeId::Single),
            ElementType::Int8 => Some(TypeId::Int8),
            ElementType::UInt8 => Some(TypeId::UInt8),
            ElementType::Int16 => Some(TypeId::Int16),
            ElementType::UInt16 => Some(TypeId::UInt16),
            ElementType::Int32 => Some(TypeId::Int32),
            ElementType::UInt32 => Some(TypeId::UInt32),
            ElementType::Int64 => Some(TypeId::Int64),
            ElementType::UInt64 => Some(TypeId::UInt64),
            ElementType::Char => Some(TypeId::Utf8),
            ElementType::Struct | ElementType::Cell | ElementType::Object | ElementType::Unknown => {
                None
            }
        }
    }

    /// Class id used to declare this element type in array flags, or `None`
    /// for `Unknown`.
    pub fn class_id(&self) -> Option<ClassId> {
        match self {
            ElementType::Double => Some(ClassId::Double),
            ElementType::Single => Some(ClassId::Single),
            ElementType::Int8 => Some(ClassId::Int8),
            ElementType::UInt8 => Some(ClassId::UInt8),
            ElementType::Int16 => Some(ClassId::Int16),
            ElementType::UInt16 => Some(ClassId::UInt16),
            ElementType::Int32 => Some(ClassId::Int32),
            ElementType::UInt32 => Some(ClassId::UInt32),
            ElementType::Int64 => Some(ClassId::Int64),
            ElementType::UInt64 => Some(ClassId::UInt64),
            ElementType::Char => Some(ClassId::Char),
            ElementType::Struct => Some(ClassId::Struct),
            ElementType::Cell => Some(ClassId::Cell),
            ElementType::Object => Some(ClassId::Object),
            ElementType::Unknown => None,
        }
    }

    /// True for the ten fixed-width numeric kinds this engine can encode.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ElementType::Double
                | ElementType::Single
                | ElementType::Int8
                | ElementType::UInt8
                | ElementType::Int16
                | ElementType::UInt16
                | ElementType::Int32
                | ElementType::UInt32
                | ElementType::Int64
                | ElementType::UInt64
        )
    }
}

impl From<ClassId> for ElementType {
    fn from(class: ClassId) -> Self {
        match class {
            ClassId::Double => ElementType::Double,
            ClassId::Single => ElementType::Single,
            ClassId::Int8 => ElementType::Int8,
            ClassId::UInt8 => ElementType::UInt8,
            ClassId::Int16 => ElementType::Int16,
            ClassId::UInt16 => ElementType::UInt16,
            ClassId::Int32 => ElementType::Int32,
            ClassId::UInt32 => ElementType::UInt32,
            ClassId::Int64 => ElementType::Int64,
            ClassId::UInt64 => ElementType::UInt64,
            ClassId::Char => ElementType::Char,
            ClassId::Struct => ElementType::Struct,
            ClassId::Cell => ElementType::Cell,
            ClassId::Object => ElementType::Object,
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ElementType::Double => "double",
            ElementType::Single => "single",
            ElementType::Int8 => "int8",
            ElementType::UInt8 => "uint8",
            ElementType::Int16 => "int16",
            ElementType::UInt16 => "uint16",
            ElementType::Int32 => "int32",
            ElementType::UInt32 => "uint32",
            ElementType::Int64 => "int64",
            ElementType::UInt64 => "uint64",
            ElementType::Char => "char",
            ElementType::Struct => "struct",
            ElementType::Cell => "cell",
            ElementType::Object => "object",
            ElementType::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}
