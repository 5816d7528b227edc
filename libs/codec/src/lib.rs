//! # matbin Codec - v5 Container Rules
//!
//! ## Purpose
//!
//! This crate contains the "rules" layer of matbin: every byte-level
//! decision about the v5 scientific-array container lives here:
//! - Header encoding/decoding and byte-order detection
//! - TLV element tag handling (normal and compact layouts)
//! - Typed payload conversion in both byte orders
//! - Matrix element assembly and validation
//! - Resource bounds for untrusted input
//! - Streaming file reader and writer
//! - Hierarchical-backend (7.3-style) adapter traits and translation
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types  →  [codec]          →  callers
//!     ↑             ↓
//! Pure Data    Container Rules
//! Structures   Validation/Encoding
//! Variable     MatReader/MatWriter
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Data structure definitions (belong in `matbin-types`)
//! - Numeric computation on decoded arrays
//! - A compression codec (compressed elements are recognized, bounded,
//!   and rejected)
//! - A hierarchical storage engine (only the adapter interface)
//!
//! ## Safety Posture
//!
//! All input is treated as untrusted. Declared sizes are checked against
//! hard ceilings before any allocation, dimension products are guarded
//! against overflow before multiplication, and nested elements are parsed
//! through bounded cursors that cannot read past their parent's extent.
//! The first violation aborts the operation; no partial results surface.

pub mod convert;
pub mod cursor;
pub mod error;
pub mod hdf;
pub mod header;
pub mod matrix;
pub mod reader;
pub mod tag;
pub mod validation;
pub mod writer;

pub use cursor::ByteCursor;
pub use error::{CodecError, CodecResult};
pub use hdf::{
    load_variables, store_variable, AttrValue, Backend, Dataset, Group, Node, CLASS_ATTRIBUTE,
    COMPLEX_ATTRIBUTE,
};
pub use reader::{read, MatFile, MatReader};
pub use tag::ElementTag;
pub use validation::{
    check_tag_size, validate_dimensions, validate_variable, MAX_NAME_LEN, MAX_TAG_SIZE,
};
pub use writer::{FormatVersion, MatWriter, WriteOptions};

// Re-export the data model so callers depend on one crate.
pub use matbin_types as types;
