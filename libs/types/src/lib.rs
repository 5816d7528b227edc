//! # matbin Types - v5 Container Data Model
//!
//! Pure data structures for the v5 scientific-array container format. This
//! crate defines *what* lives in a container file; the encoding and decoding
//! rules live in `matbin-codec`.
//!
//! ## Design Philosophy
//!
//! - **Closed unions over dynamic dispatch**: array payloads are a tagged
//!   union (`NumericPayload`) with one variant per supported primitive kind,
//!   so conversion and validation logic can match exhaustively instead of
//!   downcasting at runtime.
//! - **One registry, three namespaces**: the on-disk type id (raw encoding of
//!   a sub-block), the on-disk class id (logical type of a variable) and the
//!   abstract `ElementType` are kept in a single bidirectional mapping in
//!   `element.rs` so the read path, write path and class mapping cannot
//!   drift apart.
//! - **Explicit byte order**: `Endianness` is a value threaded through every
//!   encode/decode call, never a field mutated on shared state.
//!
//! ## Architecture Role
//!
//! ```text
//! matbin-types → [matbin-codec] → container bytes
//!     ↑               ↓
//! Pure Data      Protocol Rules
//! Structures     Encoding/Decoding
//! Variable       Validation/Bounds
//! ```

pub mod element;
pub mod header;
pub mod payload;
pub mod variable;

pub use element::{ClassId, ElementType, TypeId};
pub use header::{Endianness, Header, DESCRIPTION_LEN, HEADER_LEN, VERSION_V5};
pub use payload::NumericPayload;
pub use variable::Variable;
