//! # File Writer - Streaming Container Encode
//!
//! ## Purpose
//!
//! Produces a complete v5 container over any [`std::io::Write`] sink: the
//! 128-byte header is written the moment the writer is created, then each
//! variable is validated, encoded as one matrix element in the normal tag
//! layout, and appended. Every emitted element is 8-byte aligned, so output
//! from this writer round-trips through the reader byte for byte.

use crate::error::{CodecError, CodecResult};
use crate::matrix;
use matbin_types::{Endianness, Header, Variable, HEADER_LEN};
use std::io::Write;
use tracing::debug;

/// Container format family selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatVersion {
    /// The v5 binary container this crate encodes and decodes.
    #[default]
    V5,
    /// HDF-based 7.3 containers, which need a hierarchical backend.
    V73,
}

/// Options for creating a container.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    description: String,
    endianness: Endianness,
    version: FormatVersion,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            description: "MAT-file v5, created by matbin".to_string(),
            endianness: Endianness::Little,
            version: FormatVersion::V5,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Header description text; silently truncated to 116 bytes on encode.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    pub fn version(mut self, version: FormatVersion) -> Self {
        self.version = version;
        self
    }
}

/// Streaming writer over a v5 container.
#[derive(Debug)]
pub struct MatWriter<W> {
    inner: W,
    endianness: Endianness,
    /// Bytes written so far, header included.
    position: usize,
}

impl<W: Write> MatWriter<W> {
    /// Create a container: write the header immediately and hand back a
    /// writer positioned for the first element.
    pub fn create(mut inner: W, options: WriteOptions) -> CodecResult<Self> {
        if options.version != FormatVersion::V5 {
            return Err(CodecError::UnsupportedVersion {
                requested: "7.3 (use a hierarchical backend)".to_string(),
            });
        }

        let header = Header::new(options.description, options.endianness);
        inner.write_all(&crate::header::encode(&header))?;
        debug!(endianness = ?options.endianness, "container header written");

        Ok(Self {
            inner,
            endianness: options.endianness,
            position: HEADER_LEN,
        })
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Bytes written so far, header included.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Validate and append one variable as a matrix element. Validation
    /// failures leave the sink untouched.
    pub fn write_variable(&mut self, variable: &Variable) -> CodecResult<()> {
        let element = matrix::encode_element(variable, self.endianness)?;
        self.inner.write_all(&element)?;
        self.position += element.len();
        debug!(
            name = %variable.name,
            bytes = element.len(),
            "matrix element written"
        );
        Ok(())
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> CodecResult<()> {
        self.inner.flush()?;
        Ok(())
    }
}
