//! # File Reader - Streaming Container Decode
//!
//! ## Purpose
//!
//! Drives a full container decode over any [`std::io::Read`] source: header
//! first, then top-level elements one tag at a time until clean end of
//! stream. Matrix elements become [`Variable`]s; unrecognized top-level
//! elements are skipped over without allocation proportional to their
//! declared size; compressed elements are recognized and rejected.
//!
//! End-of-stream discipline: zero bytes where a tag would start is a clean
//! end of file, a partial tag or a payload cut short is a hard
//! [`CodecError::TruncatedInput`].

use crate::cursor::ByteCursor;
use crate::error::{CodecError, CodecResult};
use crate::matrix;
use crate::tag;
use crate::writer::FormatVersion;
use matbin_types::{Header, TypeId, Variable, HEADER_LEN};
use std::io::Read;
use tracing::debug;

/// Magic bytes opening an HDF-based (version 7.3) container. Those files
/// carry no v5 header at all and need a hierarchical backend instead.
const HDF_MAGIC: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

/// A fully decoded container: the header plus every matrix element found.
#[derive(Debug, Clone, PartialEq)]
pub struct MatFile {
    pub version: FormatVersion,
    pub header: Header,
    pub variables: Vec<Variable>,
}

/// Streaming reader over a v5 container.
pub struct MatReader<R> {
    inner: R,
    header: Header,
    /// Absolute byte offset into the stream, for truncation diagnostics.
    offset: usize,
}

impl<R: Read> MatReader<R> {
    /// Open a container: consume and decode the 128-byte header, fixing the
    /// byte order for everything that follows.
    pub fn new(mut inner: R) -> CodecResult<Self> {
        let mut block = [0u8; HEADER_LEN];
        let got = fill(&mut inner, &mut block)?;
        if got < HEADER_LEN {
            return Err(CodecError::truncated_header(got));
        }
        if block[..8] == HDF_MAGIC {
            return Err(CodecError::UnsupportedVersion {
                requested: "7.3 (HDF-based container)".to_string(),
            });
        }

        let header = crate::header::decode(&block)?;
        debug!(
            endianness = ?header.endianness,
            version = header.version,
            "container header decoded"
        );

        Ok(Self {
            inner,
            header,
            offset: HEADER_LEN,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Decode every remaining top-level element. The first malformed
    /// element aborts the whole read.
    pub fn read_all(&mut self) -> CodecResult<Vec<Variable>> {
        let order = self.header.endianness;
        let mut variables = Vec::new();

        loop {
            let mut tag_buf = [0u8; 8];
            let got = fill(&mut self.inner, &mut tag_buf)?;
            if got == 0 {
                break; // clean end of stream
            }
            if got < 8 {
                return Err(CodecError::truncated(8, got, self.offset));
            }
            self.offset += 8;

            let mut cursor = ByteCursor::new(&tag_buf);
            let element = tag::decode(&mut cursor, order)?;

            if element.compact {
                // The whole element lives in the 8 bytes already read.
                debug!(
                    type_id = element.type_id,
                    size = element.size,
                    "skipping compact top-level element"
                );
                continue;
            }

            match TypeId::try_from(element.type_id) {
                Ok(TypeId::Matrix) => {
                    let content = self.read_exact_vec(element.size as usize)?;
                    self.skip_padding(tag::padding_for(element.size))?;
                    variables.push(matrix::decode(&content, order)?);
                }
                Ok(TypeId::Compressed) => {
                    return Err(CodecError::compressed_unsupported());
                }
                _ => {
                    debug!(
                        type_id = element.type_id,
                        size = element.size,
                        "skipping unrecognized top-level element"
                    );
                    self.skip_exact(element.size as usize)?;
                    self.skip_padding(tag::padding_for(element.size))?;
                }
            }
        }

        Ok(variables)
    }

    fn read_exact_vec(&mut self, len: usize) -> CodecResult<Vec<u8>> {
        let mut buf = vec![0u8; len];
        let got = fill(&mut self.inner, &mut buf)?;
        if got < len {
            return Err(CodecError::truncated(len, got, self.offset));
        }
        self.offset += len;
        Ok(buf)
    }

    /// Skip over a payload without buffering it whole.
    fn skip_exact(&mut self, len: usize) -> CodecResult<()> {
        let copied = std::io::copy(
            &mut (&mut self.inner).take(len as u64),
            &mut std::io::sink(),
        )?;
        if (copied as usize) < len {
            return Err(CodecError::truncated(len, copied as usize, self.offset));
        }
        self.offset += len;
        Ok(())
    }

    /// Consume inter-element padding. A final element whose trailing padding
    /// was cut short at end of file is tolerated.
    fn skip_padding(&mut self, pad: usize) -> CodecResult<()> {
        let copied = std::io::copy(
            &mut (&mut self.inner).take(pad as u64),
            &mut std::io::sink(),
        )?;
        self.offset += copied as usize;
        Ok(())
    }
}

/// Read into `buf` until it is full or the source ends; returns the byte
/// count actually read.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> CodecResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Decode a whole container in one call.
pub fn read<R: Read>(reader: R) -> CodecResult<MatFile> {
    let mut reader = MatReader::new(reader)?;
    let variables = reader.read_all()?;
    Ok(MatFile {
        version: FormatVersion::V5,
        header: reader.header,
        variables,
    })
}
