//! # ByteCursor - Bounded Sub-Parsing View
//!
//! ## Purpose
//!
//! A position-tracked view over a borrowed byte range, used by every decoder
//! in this crate. Matrix elements nest TLV sub-elements inside the byte range
//! declared by their outer tag; re-parsing that range through a bounded
//! cursor (offset + length over borrowed bytes, no fresh stream, no copy)
//! makes it impossible for a malformed inner tag to read past its parent's
//! declared extent - the cursor simply runs out of bytes and reports a
//! truncation error with the exact offset.

use crate::error::{CodecError, CodecResult};
use matbin_types::Endianness;

/// Bounded, position-tracked view over a byte source.
///
/// Owns no allocation; all reads hand back sub-slices of the underlying
/// buffer.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset from the start of the view.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the bounded range.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes, advancing the cursor. Fails with
    /// [`CodecError::TruncatedInput`] when fewer than `n` bytes remain.
    pub fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::truncated(n, self.remaining(), self.pos));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Advance past `n` bytes without handing them back.
    pub fn skip(&mut self, n: usize) -> CodecResult<()> {
        self.take(n).map(|_| ())
    }

    pub fn read_u16(&mut self, order: Endianness) -> CodecResult<u16> {
        Ok(order.read_u16(self.take(2)?))
    }

    pub fn read_u32(&mut self, order: Endianness) -> CodecResult<u32> {
        Ok(order.read_u32(self.take(4)?))
    }

    pub fn read_i32(&mut self, order: Endianness) -> CodecResult<i32> {
        Ok(order.read_i32(self.take(4)?))
    }

    pub fn read_u64(&mut self, order: Endianness) -> CodecResult<u64> {
        Ok(order.read_u64(self.take(8)?))
    }
}
