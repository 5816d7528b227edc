//! File header and byte-order model.
//!
//! A v5 container opens with a fixed 128-byte header: 116 bytes of
//! description text, 8 reserved bytes, a 2-byte version and a 2-byte endian
//! token. The token both names the byte order of every multi-byte field in
//! the file and is itself stored as literal ASCII.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Total header length in bytes.
pub const HEADER_LEN: usize = 128;

/// Maximum description text length in bytes. Longer text is truncated on
/// encode.
pub const DESCRIPTION_LEN: usize = 116;

/// Version constant stored at bytes 124-125 of every v5 header.
pub const VERSION_V5: u16 = 0x0100;

/// Endian token for little-endian files.
pub const LITTLE_ENDIAN_TOKEN: [u8; 2] = *b"MI";

/// Endian token for big-endian files.
pub const BIG_ENDIAN_TOKEN: [u8; 2] = *b"IM";

/// Byte order of all multi-byte fields in a container, fixed at header
/// decode (read side) or file creation (write side).
///
/// Threaded explicitly through every encode/decode call so the same
/// conversion logic can serve both orders without shared mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Little,
    Big,
}

impl Endianness {
    /// Map an on-disk endian token to a byte order. Returns `None` for
    /// anything but the two valid tokens; callers must treat that as a hard
    /// format error, not a fallback.
    pub fn from_token(token: [u8; 2]) -> Option<Self> {
        match token {
            LITTLE_ENDIAN_TOKEN => Some(Endianness::Little),
            BIG_ENDIAN_TOKEN => Some(Endianness::Big),
            _ => None,
        }
    }

    /// The literal 2-byte ASCII marker persisted at bytes 126-127.
    pub fn token(&self) -> [u8; 2] {
        match self {
            Endianness::Little => LITTLE_ENDIAN_TOKEN,
            Endianness::Big => BIG_ENDIAN_TOKEN,
        }
    }

    pub fn read_u16(&self, buf: &[u8]) -> u16 {
        match self {
            Endianness::Little => LittleEndian::read_u16(buf),
            Endianness::Big => BigEndian::read_u16(buf),
        }
    }

    pub fn read_u32(&self, buf: &[u8]) -> u32 {
        match self {
            Endianness::Little => LittleEndian::read_u32(buf),
            Endianness::Big => BigEndian::read_u32(buf),
        }
    }

    pub fn read_i32(&self, buf: &[u8]) -> i32 {
        self.read_u32(buf) as i32
    }

    pub fn read_u64(&self, buf: &[u8]) -> u64 {
        match self {
            Endianness::Little => LittleEndian::read_u64(buf),
            Endianness::Big => BigEndian::read_u64(buf),
        }
    }

    pub fn write_u16(&self, buf: &mut [u8], value: u16) {
        match self {
            Endianness::Little => LittleEndian::write_u16(buf, value),
            Endianness::Big => BigEndian::write_u16(buf, value),
        }
    }

    pub fn write_u32(&self, buf: &mut [u8], value: u32) {
        match self {
            Endianness::Little => LittleEndian::write_u32(buf, value),
            Endianness::Big => BigEndian::write_u32(buf, value),
        }
    }

    pub fn write_u64(&self, buf: &mut [u8], value: u64) {
        match self {
            Endianness::Little => LittleEndian::write_u64(buf, value),
            Endianness::Big => BigEndian::write_u64(buf, value),
        }
    }
}

/// Decoded file header. Constructed once per file at open or create time
/// and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Human-readable description, at most [`DESCRIPTION_LEN`] bytes.
    pub description: String,
    /// Version constant, [`VERSION_V5`] for files this engine produces.
    pub version: u16,
    /// Byte order governing every multi-byte field after the header.
    pub endianness: Endianness,
}

impl Header {
    /// Create a v5 header with the given description and byte order.
    pub fn new(description: impl Into<String>, endianness: Endianness) -> Self {
        Self {
            description: description.into(),
            version: VERSION_V5,
            endianness,
        }
    }

    /// The endian token this header persists on disk.
    pub fn endian_token(&self) -> [u8; 2] {
        self.endianness.token()
    }
}
