//! Canonical binary encoding (BCS) for deterministic serialization.
//!
//! The layout follows the ledger's Binary Canonical Serialization rules:
//! - Fixed-width unsigned integers are little-endian
//! - Lengths and enum variant tags are ULEB128
//! - Strings and byte vectors are length-prefixed
//! - Fixed-size arrays (addresses) are written verbatim
//!
//! **CRITICAL**: Every node re-encodes a submitted transaction and checks the
//! signature over its own bytes. Any drift here invalidates every signature.

use crate::error::{CoreError, Result};

/// Maximum number of bytes a ULEB128-encoded `u64` can occupy.
pub const MAX_ULEB128_LEN: usize = 10;

/// Width of a fixed-size little-endian unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedWidth {
    /// `u8`
    One,
    /// `u16`
    Two,
    /// `u32`
    Four,
    /// `u64`
    Eight,
}

impl FixedWidth {
    /// Number of encoded bytes.
    pub const fn len(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// Largest value representable at this width.
    pub const fn max_value(self) -> u64 {
        match self {
            Self::One => u8::MAX as u64,
            Self::Two => u16::MAX as u64,
            Self::Four => u32::MAX as u64,
            Self::Eight => u64::MAX,
        }
    }

    /// Map a bit count (8, 16, 32, 64) to a width.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::One),
            16 => Some(Self::Two),
            32 => Some(Self::Four),
            64 => Some(Self::Eight),
            _ => None,
        }
    }
}

/// Append-only canonical encoder.
///
/// An encoder is built for one value, drained with [`Encoder::into_bytes`]
/// (or read with [`Encoder::as_bytes`] and then [`Encoder::reset`]), and never
/// shared between unrelated encodings.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append bytes verbatim, without a length prefix.
    ///
    /// Used for fixed-size fields (addresses) and for sub-structures that are
    /// already canonically encoded.
    pub fn write_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append a ULEB128-encoded unsigned integer.
    pub fn write_uleb128(&mut self, mut value: u64) -> &mut Self {
        while value >= 0x80 {
            self.buf.push(((value & 0x7f) as u8) | 0x80);
            value >>= 7;
        }
        self.buf.push((value & 0x7f) as u8);
        self
    }

    /// Append an enum variant tag.
    pub fn write_variant(&mut self, variant: u64) -> &mut Self {
        self.write_uleb128(variant)
    }

    /// Append a sequence length prefix.
    pub fn write_seq_len(&mut self, len: usize) -> &mut Self {
        self.write_uleb128(len as u64)
    }

    /// Append a length-prefixed byte vector.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_seq_len(bytes.len());
        self.write_raw(bytes)
    }

    /// Append a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, s: &str) -> &mut Self {
        self.write_bytes(s.as_bytes())
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_raw(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_raw(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_raw(&value.to_le_bytes())
    }

    /// Append `value` as a little-endian integer of the given width.
    ///
    /// Fails with [`CoreError::EncodingConstraint`] if `value` does not fit.
    pub fn write_fixed(&mut self, value: u64, width: FixedWidth) -> Result<&mut Self> {
        if value > width.max_value() {
            return Err(CoreError::EncodingConstraint(format!(
                "{} does not fit in {} byte(s)",
                value,
                width.len()
            )));
        }
        let bytes = value.to_le_bytes();
        Ok(self.write_raw(&bytes[..width.len()]))
    }

    /// Borrow the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard everything written so far, keeping the allocation.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

/// Encode a `u64` as 8 little-endian bytes (entry-function argument form).
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// Encode a length-prefixed byte vector.
pub fn encode_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut enc = Encoder::with_capacity(bytes.len() + MAX_ULEB128_LEN);
    enc.write_bytes(bytes);
    enc.into_bytes()
}

/// Encode a length-prefixed UTF-8 string.
pub fn encode_str(s: &str) -> Vec<u8> {
    encode_bytes(s.as_bytes())
}

/// Encode a `vector<vector<u8>>`: outer length, then each inner vector
/// length-prefixed.
pub fn encode_byte_vectors(items: &[Vec<u8>]) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.write_seq_len(items.len());
    for item in items {
        enc.write_bytes(item);
    }
    enc.into_bytes()
}

/// Cursor over canonically encoded bytes.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Read exactly `len` raw bytes.
    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(CoreError::Decoding(format!(
                "unexpected end of input: need {} bytes at offset {}, have {}",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let out = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    /// Read a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.read_raw(N)?);
        Ok(arr)
    }

    /// Read a ULEB128 integer, rejecting overlong and overflowing encodings.
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let mut value: u64 = 0;
        for shift in (0..64).step_by(7) {
            let byte = self.read_u8()?;
            let digit = u64::from(byte & 0x7f);
            if shift == 63 && digit > 1 {
                return Err(CoreError::Decoding("uleb128 overflows u64".into()));
            }
            value |= digit << shift;
            if byte & 0x80 == 0 {
                if shift > 0 && digit == 0 {
                    return Err(CoreError::Decoding("non-canonical uleb128".into()));
                }
                return Ok(value);
            }
        }
        Err(CoreError::Decoding("uleb128 overflows u64".into()))
    }

    /// Read an enum variant tag.
    pub fn read_variant(&mut self) -> Result<u64> {
        self.read_uleb128()
    }

    /// Read a sequence length prefix.
    pub fn read_seq_len(&mut self) -> Result<usize> {
        let len = self.read_uleb128()?;
        usize::try_from(len)
            .map_err(|_| CoreError::Decoding(format!("sequence length {} too large", len)))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_raw(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian integer of the given width.
    pub fn read_fixed(&mut self, width: FixedWidth) -> Result<u64> {
        let raw = self.read_raw(width.len())?;
        let mut bytes = [0u8; 8];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(u64::from_le_bytes(bytes))
    }

    /// Read a length-prefixed byte vector.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_seq_len()?;
        self.read_raw(len)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<&'a str> {
        let bytes = self.read_bytes()?;
        std::str::from_utf8(bytes).map_err(|e| CoreError::Decoding(e.to_string()))
    }

    /// Ensure all input was consumed.
    pub fn finish(self) -> Result<()> {
        if self.remaining() != 0 {
            return Err(CoreError::Decoding(format!(
                "{} trailing bytes",
                self.remaining()
            )));
        }
        Ok(())
    }
}
