//! Bit-level reader with bounded operations.

use crate::error::{BitError, BitResult};
use crate::VARU32_MAX_BYTES;

/// A bit-level reader for decoding packed binary data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Returns the number of bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_mul(8)
            .saturating_sub(self.bit_pos)
    }

    /// Returns `true` if there are no more bits to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Returns the current bit position.
    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Returns the number of whole bytes consumed, rounding a partial byte up.
    #[must_use]
    pub const fn bytes_consumed(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    /// Reads a single bit as a boolean.
    pub fn read_bool(&mut self) -> BitResult<bool> {
        if self.bits_remaining() == 0 {
            return Err(BitError::UnexpectedEof {
                requested: 1,
                available: 0,
            });
        }
        let byte_idx = self.bit_pos / 8;
        let bit_idx = self.bit_pos % 8;
        let bit = (self.data[byte_idx] >> (7 - bit_idx)) & 1;
        self.bit_pos += 1;
        Ok(bit == 1)
    }

    /// Reads up to 64 bits as an unsigned integer, most significant first.
    ///
    /// Reading 0 bits is a no-op returning 0.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 64`.
    /// Returns [`BitError::UnexpectedEof`] if the buffer runs out.
    pub fn read_bits(&mut self, bits: usize) -> BitResult<u64> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        if bits == 0 {
            return Ok(0);
        }
        if bits > self.bits_remaining() {
            return Err(BitError::UnexpectedEof {
                requested: bits,
                available: self.bits_remaining(),
            });
        }

        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | u64::from(self.read_bool()?);
        }
        Ok(value)
    }

    /// Skips to the next byte boundary.
    pub fn align_to_byte(&mut self) -> BitResult<()> {
        let rem = self.bit_pos % 8;
        if rem == 0 {
            return Ok(());
        }
        let skip = 8 - rem;
        if skip > self.bits_remaining() {
            return Err(BitError::UnexpectedEof {
                requested: skip,
                available: self.bits_remaining(),
            });
        }
        self.bit_pos += skip;
        Ok(())
    }

    /// Reads a byte-aligned `u8`.
    pub fn read_u8_aligned(&mut self) -> BitResult<u8> {
        self.ensure_aligned()?;
        self.ensure_bits(8)?;
        let idx = self.bit_pos / 8;
        let value = self.data[idx];
        self.bit_pos += 8;
        Ok(value)
    }

    /// Reads a byte-aligned `u32` (little-endian).
    pub fn read_u32_aligned(&mut self) -> BitResult<u32> {
        let bytes = self.read_aligned_array::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads a byte-aligned `f32` from its IEEE-754 bit pattern (little-endian).
    pub fn read_f32_aligned(&mut self) -> BitResult<f32> {
        let bytes = self.read_aligned_array::<4>()?;
        Ok(f32::from_le_bytes(bytes))
    }

    /// Reads `len` byte-aligned raw bytes.
    pub fn read_bytes_aligned(&mut self, len: usize) -> BitResult<&'a [u8]> {
        self.ensure_aligned()?;
        self.ensure_bits(len.saturating_mul(8))?;
        let idx = self.bit_pos / 8;
        let slice = &self.data[idx..idx + len];
        self.bit_pos += len * 8;
        Ok(slice)
    }

    /// Reads a byte-aligned varint `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidVarint`] if the continuation chain does not
    /// terminate within 5 bytes or the fifth byte overflows 32 bits.
    /// Returns [`BitError::UnexpectedEof`] if the buffer runs out mid-chain.
    pub fn read_varu32(&mut self) -> BitResult<u32> {
        self.ensure_aligned()?;
        let mut result = 0u32;
        for (i, shift) in (0..VARU32_MAX_BYTES).map(|i| (i, 7 * i as u32)) {
            let byte = self.read_u8_aligned()?;
            let payload = u32::from(byte & 0x7F);
            // The fifth byte carries only the top 4 bits of a u32.
            if i == VARU32_MAX_BYTES - 1 && byte & 0xF0 != 0 {
                return Err(BitError::InvalidVarint);
            }
            result |= payload << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(BitError::InvalidVarint)
    }

    fn ensure_aligned(&self) -> BitResult<()> {
        if self.bit_pos % 8 != 0 {
            return Err(BitError::MisalignedAccess {
                bit_position: self.bit_pos,
            });
        }
        Ok(())
    }

    fn ensure_bits(&self, bits: usize) -> BitResult<()> {
        let available = self.bits_remaining();
        if bits > available {
            return Err(BitError::UnexpectedEof {
                requested: bits,
                available,
            });
        }
        Ok(())
    }

    fn read_aligned_array<const N: usize>(&mut self) -> BitResult<[u8; N]> {
        let slice = self.read_bytes_aligned(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }
}
