//! Bit-level writer for encoding packed binary data.

use crate::error::{BitError, BitResult};

/// A bit-level writer for encoding packed binary data.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer; a partially filled trailing byte is padded
/// with zeros on the right.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The accumulated bytes.
    bytes: Vec<u8>,
    /// Current byte being filled (not yet pushed to `bytes`).
    current_byte: u8,
    /// Number of bits written to `current_byte` (0-7).
    bit_count: u8,
}

impl BitWriter {
    /// Creates a new empty `BitWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `BitWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current_byte: 0,
            bit_count: 0,
        }
    }

    /// Returns the number of bits written so far.
    #[must_use]
    pub fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Returns `true` if the cursor sits on a byte boundary.
    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.bit_count == 0
    }

    /// Writes a single bit.
    pub fn write_bool(&mut self, value: bool) {
        self.current_byte = (self.current_byte << 1) | u8::from(value);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// Writes up to 64 bits from an unsigned integer, most significant first.
    ///
    /// Writing 0 bits is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 64`.
    /// Returns [`BitError::ValueOutOfRange`] if `value` doesn't fit in `bits`.
    pub fn write_bits(&mut self, value: u64, bits: usize) -> BitResult<()> {
        if bits > 64 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 64 });
        }
        if bits == 0 {
            return Ok(());
        }
        if bits < 64 && value >= (1u64 << bits) {
            return Err(BitError::ValueOutOfRange { value, bits });
        }

        for i in (0..bits).rev() {
            self.write_bool((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Pads the current byte with zero bits up to the next byte boundary.
    ///
    /// Does nothing if the cursor is already aligned.
    pub fn align_to_byte(&mut self) {
        if self.bit_count > 0 {
            self.current_byte <<= 8 - self.bit_count;
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// Writes a byte-aligned `u8`.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::MisalignedAccess`] if the cursor is mid-byte.
    pub fn write_u8_aligned(&mut self, value: u8) -> BitResult<()> {
        self.ensure_aligned()?;
        self.bytes.push(value);
        Ok(())
    }

    /// Writes a byte-aligned `u32` (little-endian).
    ///
    /// # Errors
    ///
    /// Returns [`BitError::MisalignedAccess`] if the cursor is mid-byte.
    pub fn write_u32_aligned(&mut self, value: u32) -> BitResult<()> {
        self.ensure_aligned()?;
        self.bytes.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a byte-aligned `f32` as its IEEE-754 bit pattern (little-endian).
    ///
    /// # Errors
    ///
    /// Returns [`BitError::MisalignedAccess`] if the cursor is mid-byte.
    pub fn write_f32_aligned(&mut self, value: f32) -> BitResult<()> {
        self.ensure_aligned()?;
        self.bytes.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    /// Writes a byte-aligned raw byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::MisalignedAccess`] if the cursor is mid-byte.
    pub fn write_bytes_aligned(&mut self, bytes: &[u8]) -> BitResult<()> {
        self.ensure_aligned()?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Writes a byte-aligned varint `u32`.
    ///
    /// Little-endian base-128 groups: 7 payload bits per byte, bit 7 set iff
    /// another byte follows. At most [`VARU32_MAX_BYTES`](crate::VARU32_MAX_BYTES)
    /// bytes are emitted.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::MisalignedAccess`] if the cursor is mid-byte.
    pub fn write_varu32(&mut self, mut value: u32) -> BitResult<()> {
        self.ensure_aligned()?;
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            self.bytes.push(byte);
            if value == 0 {
                return Ok(());
            }
        }
    }

    /// Finishes writing and returns the byte buffer.
    ///
    /// If the last byte is incomplete, it is padded with zeros on the right.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte();
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        self.align_to_byte();
        buf.append(&mut self.bytes);
    }

    fn ensure_aligned(&self) -> BitResult<()> {
        if self.bit_count != 0 {
            return Err(BitError::MisalignedAccess {
                bit_position: self.bits_written(),
            });
        }
        Ok(())
    }
}
