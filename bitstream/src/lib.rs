//! Low-level bit packing and varint primitives for the avsync codec.
//!
//! This crate provides [`BitWriter`] and [`BitReader`] for bit-level encoding
//! and decoding, plus byte-aligned fixed-width and varint operations layered
//! on top of the same cursor.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about snapshots or
//!   change masks, only bits and bytes.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Bit order
//!
//! `write_bits`/`read_bits` operate most-significant-bit-first within each
//! written group. Byte-aligned integers and floats are little-endian. Varints
//! are little-endian base-128 with the continuation bit in bit 7.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bool(true);
//! writer.write_bits(42, 7).unwrap();
//! writer.align_to_byte();
//! writer.write_varu32(300).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bool().unwrap());
//! assert_eq!(reader.read_bits(7).unwrap(), 42);
//! reader.align_to_byte().unwrap();
//! assert_eq!(reader.read_varu32().unwrap(), 300);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::BitReader;
pub use writer::BitWriter;

/// Maximum encoded size of a 32-bit varint, in bytes.
pub const VARU32_MAX_BYTES: usize = 5;

/// Returns the number of bytes `write_varu32` will emit for `value`.
#[must_use]
pub const fn varu32_len(value: u32) -> usize {
    match value {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        0x20_0000..=0xFFF_FFFF => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let writer = BitWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = BitReader::new(&bytes);
        assert!(reader.is_empty());
    }

    #[test]
    fn mixed_roundtrip() {
        let mut writer = BitWriter::new();
        writer.write_bool(true);
        writer.write_bits(0b1010, 4).unwrap();
        writer.write_bool(false);
        writer.align_to_byte();
        writer.write_u32_aligned(0xDEAD_BEEF).unwrap();
        writer.write_f32_aligned(1.5).unwrap();
        writer.write_varu32(7).unwrap();
        let bytes = writer.finish();

        let mut reader = BitReader::new(&bytes);
        assert!(reader.read_bool().unwrap());
        assert_eq!(reader.read_bits(4).unwrap(), 0b1010);
        assert!(!reader.read_bool().unwrap());
        reader.align_to_byte().unwrap();
        assert_eq!(reader.read_u32_aligned().unwrap(), 0xDEAD_BEEF);
        assert!((reader.read_f32_aligned().unwrap() - 1.5).abs() < f32::EPSILON);
        assert_eq!(reader.read_varu32().unwrap(), 7);
        assert!(reader.is_empty());
    }

    #[test]
    fn varu32_len_matches_encoding() {
        for value in [0, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, u32::MAX] {
            let mut writer = BitWriter::new();
            writer.write_varu32(value).unwrap();
            assert_eq!(
                writer.finish().len(),
                varu32_len(value),
                "length mismatch for {value}"
            );
        }
    }

    #[test]
    fn varu32_max_fits_bound() {
        let mut writer = BitWriter::new();
        writer.write_varu32(u32::MAX).unwrap();
        assert_eq!(writer.finish().len(), VARU32_MAX_BYTES);
    }
}
