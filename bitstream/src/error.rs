//! Error types for bitstream operations.

use std::fmt;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur during bit-level encoding/decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Number of bits requested.
        requested: usize,
        /// Number of bits available.
        available: usize,
    },

    /// Invalid bit count for the operation.
    ///
    /// This indicates a codec bug, not bad wire data: no well-formed caller
    /// ever requests more than 64 bits at once.
    InvalidBitCount {
        /// The invalid bit count provided.
        bits: usize,
        /// Maximum allowed bits for this operation.
        max_bits: usize,
    },

    /// Value exceeds the range representable by the specified number of bits.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Number of bits available.
        bits: usize,
    },

    /// A varint continuation chain did not terminate within the maximum
    /// width for its integer domain, or overflowed it.
    InvalidVarint,

    /// A byte-aligned operation was attempted mid-byte.
    MisalignedAccess {
        /// The bit position at which the access was attempted.
        bit_position: usize,
    },
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bits but only {available} bits available"
                )
            }
            Self::InvalidBitCount { bits, max_bits } => {
                write!(f, "invalid bit count {bits}, maximum allowed is {max_bits}")
            }
            Self::ValueOutOfRange { value, bits } => {
                write!(f, "value {value} cannot be represented in {bits} bits")
            }
            Self::InvalidVarint => {
                write!(f, "varint does not terminate within its maximum width")
            }
            Self::MisalignedAccess { bit_position } => {
                write!(f, "byte-aligned access at bit position {bit_position}")
            }
        }
    }
}

impl std::error::Error for BitError {}
