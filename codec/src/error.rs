//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// The three field regions of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Booleans,
    Integers,
    Floats,
}

/// Errors that can occur during snapshot/delta encoding/decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// Bitstream error (truncated reads, malformed varints, bad bit widths).
    Bitstream(bitstream::BitError),

    /// Input buffer is shorter than the format demands.
    TruncatedInput { needed: usize, available: usize },

    /// A field count exceeds the configured limit.
    LimitExceeded {
        kind: FieldKind,
        limit: usize,
        actual: usize,
    },

    /// A field count does not fit the 32-bit wire domain.
    CountOverflow { kind: FieldKind, count: usize },

    /// The change-mask length prefix disagrees with the declared counts.
    MaskLengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitstream(e) => write!(f, "bitstream error: {e}"),
            Self::TruncatedInput { needed, available } => {
                write!(f, "input truncated: need {needed} bytes, have {available}")
            }
            Self::LimitExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::CountOverflow { kind, count } => {
                write!(f, "{kind} count {count} does not fit in 32 bits")
            }
            Self::MaskLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "change-mask length mismatch: expected {expected} bytes, found {actual}"
                )
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Booleans => "boolean",
            Self::Integers => "integer",
            Self::Floats => "float",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Bitstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bitstream::BitError> for CodecError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}
