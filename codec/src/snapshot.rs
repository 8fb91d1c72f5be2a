//! Snapshot model and full (keyframe) serialization.
//!
//! The full-snapshot wire format carries no field counts; both sides must
//! already agree on the snapshot shape. Layout, in order:
//!
//! 1. booleans bit-packed 8-per-byte (`ceil(B / 8)` bytes),
//! 2. integers as `u32` little-endian (`4 * I` bytes),
//! 3. floats as IEEE-754 `f32` little-endian (`4 * F` bytes).

use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::mask;

/// One complete value of all tracked fields at a point in time.
///
/// Field identity is purely positional: index `i` of a sequence refers to
/// the same logical field across every snapshot compared by the same
/// encoder/decoder pair. The codec never owns a snapshot; it borrows them
/// for the duration of one encode/decode call.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Ordered boolean fields.
    pub booleans: Vec<bool>,
    /// Ordered 32-bit unsigned integer fields.
    pub integers: Vec<u32>,
    /// Ordered 32-bit float fields.
    pub floats: Vec<f32>,
}

/// The externally negotiated shape of a snapshot.
///
/// Counts come from schema agreement, not wire data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapshotCounts {
    pub booleans: usize,
    pub integers: usize,
    pub floats: usize,
}

impl Snapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            booleans: Vec::new(),
            integers: Vec::new(),
            floats: Vec::new(),
        }
    }

    /// Creates a zeroed snapshot of the given shape.
    #[must_use]
    pub fn with_counts(counts: &SnapshotCounts) -> Self {
        Self {
            booleans: vec![false; counts.booleans],
            integers: vec![0; counts.integers],
            floats: vec![0.0; counts.floats],
        }
    }

    /// Returns this snapshot's shape.
    #[must_use]
    pub fn counts(&self) -> SnapshotCounts {
        SnapshotCounts {
            booleans: self.booleans.len(),
            integers: self.integers.len(),
            floats: self.floats.len(),
        }
    }

    /// Total number of fields across all three regions.
    #[must_use]
    pub fn total_fields(&self) -> usize {
        self.booleans.len() + self.integers.len() + self.floats.len()
    }
}

impl SnapshotCounts {
    /// Total number of fields across all three regions.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.booleans + self.integers + self.floats
    }

    /// Size in bytes of a full snapshot of this shape.
    #[must_use]
    pub const fn full_snapshot_bytes(&self) -> usize {
        mask::packed_len(self.booleans) + 4 * self.integers + 4 * self.floats
    }
}

/// Encodes a full snapshot (bootstrap / keyframe path).
///
/// The output embeds no counts; decode with the same [`SnapshotCounts`].
#[must_use]
pub fn encode_full_snapshot(snapshot: &Snapshot) -> Vec<u8> {
    let counts = snapshot.counts();
    let mut out = Vec::with_capacity(counts.full_snapshot_bytes());

    let mut packed = Vec::new();
    mask::pack_bits(&snapshot.booleans, &mut packed);
    out.extend_from_slice(&packed);

    for &value in &snapshot.integers {
        out.extend_from_slice(&value.to_le_bytes());
    }
    for &value in &snapshot.floats {
        out.extend_from_slice(&value.to_le_bytes());
    }
    out
}

/// Decodes a full snapshot of the given shape from `bytes`.
///
/// Trailing bytes beyond the expected size are ignored; the snapshot shape
/// is externally negotiated, so exactly `counts.full_snapshot_bytes()` bytes
/// are consumed.
///
/// # Errors
///
/// Returns [`CodecError::LimitExceeded`] if a count exceeds `limits` and
/// [`CodecError::TruncatedInput`] if fewer bytes remain than the shape
/// demands.
pub fn decode_full_snapshot(
    bytes: &[u8],
    counts: &SnapshotCounts,
    limits: &CodecLimits,
) -> CodecResult<Snapshot> {
    limits.check(counts)?;

    let needed = counts.full_snapshot_bytes();
    if bytes.len() < needed {
        return Err(CodecError::TruncatedInput {
            needed,
            available: bytes.len(),
        });
    }

    let (packed, rest) = bytes.split_at(mask::packed_len(counts.booleans));
    let mut booleans = Vec::with_capacity(counts.booleans);
    for i in 0..counts.booleans {
        booleans.push(mask::bit_at(packed, i));
    }

    let (int_bytes, rest) = rest.split_at(4 * counts.integers);
    let integers = int_bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    let float_bytes = &rest[..4 * counts.floats];
    let floats = float_bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    Ok(Snapshot {
        booleans,
        integers,
        floats,
    })
}
