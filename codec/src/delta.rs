//! Delta (diff) encoding/decoding.
//!
//! Diff wire layout, everything byte-aligned:
//!
//! ```text
//! varu32(B) | varu32(I) | varu32(F)
//! varu32(mask_len) | mask bytes (ceil((B+I+F)/8), LSB-first packing)
//! varu32 per changed integer, ascending index order
//! f32-LE per changed float, ascending index order
//! ```
//!
//! Boolean fields are carried in full every diff: their mask bit is the
//! literal new value. Integer and float fields cost one mask bit each plus,
//! only if changed, their encoded value.

use bitstream::{varu32_len, BitReader, BitWriter, VARU32_MAX_BYTES};

use crate::error::{CodecError, CodecResult, FieldKind};
use crate::limits::CodecLimits;
use crate::mask;
use crate::scratch::DeltaScratch;
use crate::snapshot::{Snapshot, SnapshotCounts};

/// Default tolerance for the float "nearly equal" comparison.
pub const DEFAULT_FLOAT_EPSILON: f32 = 1e-4;

/// Tuning knobs for delta encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaConfig {
    /// Two floats closer than this are treated as unchanged.
    ///
    /// The comparison is strict: a difference of exactly this value counts
    /// as a change. Any comparison involving NaN counts as a change.
    pub float_epsilon: f32,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            float_epsilon: DEFAULT_FLOAT_EPSILON,
        }
    }
}

impl DeltaConfig {
    /// Returns `true` if `a` and `b` are within the configured epsilon.
    #[must_use]
    pub fn nearly_equal(&self, a: f32, b: f32) -> bool {
        (a - b).abs() < self.float_epsilon
    }
}

/// Encodes a diff taking `baseline` to `current`.
///
/// Encoding is pure: neither snapshot is mutated, and the same inputs always
/// produce the same bytes. Output size scales with the number of changed
/// integer/float fields, not with total field count.
///
/// # Errors
///
/// Returns [`CodecError::LimitExceeded`] if `current`'s counts exceed
/// `limits`, or [`CodecError::CountOverflow`] if a count does not fit the
/// 32-bit wire domain.
pub fn encode_delta(
    baseline: &Snapshot,
    current: &Snapshot,
    config: &DeltaConfig,
    limits: &CodecLimits,
) -> CodecResult<Vec<u8>> {
    let mut scratch = DeltaScratch::new();
    encode_delta_with_scratch(baseline, current, config, limits, &mut scratch)
}

/// Encodes a diff using reusable scratch buffers.
pub fn encode_delta_with_scratch(
    baseline: &Snapshot,
    current: &Snapshot,
    config: &DeltaConfig,
    limits: &CodecLimits,
    scratch: &mut DeltaScratch,
) -> CodecResult<Vec<u8>> {
    let counts = current.counts();
    limits.check(&counts)?;
    let b = wire_count(FieldKind::Booleans, counts.booleans)?;
    let i = wire_count(FieldKind::Integers, counts.integers)?;
    let f = wire_count(FieldKind::Floats, counts.floats)?;

    mask::build_change_mask(baseline, current, config, &mut scratch.mask);
    mask::pack_bits(&scratch.mask, &mut scratch.packed);
    // Each region count fits in u32, so the packed mask length does too.
    let mask_len = scratch.packed.len() as u32;

    let mut writer = BitWriter::with_capacity(
        varu32_len(b) + varu32_len(i) + varu32_len(f) + VARU32_MAX_BYTES + scratch.packed.len(),
    );
    writer.write_varu32(b)?;
    writer.write_varu32(i)?;
    writer.write_varu32(f)?;
    writer.write_varu32(mask_len)?;
    writer.write_bytes_aligned(&scratch.packed)?;

    let int_region = &scratch.mask[counts.booleans..counts.booleans + counts.integers];
    for (&changed, &value) in int_region.iter().zip(&current.integers) {
        if changed {
            writer.write_varu32(value)?;
        }
    }
    let float_region = &scratch.mask[counts.booleans + counts.integers..];
    for (&changed, &value) in float_region.iter().zip(&current.floats) {
        if changed {
            writer.write_f32_aligned(value)?;
        }
    }

    Ok(writer.finish())
}

/// Applies a diff to `target` in place, returning the bytes consumed.
///
/// `target` must be the same snapshot the diff's baseline was taken against;
/// the stream itself cannot detect a wrong baseline. After a failed apply
/// the target's state is unspecified (partial mutation may have occurred);
/// callers must treat failure as fatal to the sync cycle and fall back to a
/// full resynchronization.
///
/// # Errors
///
/// Returns [`CodecError::LimitExceeded`] for counts beyond `limits`,
/// [`CodecError::MaskLengthMismatch`] if the mask length prefix disagrees
/// with the declared counts, and [`CodecError::Bitstream`] for truncated or
/// malformed stream data.
pub fn apply_delta(
    target: &mut Snapshot,
    bytes: &[u8],
    limits: &CodecLimits,
) -> CodecResult<usize> {
    let mut reader = BitReader::new(bytes);

    let counts = SnapshotCounts {
        booleans: reader.read_varu32()? as usize,
        integers: reader.read_varu32()? as usize,
        floats: reader.read_varu32()? as usize,
    };
    limits.check(&counts)?;

    let expected = mask::packed_len(counts.total());
    let actual = reader.read_varu32()? as usize;
    if actual != expected {
        return Err(CodecError::MaskLengthMismatch { expected, actual });
    }
    let packed = reader.read_bytes_aligned(expected)?;

    // Booleans are fully replaced every diff: mask bit = value.
    target.booleans.clear();
    target
        .booleans
        .extend((0..counts.booleans).map(|idx| mask::bit_at(packed, idx)));

    // Newly exposed slots start at zero until populated below; retained
    // slots keep their baseline value unless their mask bit is set.
    target.integers.resize(counts.integers, 0);
    target.floats.resize(counts.floats, 0.0);

    let int_base = counts.booleans;
    for idx in 0..counts.integers {
        if mask::bit_at(packed, int_base + idx) {
            target.integers[idx] = reader.read_varu32()?;
        }
    }
    let float_base = counts.booleans + counts.integers;
    for idx in 0..counts.floats {
        if mask::bit_at(packed, float_base + idx) {
            target.floats[idx] = reader.read_f32_aligned()?;
        }
    }

    Ok(reader.bytes_consumed())
}

fn wire_count(kind: FieldKind, count: usize) -> CodecResult<u32> {
    u32::try_from(count).map_err(|_| CodecError::CountOverflow { kind, count })
}
