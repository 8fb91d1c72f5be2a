//! Bit packing for boolean sequences and change masks.
//!
//! Wire packing rule, both directions: bit `i & 7` of byte `i >> 3` holds
//! element `i` (least-significant-bit first within each byte). A trailing
//! partial byte is zero-padded.

use crate::delta::DeltaConfig;
use crate::snapshot::Snapshot;

/// Packs a boolean sequence 8-per-byte into `out`.
///
/// `out` is cleared first; afterwards it holds exactly `ceil(bits.len() / 8)`
/// bytes.
pub(crate) fn pack_bits(bits: &[bool], out: &mut Vec<u8>) {
    out.clear();
    out.resize(bits.len().div_ceil(8), 0);
    for (i, &bit) in bits.iter().enumerate() {
        if bit {
            out[i >> 3] |= 1 << (i & 7);
        }
    }
}

/// Reads element `i` of a packed boolean sequence.
///
/// Callers must ensure `i >> 3` is within `bytes`.
pub(crate) fn bit_at(bytes: &[u8], i: usize) -> bool {
    (bytes[i >> 3] >> (i & 7)) & 1 == 1
}

/// Number of bytes a packed sequence of `bits` booleans occupies.
pub(crate) const fn packed_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

/// Builds the change mask for a delta from `baseline` to `current` into `mask`.
///
/// Layout: one entry per boolean, integer, and float field of `current`,
/// in that order. Boolean entries carry the literal new value (a boolean's
/// value is its own single bit of information). Integer and float entries
/// are `true` iff the field must be retransmitted: the index is beyond the
/// baseline's length, or the values differ. Floats compare under the
/// configured epsilon so floating-point noise does not trigger spurious
/// retransmission.
pub(crate) fn build_change_mask(
    baseline: &Snapshot,
    current: &Snapshot,
    config: &DeltaConfig,
    mask: &mut Vec<bool>,
) {
    mask.clear();
    mask.reserve(current.total_fields());

    mask.extend_from_slice(&current.booleans);

    for (i, &value) in current.integers.iter().enumerate() {
        let changed = baseline.integers.get(i) != Some(&value);
        mask.push(changed);
    }
    for (i, &value) in current.floats.iter().enumerate() {
        let changed = match baseline.floats.get(i) {
            Some(&prev) => !config.nearly_equal(prev, value),
            None => true,
        };
        mask.push(changed);
    }
}
