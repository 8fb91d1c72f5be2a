//! Limits for codec-level decoding.

use crate::error::{CodecError, CodecResult, FieldKind};
use crate::snapshot::SnapshotCounts;

/// Codec-specific limits enforced before any count-driven allocation.
///
/// Field counts arrive on the wire in a delta stream; without a cap, a
/// hostile peer could declare millions of fields and force huge allocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of boolean fields per snapshot.
    pub max_booleans: usize,
    /// Maximum number of integer fields per snapshot.
    pub max_integers: usize,
    /// Maximum number of float fields per snapshot.
    pub max_floats: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_booleans: 2048,
            max_integers: 1024,
            max_floats: 1024,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_booleans: 32,
            max_integers: 16,
            max_floats: 16,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_booleans: usize::MAX,
            max_integers: usize::MAX,
            max_floats: usize::MAX,
        }
    }

    pub(crate) fn check(&self, counts: &SnapshotCounts) -> CodecResult<()> {
        check_one(FieldKind::Booleans, self.max_booleans, counts.booleans)?;
        check_one(FieldKind::Integers, self.max_integers, counts.integers)?;
        check_one(FieldKind::Floats, self.max_floats, counts.floats)?;
        Ok(())
    }
}

fn check_one(kind: FieldKind, limit: usize, actual: usize) -> CodecResult<()> {
    if actual > limit {
        return Err(CodecError::LimitExceeded {
            kind,
            limit,
            actual,
        });
    }
    Ok(())
}
