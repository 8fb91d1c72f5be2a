//! Snapshot and delta encoding/decoding for replicated animation-variable
//! state.
//!
//! A [`Snapshot`] is a fixed-shape record of boolean, 32-bit integer, and
//! 32-bit float fields with purely positional identity. The codec offers two
//! paths:
//!
//! - **Full** ([`encode_full_snapshot`] / [`decode_full_snapshot`]): the
//!   bootstrap / keyframe path and the fallback when a diff cannot be
//!   trusted. Carries no counts; both sides must agree on the shape.
//! - **Delta** ([`encode_delta`] / [`apply_delta`]): per-tick path emitting
//!   only changed fields against a baseline the receiver already holds.
//!
//! # Design Principles
//!
//! - **Correctness first** - Round-trip invariants are documented and tested.
//! - **No steady-state allocations** - Scratch buffers are reusable.
//! - **Deterministic** - Same inputs produce same outputs.
//! - **Synchronous and lock-free** - All state lives in caller-supplied
//!   snapshots and buffers; concurrent calls against one snapshot are a
//!   caller-level data race and must be prevented by the owning system.
//!
//! # Example
//!
//! ```
//! use codec::{apply_delta, encode_delta, CodecLimits, DeltaConfig, Snapshot};
//!
//! let baseline = Snapshot {
//!     booleans: vec![true, false],
//!     integers: vec![5, 9],
//!     floats: vec![1.0],
//! };
//! let mut current = baseline.clone();
//! current.floats[0] = 2.0;
//!
//! let limits = CodecLimits::default();
//! let diff = encode_delta(&baseline, &current, &DeltaConfig::default(), &limits).unwrap();
//!
//! let mut target = baseline.clone();
//! apply_delta(&mut target, &diff, &limits).unwrap();
//! assert_eq!(target, current);
//! ```

mod delta;
mod error;
mod limits;
mod mask;
mod scratch;
mod snapshot;

pub use delta::{
    apply_delta, encode_delta, encode_delta_with_scratch, DeltaConfig, DEFAULT_FLOAT_EPSILON,
};
pub use error::{CodecError, CodecResult, FieldKind};
pub use limits::CodecLimits;
pub use scratch::DeltaScratch;
pub use snapshot::{decode_full_snapshot, encode_full_snapshot, Snapshot, SnapshotCounts};
