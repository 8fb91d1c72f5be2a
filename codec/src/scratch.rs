//! Reusable scratch buffers for codec operations.

/// Scratch buffers for delta encoding.
///
/// Reusing one of these across [`encode_delta_with_scratch`](crate::encode_delta_with_scratch)
/// calls keeps the steady-state encode path allocation-free once the buffers
/// have grown to the working-set size.
#[derive(Debug, Default)]
pub struct DeltaScratch {
    /// Change mask under construction, one entry per field.
    pub(crate) mask: Vec<bool>,
    /// Bit-packed wire form of `mask`.
    pub(crate) packed: Vec<u8>,
}

impl DeltaScratch {
    /// Creates a new scratch buffer with no pre-allocated capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
