//! Scheduling flags.

/// Flags recognized by the schedulers.
///
/// Defaults match the wire format: persist the final result, skip
/// intermediates, and block for the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Persist the result of the last step.
    pub store_final: bool,

    /// Persist every step's result.
    pub store_intermediate: bool,

    /// Wait for the result instead of returning a handle.
    /// Only consulted by the single-document scheduler; batches always
    /// block on the whole group.
    pub block: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            store_final: true,
            store_intermediate: false,
            block: true,
        }
    }
}

impl PipelineOptions {
    /// Sets whether the final result is persisted.
    pub fn store_final(mut self, store_final: bool) -> Self {
        self.store_final = store_final;
        self
    }

    /// Sets whether every intermediate result is persisted.
    pub fn store_intermediate(mut self, store_intermediate: bool) -> Self {
        self.store_intermediate = store_intermediate;
        self
    }

    /// Sets whether the single-document scheduler blocks for the value.
    pub fn block(mut self, block: bool) -> Self {
        self.block = block;
        self
    }
}
