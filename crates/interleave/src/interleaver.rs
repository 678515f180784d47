//! Interleaver - policy selection and publication of the merged sequence

use contracts::{InterleavePolicy, Lines, MergedLines};
use observability::record_merge;
use tracing::{debug, instrument};

use crate::{union, waves};

/// Merge `sequences` with the given policy
pub fn interleave(policy: InterleavePolicy, sequences: Vec<Lines>) -> Lines {
    match policy {
        InterleavePolicy::Union => union(sequences),
        InterleavePolicy::Waves => waves(sequences),
    }
}

/// Interleaver bound to one policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Interleaver {
    policy: InterleavePolicy,
}

impl Interleaver {
    pub fn new(policy: InterleavePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InterleavePolicy {
        self.policy
    }

    /// Merge the collected sequences and publish the immutable result
    #[instrument(
        name = "interleaver_merge",
        skip(self, sequences),
        fields(policy = %self.policy, sources = sequences.len())
    )]
    pub fn merge(&self, sequences: Vec<Lines>) -> MergedLines {
        let merged = interleave(self.policy, sequences);
        debug!(lines = merged.len(), "Merged sequence built");
        record_merge(self.policy.as_str(), merged.len());
        merged.into()
    }
}
