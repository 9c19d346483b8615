//! Library entry for hamming-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use hamming_core::UncorrectablePolicy;

/// What `decode` does when a code block has two flipped bits
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OnUncorrectable {
    /// Stop at the first uncorrectable block
    #[default]
    Abort,
    /// Emit the block uncorrected and keep going
    Passthrough,
}

impl From<OnUncorrectable> for UncorrectablePolicy {
    fn from(value: OnUncorrectable) -> Self {
        match value {
            OnUncorrectable::Abort => UncorrectablePolicy::Abort,
            OnUncorrectable::Passthrough => UncorrectablePolicy::Passthrough,
        }
    }
}
