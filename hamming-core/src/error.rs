//! Error types for codec operations

use alloc::string::String;

/// Errors that can occur while encoding, decoding or distorting streams
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Codec or noise parameter outside its valid range
    #[cfg_attr(feature = "std", error("Invalid parameter: {0}"))]
    InvalidParameter(String),

    /// Interleaving group count does not evenly divide the buffer's bit length
    #[cfg_attr(
        feature = "std",
        error("Interleaving groups {groups} do not evenly divide {bits} bits")
    )]
    GroupMismatch {
        /// Bit length of the buffer.
        bits: usize,
        /// Requested number of groups.
        groups: usize,
    },

    /// Two bit flips detected in one code block
    #[cfg_attr(
        feature = "std",
        error("Two bit errors detected in one code block, cannot correct")
    )]
    DoubleBitError,

    /// Two bit flips detected while decoding a stream
    #[cfg_attr(
        feature = "std",
        error("Uncorrectable double bit error in frame {frame}, block {block}")
    )]
    UncorrectableFrame {
        /// Zero-based frame index in the stream.
        frame: u64,
        /// Zero-based code block index inside the frame.
        block: usize,
    },

    /// Syndrome points outside the block; input is not a Hamming code block
    #[cfg_attr(
        feature = "std",
        error("Malformed code block: syndrome address {address} outside {bits}-bit block")
    )]
    MalformedBlock {
        /// The computed error address.
        address: usize,
        /// Bit length of the block.
        bits: usize,
    },

    /// IO error during read/write
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),
}

impl CodecError {
    /// True for the recoverable, stream-level double-error conditions
    pub fn is_uncorrectable(&self) -> bool {
        matches!(
            self,
            CodecError::DoubleBitError | CodecError::UncorrectableFrame { .. }
        )
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}
