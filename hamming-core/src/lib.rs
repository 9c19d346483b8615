//! # Hamming Core
//!
//! A variable-length SEC-DED (single-error-correct, double-error-detect)
//! Hamming codec with bit-level block interleaving for burst-error
//! resilience, plus a noise injector for exercising it.
//!
//! ## Modules
//!
//! - `bits`: Bit addressing helpers shared by every other module
//! - `constants`: Code layout constants and defaults
//! - `types`: Code block geometry, codec parameters and statistics
//! - `encoder`: Block, frame and stream encoding
//! - `decoder`: Error classification, correction and decoding
//! - `interleave`: Bit matrix interleaving
//! - `noise`: Bit-flip noise injection

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod bits;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod interleave;
pub mod noise;
pub mod types;

// Re-export commonly used types
pub use decoder::{BlockStatus, UncorrectablePolicy};
pub use error::CodecError;
pub use noise::{Jammer, NoiseConfig, NoiseModel, NoiseStats};
pub use types::{CodeLayout, CodecParams, DecodeStats, EncodeStats, FrameReport};

/// Result type alias for codec operations
pub type Result<T> = core::result::Result<T, CodecError>;
