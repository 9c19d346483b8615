//! Core types: code block geometry, codec parameters and statistics

use crate::bits::bit_length;
use crate::constants::{
    DEFAULT_DATA_PER_BLOCK, DEFAULT_GROUPS_PER_INTERLEAVING, MAX_DATA_PER_BLOCK,
    MAX_FRAME_SIZE, MAX_GROUPS_PER_INTERLEAVING, PARITY_BITS_OFFSET,
};
use crate::error::CodecError;
use alloc::format;
use serde::{Deserialize, Serialize};

/// Geometry of one SEC-DED code block for a given data block size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeLayout {
    /// Data bytes carried by the block
    pub data_per_block: usize,

    /// Hamming parity bits, not counting the extended parity bit
    pub parity_bits: u32,

    /// Data bits + parity bits + extended parity bit
    pub total_bits: usize,

    /// Encoded size in bytes, `total_bits` rounded up to whole bytes
    pub code_size: usize,
}

impl CodeLayout {
    /// Compute the layout for `data_per_block` data bytes
    ///
    /// `parity_bits = bit_length(data_per_block) + 3`, plus one more for the
    /// sizes (31, 63, 127, ... bytes) where that count would leave a power of
    /// two inside the block and one data bit without an address.
    ///
    /// `data_per_block` must be at least 1; [`CodecParams::validate`] enforces this
    /// for stream operations.
    pub const fn for_data_len(data_per_block: usize) -> Self {
        let data_bits = data_per_block * 8;
        let mut parity_bits = bit_length(data_per_block) + PARITY_BITS_OFFSET;
        // Every power of two below total_bits must be a parity address
        while (1usize << parity_bits) < data_bits + parity_bits as usize + 1 {
            parity_bits += 1;
        }
        let total_bits = data_bits + parity_bits as usize + 1;
        Self {
            data_per_block,
            parity_bits,
            total_bits,
            code_size: total_bits.div_ceil(8),
        }
    }

    /// Number of data bits
    pub const fn data_bits(&self) -> usize {
        self.data_per_block * 8
    }

    /// Fraction of transmitted bits that carry data
    pub fn code_rate(&self) -> f64 {
        self.data_bits() as f64 / (self.code_size * 8) as f64
    }
}

/// Parameters shared by the encoder and the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecParams {
    /// Data bytes per code block
    pub data_per_block: usize,

    /// Code blocks interleaved together into one transmission frame
    pub groups_per_interleaving: usize,
}

impl CodecParams {
    /// Create new codec parameters
    pub const fn new(data_per_block: usize, groups_per_interleaving: usize) -> Self {
        Self {
            data_per_block,
            groups_per_interleaving,
        }
    }

    /// Validate the parameters
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.data_per_block == 0 {
            return Err(CodecError::InvalidParameter(
                "data_per_block must be at least 1".into(),
            ));
        }

        if self.data_per_block > MAX_DATA_PER_BLOCK {
            return Err(CodecError::InvalidParameter(format!(
                "data_per_block {} exceeds maximum {}",
                self.data_per_block, MAX_DATA_PER_BLOCK
            )));
        }

        if self.groups_per_interleaving == 0 {
            return Err(CodecError::InvalidParameter(
                "groups_per_interleaving must be at least 1".into(),
            ));
        }

        if self.groups_per_interleaving > MAX_GROUPS_PER_INTERLEAVING {
            return Err(CodecError::InvalidParameter(format!(
                "groups_per_interleaving {} exceeds maximum {}",
                self.groups_per_interleaving, MAX_GROUPS_PER_INTERLEAVING
            )));
        }

        match self
            .layout()
            .code_size
            .checked_mul(self.groups_per_interleaving)
        {
            Some(frame_size) if frame_size <= MAX_FRAME_SIZE => Ok(()),
            _ => Err(CodecError::InvalidParameter(format!(
                "{} blocks of {} bytes exceed the {} byte frame limit",
                self.groups_per_interleaving,
                self.data_per_block,
                MAX_FRAME_SIZE
            ))),
        }
    }

    /// Layout of a single code block
    pub const fn layout(&self) -> CodeLayout {
        CodeLayout::for_data_len(self.data_per_block)
    }

    /// Plain bytes consumed per transmission frame
    pub const fn frame_data_size(&self) -> usize {
        self.data_per_block * self.groups_per_interleaving
    }

    /// Encoded bytes per transmission frame
    pub const fn frame_size(&self) -> usize {
        self.layout().code_size * self.groups_per_interleaving
    }

    /// Group count that undoes the encoder's interleaving of one frame
    pub const fn deinterleave_groups(&self) -> usize {
        self.layout().code_size * 8
    }
}

impl Default for CodecParams {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PER_BLOCK, DEFAULT_GROUPS_PER_INTERLEAVING)
    }
}

/// Counters reported by the stream encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeStats {
    /// Plain bytes read
    pub bytes_in: u64,

    /// Interleaved frames written
    pub frames: u64,

    /// Encoded bytes written
    pub bytes_out: u64,
}

/// Correction counters for one decoded frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Code blocks without any error
    pub clean: usize,

    /// Code blocks where only the extended parity bit was flipped
    pub extended_parity_only: usize,

    /// Code blocks with one corrected bit
    pub corrected: usize,

    /// Code blocks with a double bit error passed through uncorrected
    pub uncorrectable: usize,
}

impl FrameReport {
    /// Total code blocks seen
    pub fn blocks(&self) -> usize {
        self.clean + self.extended_parity_only + self.corrected + self.uncorrectable
    }
}

/// Counters reported by the stream decoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Interleaved frames read
    pub frames: u64,

    /// Frames that ended early and were zero padded
    pub truncated_frames: u64,

    /// Code blocks processed
    pub blocks: u64,

    /// Code blocks without any error
    pub clean: u64,

    /// Code blocks where only the extended parity bit was flipped
    pub extended_parity_only: u64,

    /// Code blocks with one corrected bit
    pub corrected: u64,

    /// Code blocks with a double bit error passed through uncorrected
    pub uncorrectable: u64,

    /// Decoded bytes written
    pub bytes_out: u64,
}

impl DecodeStats {
    /// Fold one frame's report into the running totals
    pub fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        self.blocks += report.blocks() as u64;
        self.clean += report.clean as u64;
        self.extended_parity_only += report.extended_parity_only as u64;
        self.corrected += report.corrected as u64;
        self.uncorrectable += report.uncorrectable as u64;
    }

    /// Percentage of code blocks that needed no correction
    pub fn clean_rate(&self) -> f64 {
        if self.blocks == 0 {
            return 100.0;
        }
        (self.clean as f64 / self.blocks as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_single_byte() {
        let layout = CodeLayout::for_data_len(1);
        assert_eq!(layout.parity_bits, 4);
        assert_eq!(layout.total_bits, 13);
        assert_eq!(layout.code_size, 2);
    }

    #[test]
    fn test_layout_72_64() {
        let layout = CodeLayout::for_data_len(8);
        assert_eq!(layout.parity_bits, 7);
        assert_eq!(layout.total_bits, 72);
        assert_eq!(layout.code_size, 9);
        assert!((layout.code_rate() - 64.0 / 72.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_layout_largest_block() {
        let layout = CodeLayout::for_data_len(MAX_DATA_PER_BLOCK);
        assert_eq!(layout.total_bits, 8_388_633);
    }

    #[test]
    fn test_params_validate() {
        assert!(CodecParams::default().validate().is_ok());
        assert!(CodecParams::new(0, 8).validate().is_err());
        assert!(CodecParams::new(8, 0).validate().is_err());
        assert!(CodecParams::new(MAX_DATA_PER_BLOCK + 1, 1).validate().is_err());
    }

    #[test]
    fn test_params_validate_frame_limit() {
        assert!(CodecParams::new(MAX_DATA_PER_BLOCK, 1).validate().is_ok());
        assert!(CodecParams::new(8, MAX_GROUPS_PER_INTERLEAVING)
            .validate()
            .is_ok());

        let err = CodecParams::new(MAX_DATA_PER_BLOCK, MAX_GROUPS_PER_INTERLEAVING)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidParameter(_)));

        // 64 blocks of just over 1 MiB each
        assert!(CodecParams::new(MAX_DATA_PER_BLOCK, 64).validate().is_err());
        assert!(CodecParams::new(MAX_DATA_PER_BLOCK, 63).validate().is_ok());
    }

    #[test]
    fn test_layout_all_data_bits_addressable() {
        // 2^b - 1 bytes need one parity bit beyond bit_length + 3
        for (n, parity_bits, total_bits) in [
            (30, 8, 249),
            (31, 9, 258),
            (63, 10, 515),
            (127, 11, 1028),
            (128, 11, 1036),
        ] {
            let layout = CodeLayout::for_data_len(n);
            assert_eq!(layout.parity_bits, parity_bits, "n = {}", n);
            assert_eq!(layout.total_bits, total_bits, "n = {}", n);
            assert!(1usize << layout.parity_bits >= layout.total_bits);
        }
    }

    #[test]
    fn test_frame_sizes() {
        let params = CodecParams::new(8, 8);
        assert_eq!(params.frame_data_size(), 64);
        assert_eq!(params.frame_size(), 72);
        assert_eq!(params.deinterleave_groups(), 72);
    }

    #[test]
    fn test_decode_stats_record() {
        let mut stats = DecodeStats::default();
        stats.record(&FrameReport {
            clean: 6,
            extended_parity_only: 0,
            corrected: 2,
            uncorrectable: 0,
        });
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.blocks, 8);
        assert_eq!(stats.corrected, 2);
        assert!((stats.clean_rate() - 75.0).abs() < 1e-9);
    }
}
