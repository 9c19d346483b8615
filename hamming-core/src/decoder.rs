//! SEC-DED Hamming correction and decoding
//!
//! Correction XORs together the addresses of all set bits. For a valid code
//! block that value is zero; after a single flip it equals the flipped
//! address. The overall parity (including the extended parity bit at address
//! 0) tells a single flip apart from a double flip:
//!
//! | error address | parity | status                    |
//! |---------------|--------|---------------------------|
//! | 0             | 0      | [`BlockStatus::Clean`]    |
//! | 0             | 1      | [`BlockStatus::ExtendedParityFlipped`] |
//! | != 0          | 1      | [`BlockStatus::SingleBitError`] |
//! | != 0          | 0      | [`BlockStatus::DoubleBitError`] |
//!
//! Three or more flips cannot be told apart from zero or one flips and may be
//! "corrected" into the wrong data. That is a property of the code.

use crate::bits::{buffer_bit, copy_buffer_bit, flip_buffer_bit, is_power_of_two};
use crate::constants::{EXTENDED_PARITY_ADDRESS, FIRST_DATA_ADDRESS};
use crate::error::CodecError;
use crate::interleave::block_deinterleave;
use crate::types::{CodecParams, FrameReport};
use alloc::vec;
use alloc::vec::Vec;
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use crate::encoder::read_full;
#[cfg(feature = "std")]
use crate::types::DecodeStats;
#[cfg(feature = "std")]
use std::io::{Read, Write};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Raw error syndrome of a code block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syndrome {
    /// XOR of the addresses of all set bits except address 0
    pub error_address: usize,

    /// XOR of all bits, extended parity bit included
    pub parity: u8,
}

/// Classification of a code block's error state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    /// No error
    Clean,

    /// Only the extended parity bit is wrong; data and parity bits are intact
    ExtendedParityFlipped,

    /// Exactly one bit flipped, at `address`
    SingleBitError {
        /// Global bit address of the flipped bit
        address: usize,
    },

    /// Exactly two bits flipped; detectable but not correctable
    DoubleBitError,
}

/// What the frame decoder does with a block that has a double bit error
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UncorrectablePolicy {
    /// Stop decoding and report the position of the bad block
    #[default]
    Abort,

    /// Emit the block's data bits as received, count it and continue
    Passthrough,
}

/// Compute the syndrome of a code block
pub fn syndrome(block: &[u8]) -> Syndrome {
    let bits = block.len() * 8;
    let mut error_address = 0;
    let mut parity = if bits > 0 {
        buffer_bit(block, EXTENDED_PARITY_ADDRESS)
    } else {
        0
    };

    for addr in 1..bits {
        if buffer_bit(block, addr) == 1 {
            error_address ^= addr;
            parity ^= 1;
        }
    }

    Syndrome {
        error_address,
        parity,
    }
}

/// Classify the error state of a code block without modifying it.
///
/// Fails with [`CodecError::MalformedBlock`] when a single error is indicated
/// at an address outside the block, which only happens with three or more
/// flips or with input that was never Hamming encoded.
pub fn classify(block: &[u8]) -> Result<BlockStatus, CodecError> {
    let bits = block.len() * 8;
    let Syndrome {
        error_address,
        parity,
    } = syndrome(block);

    match (error_address, parity) {
        (0, 0) => Ok(BlockStatus::Clean),
        (0, _) => Ok(BlockStatus::ExtendedParityFlipped),
        (address, 1) if address < bits => Ok(BlockStatus::SingleBitError { address }),
        (address, 1) => Err(CodecError::MalformedBlock { address, bits }),
        (_, _) => Ok(BlockStatus::DoubleBitError),
    }
}

/// Correct a code block in place and report what was found.
///
/// A double bit error leaves the block untouched and returns
/// [`CodecError::DoubleBitError`].
pub fn correct_block_in_place(block: &mut [u8]) -> Result<BlockStatus, CodecError> {
    let status = classify(block)?;
    match status {
        BlockStatus::Clean => Ok(status),
        BlockStatus::ExtendedParityFlipped => {
            flip_buffer_bit(block, EXTENDED_PARITY_ADDRESS);
            Ok(status)
        }
        BlockStatus::SingleBitError { address } => {
            flip_buffer_bit(block, address);
            Ok(status)
        }
        BlockStatus::DoubleBitError => Err(CodecError::DoubleBitError),
    }
}

/// Return a corrected copy of a code block.
///
/// - no error: the block unchanged
/// - one bit flipped, including the extended parity bit: the block with that
///   bit restored
/// - two bits flipped: [`CodecError::DoubleBitError`]
pub fn correct_block(block: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut corrected = block.to_vec();
    correct_block_in_place(&mut corrected)?;
    Ok(corrected)
}

/// Strip parity from a code block, returning `data_size` data bytes.
///
/// Stops early if the block runs out of bits; the remainder stays zero.
pub fn decode_block(block: &[u8], data_size: usize) -> Vec<u8> {
    let mut data = vec![0u8; data_size];
    let source_bits = block.len() * 8;
    let target_bits = data_size * 8;

    let mut target_addr = 0;
    let mut source_addr = FIRST_DATA_ADDRESS;
    while source_addr < source_bits && target_addr < target_bits {
        if !is_power_of_two(source_addr) {
            copy_buffer_bit(block, source_addr, &mut data, target_addr);
            target_addr += 1;
        }
        source_addr += 1;
    }

    data
}

/// Decode one interleaved frame back into plain bytes.
///
/// `frame` must be exactly [`CodecParams::frame_size`] bytes. With
/// [`UncorrectablePolicy::Abort`] a double error fails with
/// [`CodecError::UncorrectableFrame`] (frame index 0).
pub fn decode_frame(
    frame: &[u8],
    params: &CodecParams,
    policy: UncorrectablePolicy,
) -> Result<(Bytes, FrameReport), CodecError> {
    decode_frame_at(frame, params, policy, 0)
}

fn decode_frame_at(
    frame: &[u8],
    params: &CodecParams,
    policy: UncorrectablePolicy,
    frame_index: u64,
) -> Result<(Bytes, FrameReport), CodecError> {
    params.validate()?;

    if frame.len() != params.frame_size() {
        return Err(CodecError::InvalidParameter(alloc::format!(
            "frame of {} bytes does not match frame size {}",
            frame.len(),
            params.frame_size()
        )));
    }

    let code_size = params.layout().code_size;
    let mut blocks = block_deinterleave(frame, params.groups_per_interleaving)?;
    let mut out = BytesMut::with_capacity(params.frame_data_size());
    let mut report = FrameReport::default();

    for (index, block) in blocks.chunks_mut(code_size).enumerate() {
        match correct_block_in_place(block) {
            Ok(BlockStatus::Clean) => report.clean += 1,
            Ok(BlockStatus::ExtendedParityFlipped) => report.extended_parity_only += 1,
            #[cfg_attr(not(feature = "logging"), allow(unused_variables))]
            Ok(BlockStatus::SingleBitError { address }) => {
                #[cfg(feature = "logging")]
                debug!(
                    "Corrected bit {} in frame {}, block {}",
                    address, frame_index, index
                );
                report.corrected += 1;
            }
            Ok(BlockStatus::DoubleBitError) | Err(CodecError::DoubleBitError) => match policy {
                UncorrectablePolicy::Abort => {
                    #[cfg(feature = "logging")]
                    warn!(
                        "Double bit error in frame {}, block {}; aborting",
                        frame_index, index
                    );
                    return Err(CodecError::UncorrectableFrame {
                        frame: frame_index,
                        block: index,
                    });
                }
                UncorrectablePolicy::Passthrough => {
                    #[cfg(feature = "logging")]
                    warn!(
                        "Double bit error in frame {}, block {}; passing through uncorrected",
                        frame_index, index
                    );
                    report.uncorrectable += 1;
                }
            },
            Err(e) => return Err(e),
        }

        out.put_slice(&decode_block(block, params.data_per_block));
    }

    Ok((out.freeze(), report))
}

/// Decode a whole encoded byte slice.
///
/// A trailing partial frame is zero padded before decoding, as in
/// [`decode_stream`].
pub fn decode_to_vec(
    data: &[u8],
    params: &CodecParams,
    policy: UncorrectablePolicy,
) -> Result<Vec<u8>, CodecError> {
    params.validate()?;

    let frame_size = params.frame_size();
    let mut out = Vec::with_capacity(data.len().div_ceil(frame_size) * params.frame_data_size());
    let mut padded = vec![0u8; frame_size];

    for (index, chunk) in data.chunks(frame_size).enumerate() {
        padded.fill(0);
        padded[..chunk.len()].copy_from_slice(chunk);
        let (decoded, _) = decode_frame_at(&padded, params, policy, index as u64)?;
        out.extend_from_slice(&decoded);
    }

    Ok(out)
}

/// Decode interleaved frames from `reader` and write plain bytes to `writer`.
///
/// Each frame is de-interleaved, every code block corrected and stripped of
/// parity. A short final frame is zero padded to full size. Output written
/// before a fatal error stays on the writer.
#[cfg(feature = "std")]
pub fn decode_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    params: &CodecParams,
    policy: UncorrectablePolicy,
) -> Result<DecodeStats, CodecError> {
    params.validate()?;

    let mut stats = DecodeStats::default();
    let mut buffer = vec![0u8; params.frame_size()];

    #[cfg(feature = "logging")]
    debug!(
        "Decoding stream: {} bytes per frame, de-interleaving over {} groups",
        params.frame_size(),
        params.deinterleave_groups()
    );

    loop {
        buffer.fill(0);
        let read = read_full(reader, &mut buffer)?;
        if read == 0 {
            break;
        }

        if read < buffer.len() {
            #[cfg(feature = "logging")]
            warn!(
                "Frame {} truncated: {} of {} bytes, zero padding",
                stats.frames,
                read,
                buffer.len()
            );
            stats.truncated_frames += 1;
        }

        let (decoded, report) = decode_frame_at(&buffer, params, policy, stats.frames)?;
        writer.write_all(&decoded)?;
        stats.record(&report);
        stats.bytes_out += decoded.len() as u64;

        if read < buffer.len() {
            break;
        }
    }

    writer.flush()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode_block, encode_to_vec};

    const ONE_BYTE_BLOCK: [u8; 2] = [0b0111_0111, 0b0111_1000];
    const NINE_BYTE_BLOCK: [u8; 9] = [0xF7, 0x78, 0x82, 0x01, 0x7E, 0x02, 0x80, 0xC6, 0x39];

    #[test]
    fn test_classify_clean() {
        assert_eq!(classify(&ONE_BYTE_BLOCK).unwrap(), BlockStatus::Clean);
        assert_eq!(classify(&[0u8; 9]).unwrap(), BlockStatus::Clean);
    }

    #[test]
    fn test_classify_extended_parity() {
        let mut block = ONE_BYTE_BLOCK;
        flip_buffer_bit(&mut block, 0);
        assert_eq!(classify(&block).unwrap(), BlockStatus::ExtendedParityFlipped);
        assert_eq!(correct_block(&block).unwrap(), ONE_BYTE_BLOCK);
        // Data bits are unaffected either way
        assert_eq!(decode_block(&block, 1), [0xFF]);
    }

    #[test]
    fn test_classify_single() {
        let block = [0b0111_0111, 0b0111_1001];
        assert_eq!(
            classify(&block).unwrap(),
            BlockStatus::SingleBitError { address: 15 }
        );
        assert_eq!(correct_block(&block).unwrap(), ONE_BYTE_BLOCK);
    }

    #[test]
    fn test_classify_double() {
        let block = [0b0111_0100, 0b0111_1000];
        assert_eq!(classify(&block).unwrap(), BlockStatus::DoubleBitError);
        assert_eq!(correct_block(&block), Err(CodecError::DoubleBitError));
    }

    #[test]
    fn test_correct_nine_byte_block() {
        let mut one_error = NINE_BYTE_BLOCK;
        one_error[3] = 0x00;
        assert_eq!(correct_block(&one_error).unwrap(), NINE_BYTE_BLOCK);

        let mut two_errors = one_error;
        two_errors[5] = 0x03;
        assert_eq!(correct_block(&two_errors), Err(CodecError::DoubleBitError));
    }

    #[test]
    fn test_malformed_block() {
        // Three flips whose addresses XOR to 127, beyond a 72-bit block
        let mut block = [0u8; 9];
        for addr in [64, 62, 1] {
            flip_buffer_bit(&mut block, addr);
        }
        assert_eq!(
            classify(&block),
            Err(CodecError::MalformedBlock {
                address: 127,
                bits: 72
            })
        );
    }

    #[test]
    fn test_decode_block() {
        assert_eq!(decode_block(&ONE_BYTE_BLOCK, 1), [0xFF]);
        assert_eq!(
            decode_block(&NINE_BYTE_BLOCK, 8),
            [0xFF, 0x00, 0x80, 0x7F, 0x01, 0x40, 0x63, 0x39]
        );
    }

    #[test]
    fn test_decode_block_short_source() {
        // Asking for more data than the block holds leaves the tail zero
        let decoded = decode_block(&ONE_BYTE_BLOCK, 2);
        assert_eq!(decoded, [0xFF, 0x00]);
    }

    #[test]
    fn test_decode_frame_reports_corrections() {
        let params = CodecParams::new(2, 4);
        let data = *b"hamming!";
        let mut frame = encode_to_vec(&data, &params).unwrap();
        // Four adjacent wire bits hit four different blocks
        for addr in 20..24 {
            flip_buffer_bit(&mut frame, addr);
        }

        let (decoded, report) = decode_frame(&frame, &params, UncorrectablePolicy::Abort).unwrap();
        assert_eq!(&decoded[..], &data[..]);
        assert_eq!(report.blocks(), 4);
        assert_eq!(report.corrected + report.extended_parity_only, 4);
    }

    #[test]
    fn test_decode_frame_counts_every_status() {
        let params = CodecParams::new(1, 4);
        let data = [0x11, 0x22, 0x33, 0x44];
        let mut blocks = Vec::new();
        for byte in data {
            blocks.extend_from_slice(&encode_block(&[byte]));
        }
        // Block 0 clean, block 1 extended parity, block 2 single, block 3 double
        let block_bits = 16;
        flip_buffer_bit(&mut blocks, block_bits);
        flip_buffer_bit(&mut blocks, 2 * block_bits + 6);
        flip_buffer_bit(&mut blocks, 3 * block_bits + 5);
        flip_buffer_bit(&mut blocks, 3 * block_bits + 9);
        let frame = crate::interleave::block_interleave(&blocks, 4).unwrap();

        let (decoded, report) =
            decode_frame(&frame, &params, UncorrectablePolicy::Passthrough).unwrap();
        assert_eq!(
            report,
            FrameReport {
                clean: 1,
                extended_parity_only: 1,
                corrected: 1,
                uncorrectable: 1,
            }
        );
        assert_eq!(&decoded[..3], &data[..3]);

        assert_eq!(
            decode_frame(&frame, &params, UncorrectablePolicy::Abort),
            Err(CodecError::UncorrectableFrame { frame: 0, block: 3 })
        );
    }

    #[test]
    fn test_decode_frame_policy() {
        let params = CodecParams::new(1, 1);
        let mut frame = encode_block(&[0x42]);
        flip_buffer_bit(&mut frame, 5);
        flip_buffer_bit(&mut frame, 6);

        assert_eq!(
            decode_frame(&frame, &params, UncorrectablePolicy::Abort),
            Err(CodecError::UncorrectableFrame { frame: 0, block: 0 })
        );

        let (_, report) = decode_frame(&frame, &params, UncorrectablePolicy::Passthrough).unwrap();
        assert_eq!(report.uncorrectable, 1);
    }

    #[test]
    fn test_decode_frame_rejects_wrong_size() {
        let params = CodecParams::new(8, 8);
        assert!(decode_frame(&[0u8; 71], &params, UncorrectablePolicy::Abort).is_err());
    }

    #[test]
    fn test_decode_stream_stats() {
        let params = CodecParams::default();
        let data = vec![0xA5u8; 128];
        let encoded = encode_to_vec(&data, &params).unwrap();

        let mut out = Vec::new();
        let stats = decode_stream(
            &mut &encoded[..],
            &mut out,
            &params,
            UncorrectablePolicy::Abort,
        )
        .unwrap();

        assert_eq!(out, data);
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.blocks, 16);
        assert_eq!(stats.clean, 16);
        assert_eq!(stats.truncated_frames, 0);
        assert_eq!(stats.bytes_out, 128);
    }
}
