//! SEC-DED Hamming encoding
//!
//! A code block of `n` data bytes is laid out over `total_bits` addresses
//! (see [`CodeLayout`]):
//!
//! 1. Address 0: extended parity bit, XOR of every other bit
//! 2. Addresses 1, 2, 4, 8, ...: Hamming parity bits
//! 3. Every remaining address from 3 upward: data bits, in order
//! 4. Padding up to the next whole byte: always 0
//!
//! The stream encoder batches `groups_per_interleaving` code blocks into a
//! transmission frame and interleaves it bit by bit.

use crate::bits::{address_bit, buffer_bit, copy_buffer_bit, flip_buffer_bit, is_power_of_two};
use crate::constants::{EXTENDED_PARITY_ADDRESS, FIRST_DATA_ADDRESS};
use crate::error::CodecError;
use crate::interleave::block_interleave;
use crate::types::{CodeLayout, CodecParams};
use alloc::vec;
use alloc::vec::Vec;
use bytes::{BufMut, BytesMut};
#[cfg(feature = "std")]
use crate::types::EncodeStats;
#[cfg(feature = "std")]
use std::io::{ErrorKind, Read, Write};

#[cfg(feature = "logging")]
use tracing::debug;

/// Encode one data block into a SEC-DED code block.
///
/// The code size adapts to `data.len()`: one byte gives the (13,8) code in
/// two bytes, eight bytes give the (72,64) code in nine bytes.
pub fn encode_block(data: &[u8]) -> Vec<u8> {
    let layout = CodeLayout::for_data_len(data.len());
    let total_bits = layout.total_bits;
    let data_bits = layout.data_bits();
    let mut block = vec![0u8; layout.code_size];

    // Scatter data bits over the non-parity addresses
    let mut source_addr = 0;
    for target_addr in FIRST_DATA_ADDRESS..total_bits {
        if source_addr >= data_bits {
            break;
        }
        if !is_power_of_two(target_addr) {
            copy_buffer_bit(data, source_addr, &mut block, target_addr);
            source_addr += 1;
        }
    }
    debug_assert_eq!(source_addr, data_bits, "code block lost data bits");

    // Parity bit 2^k covers every data address with bit k set
    for k in 0..layout.parity_bits {
        let parity = (FIRST_DATA_ADDRESS..total_bits)
            .filter(|&addr| !is_power_of_two(addr) && address_bit(addr, k) == 1)
            .fold(0u8, |acc, addr| acc ^ buffer_bit(&block, addr));

        if parity == 1 {
            flip_buffer_bit(&mut block, 1 << k);
        }
    }

    // Extended parity covers everything after address 0
    let extended = (1..total_bits).fold(0u8, |acc, addr| acc ^ buffer_bit(&block, addr));
    if extended == 1 {
        flip_buffer_bit(&mut block, EXTENDED_PARITY_ADDRESS);
    }

    block
}

/// Encode up to one frame's worth of plain bytes into an interleaved frame.
///
/// `data` may be shorter than [`CodecParams::frame_data_size`]; the missing
/// bytes are treated as zeros. Longer input is rejected.
pub fn encode_frame(data: &[u8], params: &CodecParams) -> Result<Vec<u8>, CodecError> {
    params.validate()?;

    let frame_data_size = params.frame_data_size();
    if data.len() > frame_data_size {
        return Err(CodecError::InvalidParameter(alloc::format!(
            "frame input of {} bytes exceeds {} bytes per frame",
            data.len(),
            frame_data_size
        )));
    }

    let mut padded = vec![0u8; params.data_per_block];
    let mut frame = BytesMut::with_capacity(params.frame_size());

    for group in 0..params.groups_per_interleaving {
        let start = (group * params.data_per_block).min(data.len());
        let end = ((group + 1) * params.data_per_block).min(data.len());
        padded.fill(0);
        padded[..end - start].copy_from_slice(&data[start..end]);
        frame.put_slice(&encode_block(&padded));
    }

    block_interleave(&frame, params.groups_per_interleaving)
}

/// Encode a whole byte slice, frame by frame
pub fn encode_to_vec(data: &[u8], params: &CodecParams) -> Result<Vec<u8>, CodecError> {
    params.validate()?;

    let frame_data_size = params.frame_data_size();
    let frames = data.len().div_ceil(frame_data_size);
    let mut out = Vec::with_capacity(frames * params.frame_size());
    for chunk in data.chunks(frame_data_size) {
        out.extend_from_slice(&encode_frame(chunk, params)?);
    }
    Ok(out)
}

/// Encode everything readable from `reader` and write interleaved frames to `writer`.
///
/// Reads one frame's worth of plain bytes at a time. A short final read is
/// zero padded to a full frame. Empty input writes nothing.
#[cfg(feature = "std")]
pub fn encode_stream<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    params: &CodecParams,
) -> Result<EncodeStats, CodecError> {
    params.validate()?;

    let mut stats = EncodeStats::default();
    let mut buffer = vec![0u8; params.frame_data_size()];

    #[cfg(feature = "logging")]
    debug!(
        "Encoding stream: {} bytes per block, {} blocks per frame, {} bytes per frame",
        params.data_per_block,
        params.groups_per_interleaving,
        params.frame_size()
    );

    loop {
        let read = read_full(reader, &mut buffer)?;
        if read == 0 {
            break;
        }

        let frame = encode_frame(&buffer[..read], params)?;
        writer.write_all(&frame)?;

        stats.bytes_in += read as u64;
        stats.frames += 1;
        stats.bytes_out += frame.len() as u64;

        #[cfg(feature = "logging")]
        debug!("Encoded frame {} ({} plain bytes)", stats.frames - 1, read);

        if read < buffer.len() {
            break;
        }
    }

    writer.flush()?;
    Ok(stats)
}

/// Fill `buf` as far as the reader allows, returning the byte count.
///
/// Only returns less than `buf.len()` at end of input.
#[cfg(feature = "std")]
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
