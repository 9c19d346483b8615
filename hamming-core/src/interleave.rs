//! Burst-error mitigation: bit-level block interleaving.
//!
//! A buffer is viewed as a `groups × block_size` bit matrix, one row per
//! code block. Interleaving transposes that matrix so consecutive bits on
//! the wire come from different code blocks, and a contiguous burst of up to
//! `groups` flipped bits lands as at most one flipped bit per block.
//!
//! Transposing a `block_size × groups` matrix restores the original, so the
//! inverse is the same operation with the dimensions swapped
//! ([`block_deinterleave`]).

use crate::bits::copy_buffer_bit;
use crate::error::CodecError;
use alloc::vec;
use alloc::vec::Vec;

/// Interleave `source` across `groups` equal bit groups.
///
/// Source bit `i * block_size + j` (group `i`, offset `j`) moves to
/// `j * groups + i`, where `block_size = source.len() * 8 / groups`. The
/// output always has the same length as the input.
///
/// Fails with [`CodecError::GroupMismatch`] when `groups` is zero or does
/// not evenly divide the buffer's bit length.
pub fn block_interleave(source: &[u8], groups: usize) -> Result<Vec<u8>, CodecError> {
    let bits = source.len() * 8;
    if groups == 0 || bits % groups != 0 {
        return Err(CodecError::GroupMismatch { bits, groups });
    }

    let block_size = bits / groups;
    let mut result = vec![0u8; source.len()];
    for i in 0..groups {
        for j in 0..block_size {
            copy_buffer_bit(source, i * block_size + j, &mut result, j * groups + i);
        }
    }

    Ok(result)
}

/// Undo [`block_interleave`] performed with the same `groups`.
///
/// Reapplies the transpose with `source.len() * 8 / groups` groups. For a
/// transmission frame this is `code_size * 8`.
pub fn block_deinterleave(source: &[u8], groups: usize) -> Result<Vec<u8>, CodecError> {
    let bits = source.len() * 8;
    if groups == 0 || bits % groups != 0 {
        return Err(CodecError::GroupMismatch { bits, groups });
    }
    if bits == 0 {
        return Ok(Vec::new());
    }
    block_interleave(source, bits / groups)
}
