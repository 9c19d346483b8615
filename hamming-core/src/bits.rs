//! Bit addressing helpers
//!
//! Two conventions live side by side in the codec and must not be mixed up:
//!
//! - **Buffer addressing** ([`buffer_bit`], [`flip_buffer_bit`],
//!   [`copy_buffer_bit`]): a global, zero-based bit address over a byte
//!   buffer, most-significant bit first. Address 0 is the leftmost bit of
//!   byte 0, address 8 the leftmost bit of byte 1.
//! - **Value probing** ([`address_bit`]): bit `pos` of an integer counted
//!   from the least-significant end. The parity computation uses this to ask
//!   whether an address's own binary representation has bit `k` set.

/// Byte holding global bit address `addr`
#[inline]
pub const fn byte_index(addr: usize) -> usize {
    addr / 8
}

/// Position of global bit address `addr` inside its byte, counted from the LSB
#[inline]
pub const fn bit_index_in_byte(addr: usize) -> u32 {
    7 - (addr % 8) as u32
}

/// Bit `pos` (LSB = 0) of an integer value.
///
/// `address_bit(0b10, 0) == 0`, `address_bit(0b10, 1) == 1`.
#[inline]
pub const fn address_bit(value: usize, pos: u32) -> u8 {
    ((value >> pos) & 1) as u8
}

/// Bit at global MSB-first address `addr` of `buf`
#[inline]
pub fn buffer_bit(buf: &[u8], addr: usize) -> u8 {
    (buf[byte_index(addr)] >> bit_index_in_byte(addr)) & 1
}

/// Flip bit `pos` (LSB = 0) of a byte and return the new byte
#[inline]
pub const fn flip_bit(byte: u8, pos: u32) -> u8 {
    byte ^ (1 << pos)
}

/// Flip the bit at global address `addr` in place
#[inline]
pub fn flip_buffer_bit(buf: &mut [u8], addr: usize) {
    let idx = byte_index(addr);
    buf[idx] = flip_bit(buf[idx], bit_index_in_byte(addr));
}

/// Copy bit `source_index` of `source` into bit `target_index` of `target`,
/// returning the resulting target byte. Indices count from the LSB.
#[inline]
pub const fn copy_bit(source: u8, source_index: u32, target: u8, target_index: u32) -> u8 {
    let source_bit = (source >> source_index) & 1;
    let target_bit = (target >> target_index) & 1;
    if source_bit != target_bit {
        flip_bit(target, target_index)
    } else {
        target
    }
}

/// Copy the bit at global address `src_addr` of `src` to `dst_addr` of `dst`
#[inline]
pub fn copy_buffer_bit(src: &[u8], src_addr: usize, dst: &mut [u8], dst_addr: usize) {
    let idx = byte_index(dst_addr);
    dst[idx] = copy_bit(
        src[byte_index(src_addr)],
        bit_index_in_byte(src_addr),
        dst[idx],
        bit_index_in_byte(dst_addr),
    );
}

/// True when `n` has exactly one bit set. Zero is not a power of two.
#[inline]
pub const fn is_power_of_two(n: usize) -> bool {
    n.count_ones() == 1
}

/// Number of significant bits needed to represent `n` (0 for 0)
#[inline]
pub const fn bit_length(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}
