//! Constants and limits for the Hamming codec

/// Address of the extended (global) parity bit in every code block
pub const EXTENDED_PARITY_ADDRESS: usize = 0;

/// First address that can hold a data bit
///
/// Addresses 0, 1 and 2 are always parity: 0 is the extended parity bit,
/// 1 and 2 are Hamming parity bits. The smallest code is (4,1).
pub const FIRST_DATA_ADDRESS: usize = 3;

/// Parity bits beyond the bit length of the data block size
///
/// `parity_bits = bit_length(data_per_block) + PARITY_BITS_OFFSET`
pub const PARITY_BITS_OFFSET: u32 = 3;

/// Default data bytes per code block: 8 bytes gives the (72,64) code used by ECC DRAM
pub const DEFAULT_DATA_PER_BLOCK: usize = 8;

/// Default number of code blocks interleaved into one transmission frame
pub const DEFAULT_GROUPS_PER_INTERLEAVING: usize = 8;

/// Largest supported data block (1 MiB), the (8388633,8388608) code
pub const MAX_DATA_PER_BLOCK: usize = 1024 * 1024;

/// Largest supported interleaving depth
pub const MAX_GROUPS_PER_INTERLEAVING: usize = 64 * 1024;

/// Largest encoded transmission frame (64 MiB), bounding per-frame buffers
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Default read/write buffer of the noise injector in independent mode
pub const DEFAULT_NOISE_BUFFER_SIZE: usize = 512;

/// Default bit flip probability of the noise injector (1%)
pub const DEFAULT_FLIP_PROBABILITY: f64 = 0.01;

/// Upper bound on the noise injector's buffer when derived from a burst rate
pub const MAX_NOISE_BUFFER_SIZE: usize = 16 * 1024 * 1024;
