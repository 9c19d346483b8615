//! Fuzzing entry points for hamming-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode_stream

use hamming_core::{CodecParams, UncorrectablePolicy};

/// Classify and correct an arbitrary buffer as a single code block
pub fn fuzz_correct(data: &[u8]) {
    use hamming_core::decoder::{classify, correct_block};

    // Should never panic, whatever the bytes are
    let _ = classify(data);
    let _ = correct_block(data);
}

/// Decode an arbitrary stream with small parameters taken from its first two bytes
pub fn fuzz_decode_stream(data: &[u8]) {
    use hamming_core::decoder::decode_stream;

    let (params, body) = match data {
        [dpb, groups, rest @ ..] => (
            CodecParams::new(*dpb as usize % 32 + 1, *groups as usize % 16 + 1),
            rest,
        ),
        _ => (CodecParams::default(), data),
    };

    let mut out = Vec::new();
    let _ = decode_stream(
        &mut &body[..],
        &mut out,
        &params,
        UncorrectablePolicy::Passthrough,
    );
}

/// Interleave then deinterleave with an arbitrary group count
pub fn fuzz_interleave(data: &[u8], groups: usize) {
    use hamming_core::interleave::{block_deinterleave, block_interleave};

    if let Ok(interleaved) = block_interleave(data, groups) {
        let restored = block_deinterleave(&interleaved, groups);
        assert_eq!(restored.as_deref(), Ok(data));
    }
}
