//! Fixed test vectors for the (13,8) and (72,64) codes and the 8-way interleaver
//!
//! Vectors are written as hex strings; every frame is 72 bytes.

use hamming_core::{
    decoder::{correct_block, decode_block, decode_stream, decode_to_vec},
    encoder::{encode_block, encode_frame, encode_stream},
    interleave::block_interleave,
    CodecError, CodecParams, UncorrectablePolicy,
};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789he";
const ALPHABET_LONG: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789hello_world!";

/// Interleaved (72,64) frame of `ALPHABET`, 8 blocks per frame
const ALPHABET_FRAME: &str = concat!(
    "8e0c440089fef1332a540f0efe00fef1f237",
    "5a01f00100fee1274a01e1fe00feffe1274a",
    "e11f0100fce32749e01cfc00fce32749fce0",
    "0300fde32649fce2fc00d0fde366a81d1e03",
);

/// Second frame of `ALPHABET_LONG`: "llo_world!" followed by zero padding
const TAIL_FRAME: &str = concat!(
    "00c0c00000c0c0000080c000000080c0c000",
    "808000400080800080808080008080008080",
    "808080008080800080808000808000808080",
    "800080808000008000000080800080800000",
);

fn frame(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str).unwrap()
}

fn default_params() -> CodecParams {
    CodecParams::new(8, 8)
}

#[test]
fn vector_encode_one_byte_block() {
    assert_eq!(encode_block(&[0b1111_1111]), [0b0111_0111, 0b0111_1000]);
}

#[test]
fn vector_correct_one_byte_block() {
    let expected = [0b0111_0111, 0b0111_1000];

    let one_error = [0b0111_0111, 0b0111_1001];
    assert_eq!(correct_block(&one_error).unwrap(), expected);

    let two_errors = [0b0111_0100, 0b0111_1000];
    assert_eq!(correct_block(&two_errors), Err(CodecError::DoubleBitError));
}

#[test]
fn vector_decode_one_byte_block() {
    assert_eq!(decode_block(&[0b0111_0111, 0b0111_1000], 1), [0xFF]);
}

#[test]
fn vector_72_64_block() {
    let data = hex::decode("ff00807f01406339").unwrap();
    let block = hex::decode("f77882017e0280c639").unwrap();

    assert_eq!(encode_block(&data), block);
    assert_eq!(decode_block(&block, 8), data);

    let one_error = hex::decode("f77882007e0280c639").unwrap();
    assert_eq!(correct_block(&one_error).unwrap(), block);

    let two_errors = hex::decode("f77882007e0380c639").unwrap();
    assert_eq!(correct_block(&two_errors), Err(CodecError::DoubleBitError));
}

#[test]
fn vector_interleave_72_bytes() {
    let source = b"123456789223456789323456789423456789523456789623456789723456789823456789";
    let expected = concat!(
        "0000ffff011e66aa0000ffff0000ff000000",
        "ffff0000ffff0000ffff00ff00000000ffff",
        "00ff00ff0000ffff00ffff000000ffff00ff",
        "ffff0000ffffff0000000000ffffff0000ff",
    );
    assert_eq!(block_interleave(source, 8).unwrap(), frame(expected));
}

#[test]
fn vector_encode_alphabet_frame() {
    let params = default_params();

    // Encoding block by block then interleaving matches the frame encoder
    let mut blocks = Vec::new();
    for chunk in ALPHABET.chunks(8) {
        blocks.extend_from_slice(&encode_block(chunk));
    }
    assert_eq!(block_interleave(&blocks, 8).unwrap(), frame(ALPHABET_FRAME));

    assert_eq!(encode_frame(ALPHABET, &params).unwrap(), frame(ALPHABET_FRAME));

    let mut out = Vec::new();
    encode_stream(&mut &ALPHABET[..], &mut out, &params).unwrap();
    assert_eq!(out, frame(ALPHABET_FRAME));
}

#[test]
fn vector_encode_stream_with_padding() {
    let mut expected = frame(ALPHABET_FRAME);
    expected.extend_from_slice(&frame(TAIL_FRAME));

    let mut out = Vec::new();
    let stats = encode_stream(&mut &ALPHABET_LONG[..], &mut out, &default_params()).unwrap();
    assert_eq!(out, expected);
    assert_eq!(stats.frames, 2);
    assert_eq!(stats.bytes_in, ALPHABET_LONG.len() as u64);
}

#[test]
fn vector_decode_alphabet_frame() {
    let encoded = frame(ALPHABET_FRAME);
    let mut out = Vec::new();
    decode_stream(
        &mut &encoded[..],
        &mut out,
        &default_params(),
        UncorrectablePolicy::Abort,
    )
    .unwrap();
    assert_eq!(out, ALPHABET);
}

#[test]
fn vector_decode_padded_stream() {
    let mut encoded = frame(ALPHABET_FRAME);
    encoded.extend_from_slice(&frame(TAIL_FRAME));

    // The stream carries no length, so the padding of the last frame comes back
    let mut expected = ALPHABET_LONG.to_vec();
    expected.resize(128, 0);

    let decoded = decode_to_vec(&encoded, &default_params(), UncorrectablePolicy::Abort).unwrap();
    assert_eq!(decoded, expected);
}
