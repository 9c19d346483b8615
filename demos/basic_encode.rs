//! Basic encoding example

use hamming_core::{
    decoder::decode_to_vec, encoder::encode_to_vec, CodecParams, UncorrectablePolicy,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Hamming Basic Encoding Example\n");

    // (72,64) code, 8 blocks interleaved per frame
    let params = CodecParams::default();
    let layout = params.layout();
    println!(
        "Code: ({},{}) in {} bytes, {} parity bits, rate {:.3}",
        layout.total_bits,
        layout.data_bits(),
        layout.code_size,
        layout.parity_bits,
        layout.code_rate()
    );

    let message = b"Hamming codes correct one bit and detect two per block.";
    let encoded = encode_to_vec(message, &params)?;
    println!(
        "Encoded {} bytes into {} bytes ({} frames)",
        message.len(),
        encoded.len(),
        encoded.len() / params.frame_size()
    );

    std::fs::write("example_output.ham", &encoded)?;
    println!("Wrote example_output.ham");

    let decoded = decode_to_vec(&encoded, &params, UncorrectablePolicy::Abort)?;
    println!(
        "Decoded: {}",
        String::from_utf8_lossy(&decoded[..message.len()])
    );
    println!("Use 'hamming decode --input example_output.ham --output -' to read it back");

    Ok(())
}
