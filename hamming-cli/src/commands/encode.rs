use super::{open_input, open_output, preview_files, STDIO_PATH};
use anyhow::{Context, Result};
use colored::*;
use hamming_core::{encoder::encode_stream, CodecParams, EncodeStats};
use tracing::info;

pub fn execute(
    input: &str,
    output: &str,
    data_per_block: usize,
    groups: usize,
    progress: bool,
) -> Result<EncodeStats> {
    let params = CodecParams::new(data_per_block, groups);
    params.validate().context("Invalid codec parameters")?;

    let layout = params.layout();
    info!(
        "Encoding {} to {} with ({},{}) code, {} blocks per frame",
        input,
        output,
        layout.total_bits,
        layout.data_bits(),
        groups
    );

    let mut source = open_input(input, progress)?;
    let mut sink = open_output(output)?;

    let stats = encode_stream(&mut source.reader, &mut sink, &params)
        .with_context(|| format!("Failed to encode {}", input))?;
    source.finish();
    drop(sink);

    info!(
        "Encoded {} bytes into {} frames ({} bytes)",
        stats.bytes_in, stats.frames, stats.bytes_out
    );

    if output != STDIO_PATH {
        println!("\n=== Encode Results ===");
        println!("Bytes read:        {}", stats.bytes_in);
        println!("Frames written:    {}", stats.frames);
        println!("Bytes written:     {}", stats.bytes_out);
        println!("Code rate:         {:.3}", layout.code_rate());
        println!("{} Encoded", "✓".green());
        preview_files(input, output);
    }

    Ok(stats)
}
