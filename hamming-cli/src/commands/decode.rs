use super::{open_input, open_output, preview_files, write_report, STDIO_PATH};
use crate::OnUncorrectable;
use anyhow::{Context, Result};
use colored::*;
use hamming_core::{decoder::decode_stream, CodecParams, DecodeStats};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct DecodeReport<'a> {
    input: &'a str,
    params: CodecParams,
    stats: DecodeStats,
}

pub fn execute(
    input: &str,
    output: &str,
    data_per_block: usize,
    groups: usize,
    on_uncorrectable: OnUncorrectable,
    report: Option<&str>,
    progress: bool,
) -> Result<DecodeStats> {
    let params = CodecParams::new(data_per_block, groups);
    params.validate().context("Invalid codec parameters")?;

    info!(
        "Decoding {} to {} ({} bytes per block, {} blocks per frame, {:?} on double errors)",
        input, output, data_per_block, groups, on_uncorrectable
    );

    let mut source = open_input(input, progress)?;
    let mut sink = open_output(output)?;

    let stats = decode_stream(&mut source.reader, &mut sink, &params, on_uncorrectable.into())
        .with_context(|| format!("Decoding {} stopped", input))?;
    source.finish();
    drop(sink);

    if stats.uncorrectable > 0 {
        warn!(
            "{} blocks had uncorrectable double bit errors",
            stats.uncorrectable
        );
    }

    if let Some(report_path) = report {
        write_report(
            report_path,
            &DecodeReport {
                input,
                params,
                stats,
            },
        )?;
        info!("Decode report written to: {}", report_path);
    }

    if output != STDIO_PATH {
        println!("\n=== Decode Results ===");
        println!("Frames read:       {}", stats.frames);
        println!("Truncated frames:  {}", stats.truncated_frames);
        println!("Code blocks:       {}", stats.blocks);
        println!("Clean blocks:      {}", stats.clean);
        println!("Parity-bit only:   {}", stats.extended_parity_only);
        println!("Corrected blocks:  {}", stats.corrected.to_string().yellow());
        if stats.uncorrectable > 0 {
            println!(
                "Uncorrectable:     {}",
                stats.uncorrectable.to_string().red()
            );
            println!("{} Decoded with uncorrected blocks", "✗".red());
        } else {
            println!("Uncorrectable:     {}", stats.uncorrectable);
            println!("{} Decoded", "✓".green());
        }
        preview_files(input, output);
    }

    Ok(stats)
}
