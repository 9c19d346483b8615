use super::{open_input, open_output, preview_files, write_report, STDIO_PATH};
use anyhow::{Context, Result};
use colored::*;
use hamming_core::{Jammer, NoiseConfig, NoiseStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

#[derive(Serialize)]
struct DistortReport<'a> {
    input: &'a str,
    seed: Option<u64>,
    config: NoiseConfig,
    stats: NoiseStats,
}

pub fn execute(
    input: &str,
    output: &str,
    probability: f64,
    max_burst: Option<usize>,
    buffer_size: usize,
    seed: Option<u64>,
    report: Option<&str>,
) -> Result<NoiseStats> {
    let config = match max_burst {
        Some(max_burst) => NoiseConfig::burst(probability, max_burst),
        None => NoiseConfig::independent(probability),
    }
    .with_buffer_size(buffer_size);

    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut jammer = Jammer::new(config, rng).context("Invalid noise parameters")?;

    info!(
        "Distorting {} to {}: p = {}, {:?}, {} byte buffers",
        input,
        output,
        probability,
        config.model,
        config.read_buffer_size()
    );

    let mut source = open_input(input, false)?;
    let mut sink = open_output(output)?;

    let stats = jammer
        .distort_stream(&mut source.reader, &mut sink)
        .with_context(|| format!("Failed to distort {}", input))?;
    drop(sink);

    info!(
        "Flipped {} bits in {} bursts over {} bytes",
        stats.bits_flipped, stats.bursts, stats.bytes
    );

    if let Some(report_path) = report {
        write_report(
            report_path,
            &DistortReport {
                input,
                seed,
                config,
                stats,
            },
        )?;
        info!("Distort report written to: {}", report_path);
    }

    if output != STDIO_PATH {
        println!("\n=== Distort Results ===");
        println!("Bytes processed:   {}", stats.bytes);
        println!("Bits flipped:      {}", stats.bits_flipped.to_string().yellow());
        println!("Bursts:            {}", stats.bursts);
        println!("Observed rate:     {:.5}", stats.flip_rate());
        println!("{} Distorted", "✓".green());
        preview_files(input, output);
    }

    Ok(stats)
}
