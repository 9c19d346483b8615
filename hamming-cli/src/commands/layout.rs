use anyhow::{Context, Result};
use hamming_core::{CodeLayout, CodecParams};
use serde::Serialize;

#[derive(Serialize)]
pub struct LayoutReport {
    pub layout: CodeLayout,
    pub groups_per_interleaving: usize,
    pub frame_data_size: usize,
    pub frame_size: usize,
    pub deinterleave_groups: usize,
    pub code_rate: f64,
}

pub fn describe(data_per_block: usize, groups: usize) -> Result<LayoutReport> {
    let params = CodecParams::new(data_per_block, groups);
    params.validate().context("Invalid codec parameters")?;

    let layout = params.layout();
    Ok(LayoutReport {
        layout,
        groups_per_interleaving: groups,
        frame_data_size: params.frame_data_size(),
        frame_size: params.frame_size(),
        deinterleave_groups: params.deinterleave_groups(),
        code_rate: layout.code_rate(),
    })
}

pub fn execute(data_per_block: usize, groups: usize, json: bool) -> Result<()> {
    let report = describe(data_per_block, groups)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let layout = &report.layout;
    println!("\n=== Code Layout ===");
    println!(
        "Code:              ({},{})",
        layout.total_bits,
        layout.data_bits()
    );
    println!("Parity bits:       {} + 1 extended", layout.parity_bits);
    println!("Code block:        {} bytes", layout.code_size);
    println!(
        "Frame:             {} blocks, {} bytes in, {} bytes out",
        report.groups_per_interleaving, report.frame_data_size, report.frame_size
    );
    println!("Code rate:         {:.3}", report.code_rate);

    Ok(())
}
