//! Subcommand implementations

pub mod decode;
pub mod distort;
pub mod encode;
pub mod inspect;
pub mod layout;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};

/// Path that stands for stdin or stdout
pub const STDIO_PATH: &str = "-";

/// An opened input, optionally reporting read progress
pub(crate) struct Input {
    pub reader: Box<dyn Read>,
    pub progress: Option<ProgressBar>,
}

impl Input {
    pub fn finish(&self) {
        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
    }
}

/// Open `path` for reading, or stdin for `-`
pub(crate) fn open_input(path: &str, progress: bool) -> Result<Input> {
    if path == STDIO_PATH {
        return Ok(Input {
            reader: Box::new(io::stdin().lock()),
            progress: None,
        });
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
    let reader = BufReader::new(file);

    if !progress {
        return Ok(Input {
            reader: Box::new(reader),
            progress: None,
        });
    }

    let len = fs::metadata(path)
        .with_context(|| format!("Failed to stat input file: {}", path))?
        .len();
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
            .context("Invalid progress template")?,
    );

    Ok(Input {
        reader: Box::new(pb.wrap_read(reader)),
        progress: Some(pb),
    })
}

/// Open `path` for writing, or stdout for `-`
pub(crate) fn open_output(path: &str) -> Result<Box<dyn Write>> {
    if path == STDIO_PATH {
        return Ok(Box::new(io::stdout().lock()));
    }

    let file =
        File::create(path).with_context(|| format!("Failed to create output file: {}", path))?;
    Ok(Box::new(BufWriter::new(file)))
}

/// Write a serializable report as pretty JSON
pub(crate) fn write_report<T: serde::Serialize>(path: &str, report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path))?;
    Ok(())
}

/// Print binary previews of the input and output files, when both are files
pub(crate) fn preview_files(input: &str, output: &str) {
    for path in [input, output] {
        if path == STDIO_PATH {
            continue;
        }
        match inspect::read_prefix(path, inspect::DEFAULT_PREVIEW_BYTES) {
            Ok(bytes) => println!("\n{} :\n\n{}", path, inspect::format_binary(&bytes)),
            Err(e) => tracing::warn!("Cannot preview {}: {}", path, e),
        }
    }
}
