use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;

/// Bytes shown by default in previews
pub const DEFAULT_PREVIEW_BYTES: usize = 32;

/// Read at most `len` bytes from the start of a file
pub fn read_prefix(path: &str, len: usize) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path))?;
    let mut bytes = Vec::with_capacity(len);
    file.take(len as u64)
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read file: {}", path))?;
    Ok(bytes)
}

/// Render bytes as binary: four bytes per line, a blank line every 16 bytes
pub fn format_binary(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 9 + 1);
    for (i, byte) in bytes.iter().enumerate() {
        out.push_str(&format!("{:08b}", byte));

        if i == bytes.len() - 1 {
            break;
        } else if (i + 1) % 16 == 0 {
            out.push_str("\n\n");
        } else if (i + 1) % 4 == 0 {
            out.push('\n');
        } else {
            out.push(' ');
        }
    }
    out.push('\n');
    out
}

pub fn execute(input: &str, len: usize) -> Result<()> {
    let bytes = read_prefix(input, len)?;

    println!("\n{} ({} bytes shown):\n", input, bytes.len());
    print!("{}", format_binary(&bytes));
    println!("\nhex: {}", hex::encode(&bytes));

    Ok(())
}
