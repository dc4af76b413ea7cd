//! Detect command implementation.

use std::path::PathBuf;
use winlz::{Format, detect};

pub fn cmd_detect(file: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let format = detect(&data);

    println!("File: {}", file.display());
    match format {
        Some(format) => {
            println!("Format: {}", format);
            println!("Name: {}", format.name());
        }
        None => {
            println!("Format: unknown");
            println!(
                "Note: {} and {} streams carry no signature; pass --format when decoding",
                Format::Xpress,
                Format::XpressHuffman
            );
        }
    }
    println!("Leading bytes: {:02X?}", &data[..data.len().min(16)]);

    Ok(())
}
