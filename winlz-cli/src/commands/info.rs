//! Info command implementation.

use crate::utils::format_size;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use winlz::{Format, Summary, detect, inspect};

/// JSON view of an LZNT1 chunk summary.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Lznt1Json {
    chunks: usize,
    compressed_chunks: usize,
    stored_chunks: usize,
    stream_len: usize,
    max_output_len: usize,
}

/// JSON view of an LZFU header.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct LzfuJson {
    compression: String,
    compressed_size: u32,
    uncompressed_size: u32,
    crc: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    computed_crc: Option<u32>,
}

/// JSON output for the info command.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct InfoJson {
    file: String,
    format: String,
    size: usize,
    self_describing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    lznt1: Option<Lznt1Json>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lzfu: Option<LzfuJson>,
}

impl InfoJson {
    fn new(file: &PathBuf, format: Format, size: usize, summary: &Summary) -> Self {
        let mut info = Self {
            file: file.display().to_string(),
            format: format.name().to_string(),
            size,
            self_describing: format.is_self_describing(),
            lznt1: None,
            lzfu: None,
        };

        match summary {
            Summary::Lznt1(s) => {
                info.lznt1 = Some(Lznt1Json {
                    chunks: s.chunks,
                    compressed_chunks: s.compressed_chunks,
                    stored_chunks: s.stored_chunks,
                    stream_len: s.stream_len,
                    max_output_len: s.max_output_len,
                });
            }
            Summary::Lzfu(s) => {
                info.lzfu = Some(LzfuJson {
                    compression: s.header.compression.name().to_string(),
                    compressed_size: s.header.compressed_size,
                    uncompressed_size: s.header.uncompressed_size,
                    crc: s.header.crc,
                    computed_crc: s.computed_crc,
                });
            }
            Summary::Opaque { .. } => {}
        }
        info
    }
}

pub fn cmd_info(
    file: &PathBuf,
    format: Option<Format>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let format = format
        .or_else(|| detect(&data))
        .ok_or("format not recognized; pass --format")?;
    let summary = inspect(format, &data)?;

    if json {
        let info = InfoJson::new(file, format, data.len(), &summary);
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", file.display());
    println!("Format: {}", format);
    println!("Size: {} ({} bytes)", format_size(data.len()), data.len());

    match summary {
        Summary::Lznt1(s) => {
            println!();
            println!("Chunks:");
            println!("  Total: {}", s.chunks);
            println!("  Compressed: {}", s.compressed_chunks);
            println!("  Stored: {}", s.stored_chunks);
            println!("  Stream length: {} bytes", s.stream_len);
            if s.stream_len < data.len() {
                println!("  Trailing bytes: {}", data.len() - s.stream_len);
            }
            println!("  Decoded size: at most {} bytes", s.max_output_len);
        }
        Summary::Lzfu(s) => {
            println!();
            println!("Compressed RTF Header:");
            println!("  Type: {}", s.header.compression.name());
            println!("  Compressed size: {} bytes", s.header.compressed_size);
            println!("  Uncompressed size: {} bytes", s.header.uncompressed_size);
            println!("  CRC: {:#010x}", s.header.crc);
            if let Some(crc) = s.computed_crc {
                let status = if crc == s.header.crc { "OK" } else { "MISMATCH" };
                println!("  Computed CRC: {:#010x} ({})", crc, status);
            }
        }
        Summary::Opaque { .. } => {
            println!();
            println!("No header: the decoded size must come from the surrounding artifact.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lzfu_json_round_trip() {
        let mut data = Vec::new();
        for field in [14u32, 2, winlz::lzfu::MAGIC_UNCOMPRESSED, 0] {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(b"XY");

        let summary = inspect(Format::Lzfu, &data).unwrap();
        let info = InfoJson::new(&PathBuf::from("body.rtf"), Format::Lzfu, data.len(), &summary);
        let text = serde_json::to_string(&info).unwrap();

        assert!(text.contains("\"compression\":\"MELA\""));
        assert!(!text.contains("computed_crc"));
        assert!(!text.contains("lznt1"));
        assert_eq!(serde_json::from_str::<InfoJson>(&text).unwrap(), info);
    }

    #[test]
    fn test_lznt1_json_fields() {
        let data = [0x01, 0x30, b'o', b'k'];
        let summary = inspect(Format::Lznt1, &data).unwrap();
        let info = InfoJson::new(&PathBuf::from("c.bin"), Format::Lznt1, data.len(), &summary);

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["format"], "lznt1");
        assert_eq!(value["lznt1"]["stored_chunks"], 1);
        assert_eq!(value["self_describing"], false);
    }
}
