//! Utility functions for the CLI.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use winlz::Format;

/// Error type for file-level work running on the rayon pool.
pub type SendError = Box<dyn std::error::Error + Send + Sync>;

/// Compression format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// LZNT1 (NTFS compression)
    Lznt1,
    /// LZXPRESS plain LZ77
    #[value(alias = "lzxpress")]
    Xpress,
    /// LZXPRESS Huffman
    #[value(alias = "lzxpress-huffman")]
    XpressHuffman,
    /// LZFU compressed RTF
    #[value(alias = "rtf")]
    Lzfu,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Lznt1 => Format::Lznt1,
            FormatArg::Xpress => Format::Xpress,
            FormatArg::XpressHuffman => Format::XpressHuffman,
            FormatArg::Lzfu => Format::Lzfu,
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// Without `-v` the filter comes from `RUST_LOG` and defaults to `warn`;
/// `-v` forces `debug` and `-vv` forces `trace`.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => pb.set_style(style.progress_chars("█▓▒░ ")),
        Err(e) => tracing::debug!("progress template rejected: {}", e),
    }
    pb
}

/// Parse a byte size such as `4096`, `64K`, `16M` or `1G` (binary units).
pub fn parse_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let (digits, shift) = match s.char_indices().last() {
        Some((i, 'k' | 'K')) => (&s[..i], 10),
        Some((i, 'm' | 'M')) => (&s[..i], 20),
        Some((i, 'g' | 'G')) => (&s[..i], 30),
        _ => (s, 0),
    };

    let value: usize = digits
        .parse()
        .map_err(|_| format!("invalid size: {s:?}"))?;
    value
        .checked_mul(1usize << shift)
        .ok_or_else(|| format!("size too large: {s:?}"))
}

/// Where decoded output for `input` goes.
///
/// Without an output directory the result lands next to the input with a
/// `.out` suffix appended to the full file name.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "stream".into());
    name.push(".out");

    match output_dir {
        Some(dir) => dir.join(name),
        None => input.with_file_name(name),
    }
}

/// Format a byte count for humans.
pub fn format_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4096"), Ok(4096));
        assert_eq!(parse_size("64K"), Ok(64 * 1024));
        assert_eq!(parse_size("16m"), Ok(16 * 1024 * 1024));
        assert_eq!(parse_size("1G"), Ok(1 << 30));
        assert!(parse_size("").is_err());
        assert!(parse_size("12Q").is_err());
        assert!(parse_size("K").is_err());
    }

    #[test]
    fn test_output_path() {
        let input = Path::new("/evidence/stream.bin");
        assert_eq!(
            output_path(input, None),
            PathBuf::from("/evidence/stream.bin.out")
        );
        assert_eq!(
            output_path(input, Some(Path::new("/tmp/out"))),
            PathBuf::from("/tmp/out/stream.bin.out")
        );
    }

    #[test]
    fn test_format_arg_maps_to_format() {
        for arg in FormatArg::value_variants() {
            let format: Format = (*arg).into();
            assert_eq!(format.name(), arg.to_possible_value().unwrap().get_name());
        }
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }
}
