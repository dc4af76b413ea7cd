//! winlz CLI - decoders for Windows and Office compression formats
//!
//! Decodes LZNT1, LZXPRESS (plain and Huffman) and LZFU compressed RTF
//! streams carved out of disk images, registry hives, prefetch files and
//! mail stores.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{DecodeArgs, cmd_decode, cmd_detect, cmd_info};
use std::path::PathBuf;
use utils::{FormatArg, init_logging, parse_size};

#[derive(Parser)]
#[command(name = "winlz")]
#[command(
    author,
    version,
    about = "Decode LZNT1, LZXPRESS and LZFU streams from Windows artifacts"
)]
#[command(long_about = "
winlz is a Pure Rust decoder for the compression formats used by Windows
and Outlook. Supported formats: LZNT1, LZXPRESS, LZXPRESS Huffman, LZFU

LZNT1 and LZFU are detected from their headers. LZXPRESS streams carry no
signature and need --format.

Examples:
  winlz detect carved.bin
  winlz decode carved.bin
  winlz decode -f xpress -m 64K page.bin
  winlz decode -f xpress-huffman -o - prefetch.body > prefetch.raw
  winlz decode -P -o out/ stream1.bin stream2.bin stream3.bin
  winlz info message.rtf
  winlz info --json chunk.lznt1
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one or more compressed streams
    #[command(alias = "d")]
    Decode {
        /// Files to decode
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Stream format (detected from the header if not specified)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Output directory, or `-` to write a single result to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Largest output accepted per stream (e.g. 4096, 64K, 16M)
        #[arg(short, long, value_parser = parse_size, default_value = "256M")]
        max_size: usize,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Detect stream format
    Detect {
        /// File to detect
        file: PathBuf,
    },

    /// Show header and chunk information about a stream
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// Stream format (detected from the header if not specified)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            files,
            format,
            output,
            max_size,
            progress,
        } => cmd_decode(&DecodeArgs {
            files: &files,
            format: format.map(Into::into),
            output: output.as_deref(),
            max_size,
            progress,
            verbose: cli.verbose > 0,
        }),
        Commands::Detect { file } => cmd_detect(&file),
        Commands::Info { file, format, json } => cmd_info(&file, format.map(Into::into), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_decode_arguments() {
        let cli = Cli::try_parse_from([
            "winlz", "-v", "decode", "-f", "lzxpress", "-m", "64K", "-o", "-", "a.bin",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Decode {
                files,
                format,
                output,
                max_size,
                progress,
            } => {
                assert_eq!(files, vec![PathBuf::from("a.bin")]);
                assert_eq!(format, Some(FormatArg::Xpress));
                assert_eq!(output, Some(PathBuf::from("-")));
                assert_eq!(max_size, 64 * 1024);
                assert!(!progress);
            }
            _ => panic!("expected decode"),
        }
    }

    #[test]
    fn test_decode_requires_files() {
        assert!(Cli::try_parse_from(["winlz", "decode"]).is_err());
    }
}
