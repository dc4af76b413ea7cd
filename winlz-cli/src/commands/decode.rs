//! Decode command implementation.

use crate::utils::{SendError, create_progress_bar, format_size, output_path};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use winlz::{Format, decoder_for, detect};

/// Options for decoding files.
pub struct DecodeArgs<'a> {
    pub files: &'a [PathBuf],
    pub format: Option<Format>,
    /// Output directory, or `-` for standard output.
    pub output: Option<&'a Path>,
    pub max_size: usize,
    pub progress: bool,
    pub verbose: bool,
}

impl DecodeArgs<'_> {
    fn to_stdout(&self) -> bool {
        self.output.is_some_and(|p| p == Path::new("-"))
    }
}

/// Result of decoding one file.
struct Decoded {
    format: Format,
    input_len: usize,
    data: Vec<u8>,
}

fn decode_file(path: &Path, args: &DecodeArgs<'_>) -> Result<Decoded, SendError> {
    let input = std::fs::read(path)?;
    let format = match args.format.or_else(|| detect(&input)) {
        Some(format) => format,
        None => return Err("format not recognized; pass --format".into()),
    };

    tracing::debug!(file = %path.display(), %format, "decoding");
    let data = decoder_for(format).decode(&input, args.max_size)?;

    Ok(Decoded {
        format,
        input_len: input.len(),
        data,
    })
}

fn write_output(path: &Path, args: &DecodeArgs<'_>, data: &[u8]) -> Result<PathBuf, SendError> {
    let target = output_path(path, args.output);
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&target, data)?;
    Ok(target)
}

pub fn cmd_decode(args: &DecodeArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    if args.to_stdout() {
        let [file] = args.files else {
            return Err("--output - accepts a single input file".into());
        };
        let decoded = decode_file(file, args).map_err(|e| format!("{}: {}", file.display(), e))?;
        std::io::stdout().lock().write_all(&decoded.data)?;
        return Ok(());
    }

    let pb = create_progress_bar(args.files.len() as u64, args.progress);

    let results: Vec<(&PathBuf, Result<(Decoded, PathBuf), SendError>)> = args
        .files
        .par_iter()
        .map(|file| {
            let result = decode_file(file, args).and_then(|decoded| {
                let target = write_output(file, args, &decoded.data)?;
                Ok((decoded, target))
            });
            pb.inc(1);
            (file, result)
        })
        .collect();

    pb.finish_and_clear();

    let mut failed = 0usize;
    for (file, result) in &results {
        match result {
            Ok((decoded, target)) => {
                if args.verbose {
                    println!(
                        "  OK: {} -> {} ({}, {} -> {})",
                        file.display(),
                        target.display(),
                        decoded.format,
                        format_size(decoded.input_len),
                        format_size(decoded.data.len())
                    );
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("  FAILED: {} - {}", file.display(), e);
            }
        }
    }

    println!(
        "Decoded {} of {} file(s)",
        results.len() - failed,
        results.len()
    );

    if failed > 0 {
        return Err(format!("{} file(s) failed to decode", failed).into());
    }
    Ok(())
}
