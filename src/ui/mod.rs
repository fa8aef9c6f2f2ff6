//! User interface module - result emission and diagnostics.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing to stdout, stderr and the GitHub Actions output file
//!
//! stdout only ever carries the machine-readable result; everything meant
//! for humans goes to stderr.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::resolver::TagResult;

pub mod formatter;

pub use formatter::{format_error, format_json, format_outputs, format_summary, output_pairs};

/// Environment variable naming the GitHub Actions step output file
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Write the result to `out` as `key=value` lines or JSON.
pub fn write_result<W: Write>(out: &mut W, result: &TagResult, json: bool) -> Result<()> {
    if json {
        let text = format_json(result).map_err(io::Error::from)?;
        writeln!(out, "{}", text)?;
    } else {
        out.write_all(format_outputs(result).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

/// Print the result on stdout.
pub fn print_result(result: &TagResult, json: bool) -> Result<()> {
    let stdout = io::stdout();
    write_result(&mut stdout.lock(), result, json)
}

/// Append the output variables to a GitHub Actions output file.
///
/// The file is created if it does not exist yet.
pub fn append_github_output(path: &Path, result: &TagResult) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_outputs(result).as_bytes())?;
    Ok(())
}

/// Append to the file named by `$GITHUB_OUTPUT`, if set.
///
/// Returns whether anything was written.
pub fn publish_github_output(result: &TagResult) -> Result<bool> {
    match std::env::var_os(GITHUB_OUTPUT_ENV).filter(|path| !path.is_empty()) {
        Some(path) => {
            append_github_output(Path::new(&path), result)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Print the human summary on stderr.
pub fn display_summary(result: &TagResult) {
    eprintln!("{}", format_summary(result));
}

/// Print an error message on stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}
