//! CLI command implementations.

pub mod clusters;
pub mod shims;

use anyhow::Result;

use crate::formatters::{Formatter, OutputFormat, get_formatter};

/// Resolves the formatter for `--output`.
pub(crate) fn formatter_for(output: &str) -> Result<Box<dyn Formatter>> {
    Ok(get_formatter(OutputFormat::from_str(output)?))
}

/// Prints formatted output to stdout, leaving a trailing newline as produced.
pub(crate) fn emit(output: &str) {
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
}
