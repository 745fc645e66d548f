//! Standalone text extraction.
//!
//! Runs a single document through the extraction layer and prints the
//! result, so the text the matcher will actually score for a PDF or DOCX
//! resume can be inspected directly.

use anyhow::{Context, Result};
use std::path::Path;

use crate::extract::{self, DocumentFormat};

/// CLI entry point: extracts one file and prints the text to stdout.
pub fn run_extract(path: &Path, format_override: Option<&str>) -> Result<()> {
    let format = match format_override {
        Some(name) => match DocumentFormat::from_name(name) {
            Some(f) => f,
            None => {
                eprintln!(
                    "Error: unknown format '{}'. Must be txt, pdf, or docx.",
                    name
                );
                std::process::exit(1);
            }
        },
        None => match DocumentFormat::from_extension(path) {
            Some(f) => f,
            None => {
                eprintln!(
                    "Error: cannot detect the format of {}; pass --format.",
                    path.display()
                );
                std::process::exit(1);
            }
        },
    };

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    let text = match extract::extract_text(&bytes, format) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("--- {} ({}) ---", path.display(), format.as_str());
    println!("{}", text);
    Ok(())
}
