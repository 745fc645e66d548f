//! Resume collection: explicit files, directory scans, pasted blobs.
//!
//! Extraction failures never abort a run. Each failed resume is recorded
//! with its reason and the rest of the batch proceeds; the caller decides
//! how to surface the skip list.

use anyhow::{bail, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{Config, IntakeConfig, LimitsConfig};
use crate::extract::{self, DocumentFormat, ExtractError};
use crate::models::{ResumeEntry, SkippedResume};

/// Outcome of resume collection: entries that extracted cleanly plus a
/// record of everything that was skipped.
#[derive(Debug, Default)]
pub struct IntakeReport {
    pub entries: Vec<ResumeEntry>,
    pub skipped: Vec<SkippedResume>,
}

impl IntakeReport {
    pub fn skip(&mut self, identifier: &str, reason: impl ToString) {
        self.skipped.push(SkippedResume {
            identifier: identifier.to_string(),
            reason: reason.to_string(),
        });
    }
}

/// Collects resumes from all three sources in a fixed order: explicit
/// files, then directory matches, then pasted segments. The order fixes
/// identifiers and the stable tie-break downstream.
pub fn collect(
    files: &[PathBuf],
    dir: Option<&Path>,
    pasted: Option<&str>,
    config: &Config,
) -> Result<IntakeReport> {
    let mut report = IntakeReport::default();

    for path in files {
        let identifier = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        ingest_file(path, &identifier, &config.limits, &mut report);
    }

    if let Some(root) = dir {
        scan_directory(root, &config.intake, &config.limits, &mut report)?;
    }

    if let Some(blob) = pasted {
        for (i, segment) in split_pasted(blob, &config.paste.separator)
            .into_iter()
            .enumerate()
        {
            report
                .entries
                .push(ResumeEntry::new(format!("pasted-{}", i + 1), segment));
        }
    }

    Ok(report)
}

/// Extracts one in-memory document into the report. Format detection comes
/// from the identifier's extension; detection failures, the size bound, and
/// extraction errors all land in the skip list.
pub fn ingest_bytes(
    identifier: &str,
    bytes: &[u8],
    limits: &LimitsConfig,
    report: &mut IntakeReport,
) {
    let format = match DocumentFormat::from_extension(Path::new(identifier)) {
        Some(f) => f,
        None => {
            report.skip(
                identifier,
                ExtractError::UnsupportedFormat(identifier.to_string()),
            );
            return;
        }
    };

    if bytes.len() as u64 > limits.max_file_bytes {
        report.skip(
            identifier,
            ExtractError::TooLarge {
                size: bytes.len() as u64,
                limit: limits.max_file_bytes,
            },
        );
        return;
    }

    match extract::extract_text(bytes, format) {
        Ok(text) => report.entries.push(ResumeEntry::new(identifier, text)),
        Err(e) => report.skip(identifier, e),
    }
}

fn ingest_file(path: &Path, identifier: &str, limits: &LimitsConfig, report: &mut IntakeReport) {
    // Size check on metadata first, so an oversized file is never read
    // into memory at all.
    if let Ok(meta) = std::fs::metadata(path) {
        if meta.len() > limits.max_file_bytes {
            report.skip(
                identifier,
                ExtractError::TooLarge {
                    size: meta.len(),
                    limit: limits.max_file_bytes,
                },
            );
            return;
        }
    }

    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            report.skip(identifier, format!("failed to read file: {}", e));
            return;
        }
    };

    ingest_bytes(identifier, &bytes, limits, report);
}

fn scan_directory(
    root: &Path,
    intake: &IntakeConfig,
    limits: &LimitsConfig,
    report: &mut IntakeReport,
) -> Result<()> {
    if !root.exists() {
        bail!("resume directory does not exist: {}", root.display());
    }

    let include_set = build_globset(&intake.include_globs)?;
    let exclude_set = build_globset(&intake.exclude_globs)?;

    let mut matches: Vec<(String, PathBuf)> = Vec::new();

    let walker = WalkDir::new(root).follow_links(intake.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }

        matches.push((rel_str, path.to_path_buf()));
    }

    // Sort for deterministic ordering
    matches.sort_by(|a, b| a.0.cmp(&b.0));

    for (rel_str, path) in &matches {
        ingest_file(path, rel_str, limits, report);
    }

    Ok(())
}

/// Splits a pasted blob on the literal separator token. Segments are
/// trimmed; empty segments are dropped. A blob without the separator is
/// one resume.
pub fn split_pasted(blob: &str, separator: &str) -> Vec<String> {
    blob.split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
