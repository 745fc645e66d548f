use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use crate::config::Config;
use crate::intake;
use crate::matcher;
use crate::models::MatchReport;

const EXCERPT_CHARS: usize = 120;

/// Everything the `match` subcommand needs, resolved from CLI flags.
pub struct MatchInvocation {
    pub resume_files: Vec<PathBuf>,
    pub jd_file: Option<PathBuf>,
    pub jd_text: Option<String>,
    pub dir: Option<PathBuf>,
    pub paste: Option<String>,
    pub paste_file: Option<PathBuf>,
    pub limit: Option<usize>,
    pub full: bool,
    pub json: bool,
}

pub fn run_match(config: &Config, invocation: MatchInvocation) -> Result<()> {
    let job_description = resolve_job_description(&invocation)?;
    let pasted = resolve_pasted(&invocation)?;

    if invocation.resume_files.is_empty() && invocation.dir.is_none() && pasted.is_none() {
        bail!("No resumes given. Pass files, --dir, or --paste/--paste-file.");
    }

    let intake_report = intake::collect(
        &invocation.resume_files,
        invocation.dir.as_deref(),
        pasted.as_deref(),
        config,
    )?;

    if intake_report.entries.is_empty() {
        for skip in &intake_report.skipped {
            eprintln!("skipped {}: {}", skip.identifier, skip.reason);
        }
        bail!("None of the given resumes could be read.");
    }

    let mut results = matcher::rank(
        &job_description,
        &intake_report.entries,
        config.matcher.tfidf_options()?,
    )?;

    if let Some(limit) = invocation.limit {
        results.truncate(limit);
    }

    let report = MatchReport {
        generated_at: Utc::now(),
        results,
        skipped: intake_report.skipped,
    };

    if invocation.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, invocation.full);
    }

    Ok(())
}

fn resolve_job_description(invocation: &MatchInvocation) -> Result<String> {
    match (&invocation.jd_file, &invocation.jd_text) {
        (Some(_), Some(_)) => bail!("Pass either --jd or --jd-text, not both."),
        (Some(path), None) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description: {}", path.display())),
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => bail!("A job description is required. Pass --jd or --jd-text."),
    }
}

fn resolve_pasted(invocation: &MatchInvocation) -> Result<Option<String>> {
    match (&invocation.paste, &invocation.paste_file) {
        (Some(_), Some(_)) => bail!("Pass either --paste or --paste-file, not both."),
        (Some(text), None) => Ok(Some(text.clone())),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map(Some)
            .with_context(|| format!("Failed to read pasted resumes: {}", path.display())),
        (None, None) => Ok(None),
    }
}

fn print_report(report: &MatchReport, full: bool) {
    if report.results.is_empty() {
        println!("No results.");
    }

    for (i, result) in report.results.iter().enumerate() {
        println!(
            "{}. [{:.2}%] {}",
            i + 1,
            result.percent(),
            result.identifier
        );
        if full {
            for line in result.text.lines() {
                println!("    {}", line);
            }
        } else {
            println!("    excerpt: \"{}\"", excerpt(&result.text));
        }
        println!();
    }

    if !report.skipped.is_empty() {
        println!("skipped: {}", report.skipped.len());
        for skip in &report.skipped {
            println!("  {}: {}", skip.identifier, skip.reason);
        }
    }
}

fn excerpt(text: &str) -> String {
    let flat = text.replace('\n', " ");
    let flat = flat.trim();
    let mut out: String = flat.chars().take(EXCERPT_CHARS).collect();
    if flat.chars().count() > EXCERPT_CHARS {
        out.push_str("...");
    }
    out
}
