//! Batch ranking of resumes against a job description.
//!
//! One pure computation re-run from scratch on every invocation: fit a
//! TF-IDF vector space over `[job_description] + resumes`, score each
//! resume against row 0, sort descending. No incremental state survives
//! between runs.

use crate::models::{MatchResult, ResumeEntry};
use crate::tfidf::{self, TfidfOptions};

/// Batch-level failure. Per-resume extraction problems never surface here;
/// intake filters them out before `rank` runs.
#[derive(Debug, PartialEq, Eq)]
pub enum MatchError {
    EmptyJobDescription,
    NoResumes,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::EmptyJobDescription => write!(f, "job description must not be empty"),
            MatchError::NoResumes => write!(f, "no resumes to rank"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Ranks `resumes` against `job_description` by TF-IDF cosine similarity.
///
/// The vector space is fit jointly over the job description and every
/// resume, so all vectors share one vocabulary and scores are comparable
/// within the batch (and only within it). Results come back sorted by
/// descending score; equal scores keep intake order (stable sort). A
/// resume whose extracted text yields no tokens scores `0.0` rather than
/// erroring.
pub fn rank(
    job_description: &str,
    resumes: &[ResumeEntry],
    options: TfidfOptions,
) -> Result<Vec<MatchResult>, MatchError> {
    if job_description.trim().is_empty() {
        return Err(MatchError::EmptyJobDescription);
    }
    if resumes.is_empty() {
        return Err(MatchError::NoResumes);
    }

    let mut corpus: Vec<&str> = Vec::with_capacity(resumes.len() + 1);
    corpus.push(job_description);
    corpus.extend(resumes.iter().map(|r| r.extracted_text.as_str()));

    let matrix = tfidf::fit_transform(&corpus, options);
    let jd_vector = matrix.row(0);

    let mut results: Vec<MatchResult> = resumes
        .iter()
        .enumerate()
        .map(|(i, entry)| MatchResult {
            identifier: entry.identifier.clone(),
            score: tfidf::cosine_similarity(jd_vector, matrix.row(i + 1)),
            text: entry.raw_text.clone(),
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(results)
}
