//! Core data types that flow through the matching pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A resume that survived intake, ready for ranking. Immutable once built;
/// nothing is persisted between runs.
#[derive(Debug, Clone)]
pub struct ResumeEntry {
    /// File name (or path relative to `--dir`) for file-backed resumes,
    /// `pasted-N` for pasted segments.
    pub identifier: String,
    /// The text as it arrived, kept for display.
    pub raw_text: String,
    /// The text the vectorizer sees. Identical to `raw_text` for every
    /// current source; binary formats keep only what extraction produced.
    pub extracted_text: String,
}

impl ResumeEntry {
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> ResumeEntry {
        let text = text.into();
        ResumeEntry {
            identifier: identifier.into(),
            raw_text: text.clone(),
            extracted_text: text,
        }
    }
}

/// A scored resume. Derived, read-only, recomputed on every run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub identifier: String,
    /// Raw cosine similarity in `[0, 1]`. This is the canonical value used
    /// for sorting and serialization; the percentage is display-only.
    pub score: f64,
    /// The resume's display text.
    pub text: String,
}

impl MatchResult {
    /// Score scaled to a percentage for display.
    pub fn percent(&self) -> f64 {
        self.score * 100.0
    }
}

/// One resume that failed extraction and was left out of the ranking.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedResume {
    pub identifier: String,
    pub reason: String,
}

/// Serializable outcome of one matching run: ranked results plus everything
/// that was skipped along the way.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<MatchResult>,
    pub skipped: Vec<SkippedResume>,
}
