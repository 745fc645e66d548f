//! TF-IDF vectorisation and cosine similarity.
//!
//! The vectorizer is fit once per matching run over the whole corpus so
//! every document vector shares one vocabulary. Weights use the smoothed
//! IDF formula `idf(t) = ln((1 + n) / (1 + df(t))) + 1` with raw term
//! counts, and every row is L2-normalized.

use std::collections::HashMap;

use crate::tokenize::{tokenize, StopWordFilter};

/// Knobs for one vectorizer fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfOptions {
    pub stop_words: StopWordFilter,
    /// Cap the vocabulary at the N terms with the highest total count
    /// across the corpus. `None` keeps every term.
    pub max_features: Option<usize>,
}

/// Sparse document vector: `(term index, weight)` pairs sorted by index.
/// A document with no recognized tokens is the empty (zero) vector.
pub type DocVector = Vec<(usize, f64)>;

/// The fitted corpus: one L2-normalized row per input document, all indexed
/// against the same vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<DocVector>,
}

impl TfidfMatrix {
    /// Vocabulary terms in index order (lexicographically sorted).
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn row(&self, i: usize) -> &DocVector {
        &self.rows[i]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fits the vectorizer over `docs` and transforms every document in one
/// pass.
///
/// The vocabulary is the union of tokens across the corpus, sorted
/// lexicographically so index assignment is deterministic. With
/// `max_features = Some(k)` only the k terms with the highest total corpus
/// count survive; ties go to the lexicographically smaller term, and the
/// surviving vocabulary stays in lexicographic order.
pub fn fit_transform(docs: &[&str], options: TfidfOptions) -> TfidfMatrix {
    let tokenized: Vec<Vec<String>> = docs
        .iter()
        .map(|d| tokenize(d, options.stop_words))
        .collect();

    let per_doc_counts: Vec<HashMap<&str, u64>> = tokenized
        .iter()
        .map(|tokens| {
            let mut counts: HashMap<&str, u64> = HashMap::new();
            for t in tokens {
                *counts.entry(t.as_str()).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    let mut total_counts: HashMap<&str, u64> = HashMap::new();
    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    for counts in &per_doc_counts {
        for (term, n) in counts {
            *total_counts.entry(*term).or_insert(0) += *n;
            *doc_freq.entry(*term).or_insert(0) += 1;
        }
    }

    let mut vocabulary: Vec<String> = total_counts.keys().map(|t| t.to_string()).collect();
    vocabulary.sort();

    if let Some(k) = options.max_features {
        if vocabulary.len() > k {
            let mut by_count: Vec<&str> = vocabulary.iter().map(|t| t.as_str()).collect();
            by_count.sort_by(|a, b| total_counts[b].cmp(&total_counts[a]).then(a.cmp(b)));
            by_count.truncate(k);
            let keep: std::collections::HashSet<&str> = by_count.into_iter().collect();
            let kept: Vec<String> = vocabulary
                .iter()
                .filter(|t| keep.contains(t.as_str()))
                .cloned()
                .collect();
            vocabulary = kept;
        }
    }

    let index: HashMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    let n_docs = docs.len() as f64;
    let idf: Vec<f64> = vocabulary
        .iter()
        .map(|t| {
            let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        })
        .collect();

    let rows: Vec<DocVector> = per_doc_counts
        .iter()
        .map(|counts| {
            let mut row: DocVector = counts
                .iter()
                .filter_map(|(term, n)| index.get(*term).map(|&i| (i, *n as f64 * idf[i])))
                .collect();
            row.sort_by_key(|&(i, _)| i);
            l2_normalize(&mut row);
            row
        })
        .collect();

    TfidfMatrix { vocabulary, rows }
}

fn l2_normalize(row: &mut DocVector) {
    let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for entry in row.iter_mut() {
            entry.1 /= norm;
        }
    }
}

/// Computes cosine similarity between two sparse document vectors.
///
/// Returns `0.0` when either vector has zero norm, so a document with no
/// recognized tokens scores zero instead of producing a division error.
/// For TF-IDF vectors (non-negative weights) the result is in `[0.0, 1.0]`.
///
/// # Formula
///
/// ```text
///            a · b
/// cos(θ) = ─────────
///          ‖a‖ × ‖b‖
/// ```
pub fn cosine_similarity(a: &DocVector, b: &DocVector) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    let mut i = 0;
    let mut j = 0;
    while i < a.len() && j < b.len() {
        let (ia, wa) = a[i];
        let (jb, wb) = b[j];
        match ia.cmp(&jb) {
            std::cmp::Ordering::Less => {
                norm_a += wa * wa;
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                norm_b += wb * wb;
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                dot += wa * wb;
                norm_a += wa * wa;
                norm_b += wb * wb;
                i += 1;
                j += 1;
            }
        }
    }
    while i < a.len() {
        norm_a += a[i].1 * a[i].1;
        i += 1;
    }
    while j < b.len() {
        norm_b += b[j].1 * b[j].1;
        j += 1;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }

    dot / denom
}
