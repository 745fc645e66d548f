//! # resume-match
//!
//! Ranks resumes against a job description using TF-IDF vectorisation and
//! cosine similarity.
//!
//! Resumes arrive as plain-text, PDF, or DOCX files, as a directory of such
//! files, or as a single pasted blob split on a separator token. The core is
//! one pure batch computation: build a shared vector space over
//! `[job description] + resumes`, score every resume by cosine similarity
//! against the job-description vector, and return a ranked list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │     Intake      │──▶│  Extraction  │──▶│   Matcher    │
//! │ files/dir/paste │   │ txt/pdf/docx │   │ TF-IDF + cos │
//! └─────────────────┘   └──────────────┘   └──────┬───────┘
//!                                                 │
//!                              ┌──────────────────┤
//!                              ▼                  ▼
//!                        ┌──────────┐       ┌──────────┐
//!                        │   CLI    │       │   HTTP   │
//!                        │ (rmatch) │       │  (JSON)  │
//!                        └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! rmatch match --jd posting.txt alice.pdf bob.docx   # rank two files
//! rmatch match --jd posting.txt --dir ./resumes      # rank a directory
//! rmatch extract alice.pdf                           # inspect extraction
//! rmatch serve                                       # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`extract`] | Plain-text, PDF, and DOCX text extraction |
//! | [`intake`] | Resume collection and the skip-and-report policy |
//! | [`tokenize`] | Preprocessing, tokenization, stop words |
//! | [`tfidf`] | TF-IDF vectorizer and cosine similarity |
//! | [`matcher`] | Batch ranking |
//! | [`server`] | JSON HTTP matching API |

pub mod config;
pub mod extract;
pub mod extract_cmd;
pub mod intake;
pub mod matcher;
pub mod models;
pub mod rank_cmd;
pub mod server;
pub mod tfidf;
pub mod tokenize;
