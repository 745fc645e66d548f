//! # Resume Match CLI (`rmatch`)
//!
//! The `rmatch` binary is the primary interface for Resume Match. It ranks
//! resumes against a job description, extracts text from individual
//! documents, and starts the ranking HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! rmatch --config ./config/rmatch.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rmatch match <files> --jd <file>` | Rank resumes against a job description |
//! | `rmatch extract <file>` | Print the extracted text of one document |
//! | `rmatch serve` | Start the ranking HTTP server |
//!
//! ## Examples
//!
//! ```bash
//! # Rank three resume files against a job description file
//! rmatch match resumes/a.txt resumes/b.pdf resumes/c.docx --jd jd.txt
//!
//! # Scan a directory for resumes
//! rmatch match --dir ./resumes --jd jd.txt
//!
//! # Rank pasted resumes against an inline job description
//! rmatch match --jd-text "Senior Rust engineer" --paste-file pasted.txt
//!
//! # Machine-readable report for scripting
//! rmatch match --dir ./resumes --jd jd.txt --json
//!
//! # Inspect what the matcher will see for a PDF
//! rmatch extract resume.pdf
//!
//! # Start the HTTP API
//! rmatch serve --config ./config/rmatch.toml
//! ```

mod config;
mod extract;
mod extract_cmd;
mod intake;
mod matcher;
mod models;
mod rank_cmd;
mod server;
mod tfidf;
mod tokenize;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resume Match CLI: rank resumes against a job description with TF-IDF
/// and cosine similarity.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/rmatch.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "rmatch",
    about = "Resume Match — rank resumes against a job description with TF-IDF and cosine similarity",
    version,
    long_about = "Resume Match scores resumes against a job description by fitting a TF-IDF \
    model over the whole batch and ranking resumes by cosine similarity to the description. \
    It reads plain text, PDF, and DOCX files, takes pasted text on the command line, and \
    exposes the same ranking over a JSON HTTP server."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/rmatch.toml`. A missing file falls back to
    /// built-in defaults, so the flag is only needed to customize stop
    /// words, intake globs, limits, or the server bind address.
    #[arg(long, global = true, default_value = "./config/rmatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Rank resumes against a job description.
    ///
    /// Collects resumes from file arguments, a scanned directory, and
    /// pasted text, extracts text from each, and prints them ranked by
    /// descending similarity to the job description. Files that cannot
    /// be read or extracted are reported as skipped, never fatal.
    Match {
        /// Resume files (txt, pdf, or docx).
        resumes: Vec<PathBuf>,

        /// Read the job description from a file.
        #[arg(long)]
        jd: Option<PathBuf>,

        /// Pass the job description inline on the command line.
        #[arg(long)]
        jd_text: Option<String>,

        /// Scan a directory for resumes matching the configured intake globs.
        #[arg(long)]
        dir: Option<PathBuf>,

        /// One or more resumes pasted as a single blob, split on the
        /// configured separator token.
        #[arg(long)]
        paste: Option<String>,

        /// Like --paste, but read the blob from a file.
        #[arg(long)]
        paste_file: Option<PathBuf>,

        /// Maximum number of results to print.
        #[arg(long)]
        limit: Option<usize>,

        /// Print the full resume text under each result instead of an excerpt.
        #[arg(long)]
        full: bool,

        /// Emit the report as pretty-printed JSON.
        #[arg(long)]
        json: bool,
    },

    /// Extract text from a single document and print it.
    ///
    /// Runs one file through the same extraction layer the matcher uses,
    /// so the exact text being scored can be inspected.
    Extract {
        /// The file to extract.
        file: PathBuf,

        /// Override format detection: `txt`, `pdf`, or `docx`.
        #[arg(long)]
        format: Option<String>,
    },

    /// Start the ranking HTTP server.
    ///
    /// Exposes `POST /match` for text resumes and `POST /match/upload`
    /// for file uploads, bound to the address in `[server].bind`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Extract { file, format } = &cli.command {
        return extract_cmd::run_extract(file, format.as_deref());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Match {
            resumes,
            jd,
            jd_text,
            dir,
            paste,
            paste_file,
            limit,
            full,
            json,
        } => {
            rank_cmd::run_match(
                &cfg,
                rank_cmd::MatchInvocation {
                    resume_files: resumes,
                    jd_file: jd,
                    jd_text,
                    dir,
                    paste,
                    paste_file,
                    limit,
                    full,
                    json,
                },
            )?;
        }
        Commands::Extract { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
