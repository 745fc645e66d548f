//! HTTP ranking server.
//!
//! Exposes the matcher over a JSON HTTP API so recruiting front-ends can
//! rank resumes without shelling out to the CLI. Text resumes go through
//! `POST /match`; PDF and DOCX files go through the multipart
//! `POST /match/upload` endpoint, which runs the same extraction layer as
//! the CLI before ranking.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/match` | Rank resumes sent as JSON text |
//! | `POST` | `/match/upload` | Rank uploaded resume files (multipart) |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! All error responses share one schema:
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "job description must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `internal` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser-based
//! clients can call the API directly.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::intake::{self, IntakeReport};
use crate::matcher::{self, MatchError};
use crate::models::{MatchReport, ResumeEntry};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    /// Application configuration (wrapped in `Arc` for cheap cloning across handlers).
    config: Arc<Config>,
}

/// Starts the ranking HTTP server.
///
/// Binds to the address configured in `[server].bind` and registers all
/// route handlers. The server runs indefinitely until the process is
/// terminated.
///
/// # Returns
///
/// Returns `Ok(())` when the server shuts down, or an error if binding fails.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    // The request body cap leaves room for several resumes per upload
    // request plus multipart framing.
    let body_limit = (config.limits.max_file_bytes as usize).saturating_mul(4);

    let state = AppState {
        config: Arc::new(config.clone()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/match", post(handle_match))
        .route("/match/upload", post(handle_match_upload))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state);

    println!("match server listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

/// Inner error detail with a machine-readable code and human-readable message.
#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<MatchError> for AppError {
    fn from(e: MatchError) -> Self {
        bad_request(e.to_string())
    }
}

/// Constructs a 400 Bad Request error.
fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

/// Constructs a 500 Internal Server Error.
fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ POST /match ============

/// JSON request body for `POST /match`.
#[derive(Debug, Deserialize)]
struct MatchRequest {
    /// The job description to rank against.
    job_description: String,
    /// Resumes as plain text, each with an optional display name.
    #[serde(default)]
    resumes: Vec<ResumePayload>,
    /// A pasted blob holding one or more resumes split on the configured
    /// separator token.
    #[serde(default)]
    pasted: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResumePayload {
    #[serde(default)]
    name: Option<String>,
    text: String,
}

/// Handler for `POST /match`.
///
/// Ranks the given text resumes against the job description and returns
/// the full report, sorted by descending score.
///
/// Returns `400` when the job description is empty or no resumes are given.
async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let mut entries: Vec<ResumeEntry> = request
        .resumes
        .iter()
        .enumerate()
        .map(|(i, payload)| {
            let identifier = payload
                .name
                .clone()
                .unwrap_or_else(|| format!("resume-{}", i + 1));
            ResumeEntry::new(identifier, payload.text.clone())
        })
        .collect();

    if let Some(ref blob) = request.pasted {
        for (i, segment) in intake::split_pasted(blob, &state.config.paste.separator)
            .into_iter()
            .enumerate()
        {
            entries.push(ResumeEntry::new(format!("pasted-{}", i + 1), segment));
        }
    }

    let options = state
        .config
        .matcher
        .tfidf_options()
        .map_err(|e| internal_error(e.to_string()))?;

    let results = matcher::rank(&request.job_description, &entries, options)?;

    Ok(Json(MatchReport {
        generated_at: Utc::now(),
        results,
        skipped: Vec::new(),
    }))
}

// ============ POST /match/upload ============

/// Handler for `POST /match/upload`.
///
/// Accepts a multipart form with one `job_description` text field, any
/// number of `resume` file fields (txt, pdf, or docx, detected from the
/// uploaded file name), and an optional `pasted` text field. Files that
/// fail extraction are reported in the `skipped` list rather than failing
/// the request.
///
/// Returns `400` for malformed multipart bodies, unknown fields, or a
/// missing/empty job description.
async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchReport>, AppError> {
    let mut job_description: Option<String> = None;
    let mut pasted: Option<String> = None;
    let mut report = IntakeReport::default();
    let mut upload_index = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => {
                job_description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| bad_request(format!("job_description: {}", e)))?,
                );
            }
            "pasted" => {
                pasted = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| bad_request(format!("pasted: {}", e)))?,
                );
            }
            "resume" => {
                upload_index += 1;
                let identifier = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("upload-{}", upload_index));
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("{}: {}", identifier, e)))?;
                intake::ingest_bytes(&identifier, &bytes, &state.config.limits, &mut report);
            }
            other => {
                return Err(bad_request(format!("unexpected multipart field: {}", other)));
            }
        }
    }

    let job_description =
        job_description.ok_or_else(|| bad_request("a job_description field is required"))?;

    if let Some(ref blob) = pasted {
        for (i, segment) in intake::split_pasted(blob, &state.config.paste.separator)
            .into_iter()
            .enumerate()
        {
            report
                .entries
                .push(ResumeEntry::new(format!("pasted-{}", i + 1), segment));
        }
    }

    let options = state
        .config
        .matcher
        .tfidf_options()
        .map_err(|e| internal_error(e.to_string()))?;

    let results = matcher::rank(&job_description, &report.entries, options)?;

    Ok(Json(MatchReport {
        generated_at: Utc::now(),
        results,
        skipped: report.skipped,
    }))
}
