//! HTTP API server for integration with other systems.
//!
//! Exposes the three generation entry points as REST endpoints. Handlers
//! are thin: decode the request, call the pipeline, encode the
//! `PodcastResult`.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::error::PratError;
use crate::extract::{extract_file, fetch_url, SourceKind};
use crate::pipeline::PodcastPipeline;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state.
struct AppState {
    pipeline: PodcastPipeline,
    http_client: reqwest::Client,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    // A missing credential fails here, before the server accepts anything.
    let credentials = Credentials::from_env()?;
    let temp_dir = settings.temp_dir();
    std::fs::create_dir_all(&temp_dir)?;

    let pipeline = PodcastPipeline::new(settings, &credentials)?;

    let state = Arc::new(AppState {
        pipeline,
        http_client: reqwest::Client::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/generate_podcast_topic", post(generate_topic))
        .route("/generate_podcast_url", post(generate_url))
        .route("/generate_podcast_document", post(generate_document))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Prat API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("By topic", "POST /generate_podcast_topic");
    Output::kv("By URL", "POST /generate_podcast_url");
    Output::kv("By document", "POST /generate_podcast_document");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct TopicRequest {
    topic: String,
}

#[derive(Deserialize)]
struct UrlRequest {
    url: String,
    podcast_title: String,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> axum::response::Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

fn status_for(err: &PratError) -> StatusCode {
    match err {
        PratError::UnsupportedInput(_) | PratError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn generate_topic(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TopicRequest>,
) -> impl IntoResponse {
    info!("Generating podcast by topic: {}", req.topic);
    Json(state.pipeline.generate(&req.topic, None).await).into_response()
}

async fn generate_url(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UrlRequest>,
) -> impl IntoResponse {
    info!("Generating podcast from URL: {}", req.url);

    let text = match fetch_url(&state.http_client, &req.url).await {
        Ok(text) => text,
        Err(e) => {
            return error_response(
                status_for(&e),
                format!("Error scraping URL or generating podcast: {}", e),
            )
        }
    };

    Json(state.pipeline.generate(&req.podcast_title, Some(&text)).await).into_response()
}

async fn generate_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut podcast_title: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return error_response(StatusCode::BAD_REQUEST, format!("Bad upload: {}", e))
            }
        };

        match field.name() {
            Some("podcast_title") => match field.text().await {
                Ok(text) => podcast_title = Some(text),
                Err(e) => {
                    return error_response(StatusCode::BAD_REQUEST, format!("Bad upload: {}", e))
                }
            },
            Some("uploaded_file") => {
                file_name = field.file_name().map(str::to_string);
                match field.bytes().await {
                    Ok(bytes) => file_bytes = Some(bytes.to_vec()),
                    Err(e) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Bad upload: {}", e),
                        )
                    }
                }
            }
            _ => {}
        }
    }

    let (Some(title), Some(name), Some(bytes)) = (podcast_title, file_name, file_bytes) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Expected fields: podcast_title, uploaded_file".to_string(),
        );
    };

    info!("Generating podcast from uploaded document: {}", name);

    // Unsupported extensions fail before any extraction or model work.
    let kind = match SourceKind::from_filename(&name) {
        Ok(kind) => kind,
        Err(e) => return error_response(status_for(&e), e.to_string()),
    };

    let temp_dir = state.pipeline.settings().temp_dir();
    let text = match tokio::task::spawn_blocking(move || extract_upload(temp_dir, bytes, kind))
        .await
    {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            return error_response(
                status_for(&e),
                format!("Error loading document or generating podcast: {}", e),
            )
        }
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error loading document or generating podcast: {}", e),
            )
        }
    };

    Json(state.pipeline.generate(&title, Some(&text)).await).into_response()
}

/// Write the upload to a temp file and extract its text.
///
/// PDF and docx parsing are CPU-bound, so callers run this on a
/// blocking thread rather than the async runtime.
///
/// The temp file guard removes the file when this returns, success or
/// failure.
fn extract_upload(
    temp_dir: PathBuf,
    bytes: Vec<u8>,
    kind: SourceKind,
) -> crate::error::Result<String> {
    let mut temp_file = tempfile::NamedTempFile::new_in(&temp_dir)?;
    temp_file.write_all(&bytes)?;
    temp_file.flush()?;

    extract_file(temp_file.path(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extract_upload_runs_on_blocking_thread_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let temp_dir = dir.path().to_path_buf();

        let bytes = b"A short note about tides.".to_vec();
        let text =
            tokio::task::spawn_blocking(move || extract_upload(temp_dir, bytes, SourceKind::Txt))
                .await
                .unwrap()
                .unwrap();
        assert_eq!(text, "A short note about tides.");

        // The temp file guard must not leave the upload behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_extract_upload_surfaces_extraction_errors() {
        let dir = tempfile::tempdir().unwrap();
        let temp_dir = dir.path().to_path_buf();

        let bytes = b"not a zip archive".to_vec();
        let err =
            tokio::task::spawn_blocking(move || extract_upload(temp_dir, bytes, SourceKind::Docx))
                .await
                .unwrap()
                .unwrap_err();
        assert!(matches!(err, PratError::Extraction(_)));
    }
}
