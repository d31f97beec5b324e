//! Analysis endpoint, health probe and JSON 404 fallback.

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::Uri,
    response::IntoResponse,
};
use tracing::debug;

use super::AppState;
use crate::analysis::AnalysisResult;
use crate::error::{Error, ValidationError};
use crate::pipeline::UploadedFile;

// ── Health ──────────────────────────────────────────────────────────────

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "email-classifier"
    }))
}

// ── Analysis ────────────────────────────────────────────────────────────

/// `POST /api/analysis`: multipart with optional `file` and `text` parts.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, Error> {
    let multipart = multipart.map_err(|e| ValidationError::Multipart(e.body_text()))?;
    let (file, text) = read_form(multipart).await?;

    let result = state.orchestrator.execute(file, text).await?;
    Ok(Json(result))
}

/// Pull the `file` and `text` parts out of the form; other parts are ignored.
async fn read_form(mut multipart: Multipart) -> Result<(Option<UploadedFile>, Option<String>), Error> {
    let mut file = None;
    let mut text = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ValidationError::Multipart(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|f| !f.is_empty());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ValidationError::Multipart(e.body_text()))?;
                debug!(filename = ?filename, bytes = bytes.len(), "Received file part");

                // Browsers send an empty unnamed part when no file was picked
                if filename.is_some() || !bytes.is_empty() {
                    file = Some(UploadedFile {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            Some("text") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ValidationError::Multipart(e.body_text()))?;
                debug!(chars = value.chars().count(), "Received text part");
                text = Some(value);
            }
            other => {
                debug!(field = ?other, "Ignoring unknown form field");
            }
        }
    }

    Ok((file, text))
}

// ── Fallback ────────────────────────────────────────────────────────────

pub async fn not_found(uri: Uri) -> Error {
    Error::NotFound(uri.path().to_string())
}
