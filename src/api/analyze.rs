//! Document analysis endpoint
//!
//! `POST /api/analyze` takes a multipart form with a `file` field (the
//! document) and a `user_api_key` field (the caller's credential for the
//! generative service), runs intake and the analysis pipeline, and returns
//! the final report as JSON. All failures surface through `ApiError` with
//! the intake/pipeline status mapping.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};

use crate::error::{ApiError, ApiResult};
use crate::extract::extract_text;
use crate::models::FinalAnalysisResult;
use crate::services::pipeline::run_analysis;
use crate::AppState;

/// Upload size cap for the multipart body.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

struct Upload {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// POST /api/analyze
pub async fn analyze_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<FinalAnalysisResult>> {
    match process_analysis(&state, multipart).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            tracing::warn!(error = %err, "analysis request failed");
            *state.last_error.write().await = Some(err.to_string());
            Err(err)
        }
    }
}

async fn process_analysis(
    state: &AppState,
    mut multipart: Multipart,
) -> ApiResult<FinalAnalysisResult> {
    let mut upload: Option<Upload> = None;
    let mut api_key: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
                upload = Some(Upload {
                    filename,
                    content_type,
                    data,
                });
            }
            Some("user_api_key") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read API key: {e}")))?;
                api_key = Some(value);
            }
            // Unknown form fields are ignored.
            _ => {}
        }
    }

    let upload = upload
        .ok_or_else(|| ApiError::BadRequest("Missing 'file' field in form data.".to_string()))?;
    // An absent credential field takes the same path as an empty one: the
    // pipeline raises CredentialMissing before any network interaction.
    let api_key = api_key.unwrap_or_default();

    tracing::info!(
        filename = %upload.filename,
        content_type = %upload.content_type,
        bytes = upload.data.len(),
        "received file for analysis"
    );

    let document_text = extract_text(&upload.filename, &upload.content_type, &upload.data)?;
    tracing::info!(
        filename = %upload.filename,
        text_chars = document_text.chars().count(),
        "text extracted, starting analysis"
    );

    let result = run_analysis(
        state.invoker.as_ref(),
        &state.taxonomy,
        &document_text,
        &api_key,
    )
    .await?;

    tracing::info!(
        filename = %upload.filename,
        tactics = result.tactics.len(),
        categories = result.manipulation_by_category.len(),
        "analysis request complete"
    );
    Ok(result)
}

/// Build analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(analyze_document))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
