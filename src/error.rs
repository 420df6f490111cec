//! Error types for spinlens
//!
//! `AnalysisError` is the closed taxonomy of pipeline failures; callers
//! branch on its kind. `ApiError` is the HTTP-facing wrapper that maps every
//! failure (pipeline or intake) to a status code and the service-wide
//! `{"error": {"code", "message"}}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;

/// Pipeline failure taxonomy.
///
/// Every stage raises immediately and the error propagates unchanged to the
/// orchestrator's caller; no stage swallows or downgrades an earlier
/// stage's failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No credential supplied; detected before any network interaction.
    #[error("API key not provided. Cannot perform analysis.")]
    CredentialMissing,

    /// Credential present but the remote client could not be constructed.
    #[error("Failed to initialize generative client with the provided key: {0}. Please check the API key.")]
    ClientInitFailed(String),

    /// Network or service-level failure not otherwise classified.
    #[error("Generative service call failed: {0}")]
    RemoteCallFailed(String),

    /// The remote safety layer declined to produce output.
    #[error("Content generation blocked: {reason}. {message}")]
    ContentBlocked { reason: String, message: String },

    /// The remote call succeeded but returned no usable payload.
    #[error("Generative service returned an invalid or empty response.")]
    EmptyResponse,

    /// The remote service rejected the credential itself. Distinct from
    /// `ClientInitFailed` so the HTTP layer can answer 401 instead of 500.
    #[error("The provided API key was rejected by the generative service: {0}")]
    InvalidCredential(String),

    /// Payload present but failed shape validation. `excerpt` is a bounded
    /// prefix of the raw payload for diagnosis.
    #[error("Response validation failed: {reason}. Raw response prefix: {excerpt}")]
    ResponseValidationFailed { reason: String, excerpt: String },
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Rejected credential (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Upload of a kind the service cannot extract text from (415)
    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    /// Upload recognized but yielded no usable text (422)
    #[error("Unprocessable content: {0}")]
    Unprocessable(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
            ApiError::UnsupportedMedia(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg,
            ),
            ApiError::Unprocessable(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_CONTENT",
                msg,
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Io(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                err.to_string(),
            ),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let message = err.to_string();
        match err {
            AnalysisError::CredentialMissing => ApiError::BadRequest(message),
            AnalysisError::InvalidCredential(_) => ApiError::Unauthorized(message),
            AnalysisError::ClientInitFailed(_)
            | AnalysisError::RemoteCallFailed(_)
            | AnalysisError::ContentBlocked { .. }
            | AnalysisError::EmptyResponse
            | AnalysisError::ResponseValidationFailed { .. } => ApiError::Internal(message),
        }
    }
}

impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        let message = err.to_string();
        match err {
            ExtractError::UnsupportedType { .. } => ApiError::UnsupportedMedia(message),
            ExtractError::Decode(_) | ExtractError::DocumentParse(_) | ExtractError::Empty => {
                ApiError::Unprocessable(message)
            }
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
