//! Generative service invoker
//!
//! One structured-output `generateContent` request per analysis. The client
//! is constructed per call from the caller-supplied credential: there is no
//! shared or cached client, so one caller's bad key can never affect another
//! caller's request. The [`AnalysisInvoker`] trait is the seam tests use to
//! substitute a fake for the real service.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::AnalysisError;
use crate::services::schema::analysis_response_schema;

/// Error-message signatures by which the service reports a rejected key.
const INVALID_KEY_MARKERS: [&str; 2] = ["API key not valid", "API_KEY_INVALID"];

/// Candidate finish reasons that mean the safety layer suppressed output.
const BLOCKING_FINISH_REASONS: [&str; 3] = ["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST"];

const FALLBACK_BLOCK_MESSAGE: &str = "No specific message.";

/// The seam between the pipeline and the generative service.
///
/// Takes the per-request credential and the ordered prompt segments; returns
/// the raw structured-text payload, unparsed.
#[async_trait]
pub trait AnalysisInvoker: Send + Sync {
    async fn invoke(&self, api_key: &str, segments: &[String])
        -> Result<String, AnalysisError>;
}

/// Production invoker backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiInvoker {
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiInvoker {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            model: model.into(),
            base_url: base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl AnalysisInvoker for GeminiInvoker {
    async fn invoke(
        &self,
        api_key: &str,
        segments: &[String],
    ) -> Result<String, AnalysisError> {
        let client = GeminiClient::new(api_key, &self.model, &self.base_url, self.timeout)?;
        client.generate(segments).await
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
    #[serde(default)]
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// ============================================================================
// Per-call client
// ============================================================================

/// A client scoped to a single analysis call and its credential.
struct GeminiClient {
    http: reqwest::Client,
    model: String,
    base_url: String,
}

impl GeminiClient {
    fn new(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        if api_key.trim().is_empty() {
            return Err(AnalysisError::CredentialMissing);
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| AnalysisError::ClientInitFailed(format!("invalid key format: {e}")))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AnalysisError::ClientInitFailed(e.to_string()))?;

        Ok(Self {
            http,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL for the structured-output endpoint; a bare model name gets the
    /// `models/` prefix.
    fn model_url(&self) -> String {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!("{}/{}:generateContent", self.base_url, model_path)
    }

    async fn generate(&self, segments: &[String]) -> Result<String, AnalysisError> {
        let url = self.model_url();
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: segments
                    .iter()
                    .map(|segment| Part {
                        text: segment.clone(),
                    })
                    .collect(),
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: analysis_response_schema(),
            },
        };

        tracing::debug!(url = %url, segments = segments.len(), "sending structured analysis request");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::RemoteCallFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::RemoteCallFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_service_error(status, &body));
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AnalysisError::RemoteCallFailed(format!("failed to decode response envelope: {e}"))
        })?;

        extract_payload(envelope)
    }
}

/// Classify a non-success HTTP response from the service.
///
/// A rejected key is reported through a known message signature inside the
/// error body, not through a dedicated status, so the body text is what
/// distinguishes `InvalidCredential` from a generic failure.
fn classify_service_error(status: StatusCode, body: &str) -> AnalysisError {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => format!(
            "{} {} ({})",
            parsed.error.code, parsed.error.message, parsed.error.status
        ),
        Err(_) => format!("{}: {}", status, body.trim()),
    };

    if INVALID_KEY_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
    {
        AnalysisError::InvalidCredential(message)
    } else {
        AnalysisError::RemoteCallFailed(message)
    }
}

/// Pull the textual payload out of a successful response envelope, or
/// classify why there is none.
fn extract_payload(envelope: GenerateContentResponse) -> Result<String, AnalysisError> {
    if let Some(feedback) = &envelope.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(AnalysisError::ContentBlocked {
                reason: reason.clone(),
                message: feedback
                    .block_reason_message
                    .clone()
                    .unwrap_or_else(|| FALLBACK_BLOCK_MESSAGE.to_string()),
            });
        }
    }

    let candidate = envelope
        .candidates
        .into_iter()
        .flatten()
        .next()
        .ok_or(AnalysisError::EmptyResponse)?;

    if let Some(reason) = &candidate.finish_reason {
        if BLOCKING_FINISH_REASONS.contains(&reason.as_str()) {
            return Err(AnalysisError::ContentBlocked {
                reason: reason.clone(),
                message: FALLBACK_BLOCK_MESSAGE.to_string(),
            });
        }
    }

    let text: String = candidate
        .content
        .and_then(|content| content.parts)
        .into_iter()
        .flatten()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(text)
}
