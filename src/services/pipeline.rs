//! Analysis pipeline orchestration
//!
//! Composes prompt assembly, the remote call, validation, and aggregation
//! into one operation. Either the full validated-and-aggregated report comes
//! back, or a classified [`AnalysisError`] does; there are no retries and no
//! partial results.

use crate::error::AnalysisError;
use crate::models::FinalAnalysisResult;
use crate::services::aggregator::aggregate_by_category;
use crate::services::gemini::AnalysisInvoker;
use crate::services::prompt::build_prompt;
use crate::services::validator::validate_response;
use crate::taxonomy::Taxonomy;

/// Run one full analysis of `document_text` with the caller's credential.
///
/// The credential is checked before the invoker is consulted, so a missing
/// key never causes network interaction. The only field-level transformation
/// applied outside validation and aggregation is the confidence-score
/// normalization inside [`FinalAnalysisResult::from_parts`].
pub async fn run_analysis(
    invoker: &dyn AnalysisInvoker,
    taxonomy: &Taxonomy,
    document_text: &str,
    api_key: &str,
) -> Result<FinalAnalysisResult, AnalysisError> {
    if api_key.trim().is_empty() {
        return Err(AnalysisError::CredentialMissing);
    }

    let segments = build_prompt(document_text, taxonomy);
    tracing::info!(
        text_chars = document_text.chars().count(),
        segments = segments.len(),
        "running persuasion analysis, requesting structured JSON"
    );

    let raw = invoker.invoke(api_key, &segments).await?;
    tracing::info!(
        payload_chars = raw.chars().count(),
        "analysis call successful, validating response"
    );

    let report = validate_response(&raw)?;
    let categories = aggregate_by_category(&report.tactics);
    tracing::info!(
        tactics = report.tactics.len(),
        categories = categories.len(),
        "analysis complete"
    );

    Ok(FinalAnalysisResult::from_parts(report, categories))
}
