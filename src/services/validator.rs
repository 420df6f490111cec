//! Response validation
//!
//! The fail-fast boundary between the generative service and everything
//! downstream: the raw payload either parses into the full
//! [`AnalysisResult`] shape (closed intent-label set, every required string
//! non-empty) or the whole analysis fails. No partial acceptance, no
//! coercion. After this gate, downstream code may assume every field is
//! present and correctly typed.

use crate::error::AnalysisError;
use crate::models::AnalysisResult;

/// Upper bound on the raw-payload excerpt carried in validation failures,
/// so diagnostic logs cannot grow without bound.
pub const MAX_EXCERPT_CHARS: usize = 500;

/// Parse and validate the raw structured text returned by the service.
pub fn validate_response(raw: &str) -> Result<AnalysisResult, AnalysisError> {
    let result: AnalysisResult =
        serde_json::from_str(raw).map_err(|e| AnalysisError::ResponseValidationFailed {
            reason: e.to_string(),
            excerpt: bounded_excerpt(raw),
        })?;

    if let Some(field) = first_empty_required_field(&result) {
        return Err(AnalysisError::ResponseValidationFailed {
            reason: format!("required field '{field}' is empty"),
            excerpt: bounded_excerpt(raw),
        });
    }

    Ok(result)
}

fn bounded_excerpt(raw: &str) -> String {
    raw.chars().take(MAX_EXCERPT_CHARS).collect()
}

/// Walk the required string fields and name the first empty one.
///
/// Whitespace-only counts as empty. Optional fields and `Tactic.category`
/// are exempt: an empty category is meaningful to the aggregator (the
/// tactic then counts toward no category).
fn first_empty_required_field(result: &AnalysisResult) -> Option<String> {
    let mut fields: Vec<(String, &str)> = vec![
        ("metadata.date".into(), &result.metadata.date),
        ("metadata.overallIntent".into(), &result.metadata.overall_intent),
        (
            "executive_summary.primary_intent".into(),
            &result.executive_summary.primary_intent,
        ),
        (
            "executive_summary.confidence_score".into(),
            &result.executive_summary.confidence_score,
        ),
        (
            "executive_summary.tactic_density".into(),
            &result.executive_summary.tactic_density,
        ),
        (
            "executive_summary.structural_bias".into(),
            &result.executive_summary.structural_bias,
        ),
        (
            "overall_assessment.summary_text".into(),
            &result.overall_assessment.summary_text,
        ),
        (
            "overall_assessment.confidence_score_note".into(),
            &result.overall_assessment.confidence_score_note,
        ),
        (
            "detailed_report_sections.confidence_levels_discussion".into(),
            &result.detailed_report_sections.confidence_levels_discussion,
        ),
        (
            "detailed_report_sections.context_handling".into(),
            &result.detailed_report_sections.context_handling,
        ),
        (
            "detailed_report_sections.persuasion_vs_manipulation_distinction".into(),
            &result
                .detailed_report_sections
                .persuasion_vs_manipulation_distinction,
        ),
        (
            "detailed_report_sections.manipulative_elements_summary".into(),
            &result.detailed_report_sections.manipulative_elements_summary,
        ),
    ];

    for (index, tactic) in result.tactics.iter().enumerate() {
        fields.push((format!("tactics[{index}].quote"), &tactic.quote));
        fields.push((format!("tactics[{index}].explanation"), &tactic.explanation));
        fields.push((
            format!("tactics[{index}].resistanceStrategy"),
            &tactic.resistance_strategy,
        ));
    }

    fields
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
}
