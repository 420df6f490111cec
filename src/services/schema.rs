//! Structured-output schema descriptor
//!
//! The schema transmitted with every generative call so the service
//! constrains its own output to the [`AnalysisResult`] shape. Field names,
//! optionality, and the intent enum here must stay in lockstep with the
//! serde model in `models::report`; the tests below cross-check them.
//!
//! [`AnalysisResult`]: crate::models::AnalysisResult

use crate::models::Intent;
use serde_json::{json, Value};

/// Build the response-schema descriptor for one analysis request.
///
/// Deliberately omits `manipulationByCategory`: that field is derived
/// locally and must never be requested from the service.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "metadata": {
                "type": "OBJECT",
                "properties": {
                    "author": {
                        "type": "STRING",
                        "nullable": true,
                        "description": "Author of the text, null if not determinable"
                    },
                    "date": {
                        "type": "STRING",
                        "description": "Date of the analysis (YYYY-MM-DD)"
                    },
                    "overallIntent": {
                        "type": "STRING",
                        "description": "One-line characterization of the author's overall intent"
                    },
                    "confidenceScore": {
                        "type": "INTEGER",
                        "nullable": true,
                        "description": "Overall confidence score, a number between 0 and 100"
                    },
                    "tacticDensity": {
                        "type": "STRING",
                        "nullable": true,
                        "description": "Qualitative tactic density, e.g. Low / Medium / High"
                    },
                    "input_data_description": {
                        "type": "STRING",
                        "nullable": true,
                        "description": "Short description of the analyzed input"
                    }
                },
                "required": ["date", "overallIntent"]
            },
            "executive_summary": {
                "type": "OBJECT",
                "properties": {
                    "primary_intent": {"type": "STRING"},
                    "confidence_score": {"type": "STRING"},
                    "tactic_density": {"type": "STRING"},
                    "dominant_tactics": {
                        "type": "ARRAY",
                        "items": {"type": "STRING"},
                        "description": "Tactic names that dominate the text"
                    },
                    "structural_bias": {"type": "STRING"}
                },
                "required": [
                    "primary_intent",
                    "confidence_score",
                    "tactic_density",
                    "dominant_tactics",
                    "structural_bias"
                ]
            },
            "intentBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {
                            "type": "STRING",
                            "description": "Intent label"
                        },
                        "value": {
                            "type": "INTEGER",
                            "description": "Count of tactics matching that intent"
                        }
                    },
                    "required": ["name", "value"]
                }
            },
            "overall_assessment": {
                "type": "OBJECT",
                "properties": {
                    "summary_text": {"type": "STRING"},
                    "confidence_score_note": {"type": "STRING"}
                },
                "required": ["summary_text", "confidence_score_note"]
            },
            "tactics": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": {"type": "INTEGER"},
                        "name": {
                            "type": "STRING",
                            "description": "Name of the tactic from the taxonomy"
                        },
                        "category": {"type": "STRING"},
                        "intent": {
                            "type": "STRING",
                            "enum": Intent::ALL
                        },
                        "quote": {
                            "type": "STRING",
                            "description": "The specific text excerpt where the tactic is used"
                        },
                        "explanation": {"type": "STRING"},
                        "resistanceStrategy": {
                            "type": "STRING",
                            "description": "How to recognize and resist the tactic"
                        },
                        "sources": {
                            "type": "STRING",
                            "nullable": true,
                            "description": "Up to 3 reputable fact-checking sources"
                        }
                    },
                    "required": [
                        "id",
                        "name",
                        "category",
                        "intent",
                        "quote",
                        "explanation",
                        "resistanceStrategy"
                    ]
                }
            },
            "detailed_report_sections": {
                "type": "OBJECT",
                "properties": {
                    "confidence_levels_discussion": {"type": "STRING"},
                    "context_handling": {"type": "STRING"},
                    "persuasion_vs_manipulation_distinction": {"type": "STRING"},
                    "manipulative_elements_summary": {"type": "STRING"}
                },
                "required": [
                    "confidence_levels_discussion",
                    "context_handling",
                    "persuasion_vs_manipulation_distinction",
                    "manipulative_elements_summary"
                ]
            }
        },
        "required": [
            "metadata",
            "executive_summary",
            "intentBreakdown",
            "overall_assessment",
            "tactics",
            "detailed_report_sections"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;

    fn required_names(schema: &Value, pointer: &str) -> Vec<String> {
        schema
            .pointer(pointer)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_top_level_required_fields() {
        let schema = analysis_response_schema();
        assert_eq!(
            required_names(&schema, "/required"),
            vec![
                "metadata",
                "executive_summary",
                "intentBreakdown",
                "overall_assessment",
                "tactics",
                "detailed_report_sections"
            ]
        );
    }

    #[test]
    fn test_intent_enum_matches_model_labels() {
        let schema = analysis_response_schema();
        let labels = required_names(&schema, "/properties/tactics/items/properties/intent/enum");
        assert_eq!(
            labels,
            vec![
                "Legitimate Use",
                "Borderline Manipulation",
                "Blatant Manipulation"
            ]
        );
    }

    #[test]
    fn test_schema_never_requests_derived_field() {
        let schema = analysis_response_schema();
        let rendered = schema.to_string();
        assert!(!rendered.contains("manipulationByCategory"));
    }

    #[test]
    fn test_payload_shaped_by_schema_parses_into_model() {
        // A payload exercising every field the descriptor declares, with the
        // nullable ones null, must deserialize into AnalysisResult.
        let payload = json!({
            "metadata": {
                "author": null,
                "date": "2025-06-01",
                "overallIntent": "Persuade",
                "confidenceScore": null,
                "tacticDensity": null,
                "input_data_description": null
            },
            "executive_summary": {
                "primary_intent": "Persuade",
                "confidence_score": "80",
                "tactic_density": "Low",
                "dominant_tactics": ["Bandwagon"],
                "structural_bias": "None observed"
            },
            "intentBreakdown": [
                {"name": "Legitimate Use", "value": 2}
            ],
            "overall_assessment": {
                "summary_text": "Mostly legitimate persuasion",
                "confidence_score_note": "Consistent across the text"
            },
            "tactics": [{
                "id": 1,
                "name": "Bandwagon",
                "category": "Logical Fallacy",
                "intent": "Legitimate Use",
                "quote": "everyone is switching",
                "explanation": "Popularity stands in for evidence",
                "resistanceStrategy": "Ask what the majority view is based on",
                "sources": null
            }],
            "detailed_report_sections": {
                "confidence_levels_discussion": "High",
                "context_handling": "Full text considered",
                "persuasion_vs_manipulation_distinction": "Drawn per tactic",
                "manipulative_elements_summary": "Minor"
            }
        });
        let parsed: Result<AnalysisResult, _> = serde_json::from_value(payload);
        assert!(parsed.is_ok(), "schema-shaped payload must fit the model");
    }
}
