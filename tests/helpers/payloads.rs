//! Canned analysis payloads shared across integration tests

use serde_json::{json, Value};

/// Well-formed analysis payload with four tactics spanning four categories.
///
/// Expected aggregation (alphabetical by category):
/// - Emotional Appeal: blatant 1, borderline 0
/// - Language: blatant 1, borderline 0
/// - Logical Fallacy: blatant 0, borderline 1
/// - Source Credibility: blatant 0, borderline 0 (legitimate tactic only)
pub fn valid_analysis_payload() -> Value {
    json!({
        "metadata": {
            "author": "Unknown",
            "date": "2026-08-20",
            "overallIntent": "Persuade the reader that the proposal is urgent",
            "confidenceScore": 87,
            "tacticDensity": "Medium",
            "input_data_description": "Uploaded newsletter text, ~400 words"
        },
        "executive_summary": {
            "primary_intent": "Persuasion with manipulative elements",
            "confidence_score": "87",
            "tactic_density": "Medium",
            "dominant_tactics": ["Appeal to Fear", "Loaded Language"],
            "structural_bias": "One-sided framing of the proposal"
        },
        "intentBreakdown": [
            {"name": "Legitimate Use", "value": 1},
            {"name": "Borderline Manipulation", "value": 1},
            {"name": "Blatant Manipulation", "value": 2}
        ],
        "overall_assessment": {
            "summary_text": "The text blends factual updates with fear-driven urgency.",
            "confidence_score_note": "Signals are consistent across sections."
        },
        "tactics": [
            {
                "id": 1,
                "name": "Appeal to Fear",
                "category": "Emotional Appeal",
                "intent": "Blatant Manipulation",
                "quote": "Act now before everything you worked for is gone.",
                "explanation": "Raises the stakes far beyond what the facts support.",
                "resistanceStrategy": "Ask what concrete evidence supports the threat.",
                "sources": null
            },
            {
                "id": 2,
                "name": "Bandwagon",
                "category": "Logical Fallacy",
                "intent": "Borderline Manipulation",
                "quote": "Everyone in the industry has already switched.",
                "explanation": "Popularity is offered in place of a reason.",
                "resistanceStrategy": "Check whether adoption claims are sourced.",
                "sources": null
            },
            {
                "id": 3,
                "name": "Loaded Language",
                "category": "Language",
                "intent": "Blatant Manipulation",
                "quote": "This reckless scheme endangers us all.",
                "explanation": "Charged wording substitutes for argument.",
                "resistanceStrategy": "Restate the claim in neutral terms.",
                "sources": null
            },
            {
                "id": 4,
                "name": "Citing Sources",
                "category": "Source Credibility",
                "intent": "Legitimate Use",
                "quote": "According to the 2025 industry survey...",
                "explanation": "A verifiable reference supports the claim.",
                "resistanceStrategy": "Confirm the survey says what is claimed.",
                "sources": "https://example.org/industry-survey-2025"
            }
        ],
        "detailed_report_sections": {
            "confidence_levels_discussion": "Confidence is high for directly quoted passages.",
            "context_handling": "The full document was assessed as one unit.",
            "persuasion_vs_manipulation_distinction": "Drawn per tactic against its stated goal.",
            "manipulative_elements_summary": "Fear and loaded wording dominate the persuasive load."
        }
    })
}

/// Same payload with the optional confidence score absent.
pub fn payload_without_confidence() -> Value {
    let mut payload = valid_analysis_payload();
    payload["metadata"]
        .as_object_mut()
        .expect("metadata object")
        .remove("confidenceScore");
    payload
}
