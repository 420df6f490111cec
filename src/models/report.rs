//! Analysis report data model
//!
//! `AnalysisResult` is the exact shape the generative service is asked to
//! produce (and validated against); `FinalAnalysisResult` is that shape plus
//! the locally derived per-category manipulation counts. Field names carry
//! the wire spelling expected by report consumers, including the mixed
//! snake_case/camelCase (`intentBreakdown`, `resistanceStrategy`,
//! `manipulationByCategory`), so serde renames must not be "tidied up".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity classification of a detected tactic.
///
/// Deserialization accepts exactly the three wire labels; anything else is a
/// validation failure upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Intent {
    #[serde(rename = "Legitimate Use")]
    LegitimateUse,
    #[serde(rename = "Borderline Manipulation")]
    BorderlineManipulation,
    #[serde(rename = "Blatant Manipulation")]
    BlatantManipulation,
}

impl Intent {
    /// The wire label for this intent.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Intent::LegitimateUse => "Legitimate Use",
            Intent::BorderlineManipulation => "Borderline Manipulation",
            Intent::BlatantManipulation => "Blatant Manipulation",
        }
    }

    /// All labels, in escalating severity order.
    pub const ALL: [Intent; 3] = [
        Intent::LegitimateUse,
        Intent::BorderlineManipulation,
        Intent::BlatantManipulation,
    ];
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document-level metadata as returned by the generative service.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Metadata {
    /// Author of the text, if it could be determined
    pub author: Option<String>,
    /// Date of the analysis (YYYY-MM-DD)
    pub date: String,
    /// One-line overall intent characterization
    #[serde(rename = "overallIntent")]
    pub overall_intent: String,
    /// Overall confidence score (0-100), if provided
    #[serde(rename = "confidenceScore")]
    pub confidence_score: Option<u32>,
    /// Qualitative tactic density (e.g. "Low", "Medium", "High")
    #[serde(rename = "tacticDensity")]
    pub tactic_density: Option<String>,
    /// Short description of the analyzed input
    pub input_data_description: Option<String>,
}

/// Executive summary block.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutiveSummary {
    pub primary_intent: String,
    pub confidence_score: String,
    pub tactic_density: String,
    /// Tactic names that dominate the text
    pub dominant_tactics: Vec<String>,
    pub structural_bias: String,
}

/// One entry of the service-computed intent distribution.
///
/// `name` is carried as-is; the closed label set is only enforced for
/// [`Tactic::intent`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntentBreakdownItem {
    pub name: String,
    /// Non-negative tactic count for this intent
    pub value: u32,
}

/// Narrative overall assessment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverallAssessment {
    pub summary_text: String,
    pub confidence_score_note: String,
}

/// A single identified rhetorical device instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tactic {
    /// Identifier assigned by the service (no local uniqueness constraint)
    pub id: i64,
    /// Tactic label, expected (not enforced) to match a taxonomy entry
    pub name: String,
    /// Grouping label, free-form
    pub category: String,
    /// Severity classification; closed three-label set
    pub intent: Intent,
    /// Verbatim quote from the analyzed text
    pub quote: String,
    /// Why this quote constitutes the named tactic
    pub explanation: String,
    /// How a reader can resist the tactic
    #[serde(rename = "resistanceStrategy")]
    pub resistance_strategy: String,
    /// Supporting sources (URLs/descriptions), if any
    pub sources: Option<String>,
}

/// Long-form report sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetailedReportSections {
    pub confidence_levels_discussion: String,
    pub context_handling: String,
    pub persuasion_vs_manipulation_distinction: String,
    pub manipulative_elements_summary: String,
}

/// The full structure requested from the generative service.
///
/// Deliberately does NOT contain `manipulationByCategory`: that field is
/// derived locally by the aggregator and is never requested remotely.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisResult {
    pub metadata: Metadata,
    pub executive_summary: ExecutiveSummary,
    #[serde(rename = "intentBreakdown")]
    pub intent_breakdown: Vec<IntentBreakdownItem>,
    pub overall_assessment: OverallAssessment,
    pub tactics: Vec<Tactic>,
    pub detailed_report_sections: DetailedReportSections,
}

/// Derived per-category severity counts. Never produced by the remote call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManipulationCategory {
    /// Category label as it appeared on the tactics
    pub name: String,
    /// Count of Blatant Manipulation tactics in this category
    pub blatant: u32,
    /// Count of Borderline Manipulation tactics in this category
    pub borderline: u32,
}

/// [`Metadata`] with the confidence score normalized for presentation:
/// the integer becomes its decimal string, an absent score becomes "".
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FinalMetadata {
    pub author: Option<String>,
    pub date: String,
    #[serde(rename = "overallIntent")]
    pub overall_intent: String,
    #[serde(rename = "confidenceScore")]
    pub confidence_score: String,
    #[serde(rename = "tacticDensity")]
    pub tactic_density: Option<String>,
    pub input_data_description: Option<String>,
}

impl From<Metadata> for FinalMetadata {
    fn from(metadata: Metadata) -> Self {
        Self {
            author: metadata.author,
            date: metadata.date,
            overall_intent: metadata.overall_intent,
            confidence_score: metadata
                .confidence_score
                .map(|score| score.to_string())
                .unwrap_or_default(),
            tactic_density: metadata.tactic_density,
            input_data_description: metadata.input_data_description,
        }
    }
}

/// The complete report returned to callers: the validated remote result plus
/// the derived category breakdown.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FinalAnalysisResult {
    pub metadata: FinalMetadata,
    pub executive_summary: ExecutiveSummary,
    #[serde(rename = "intentBreakdown")]
    pub intent_breakdown: Vec<IntentBreakdownItem>,
    pub overall_assessment: OverallAssessment,
    pub tactics: Vec<Tactic>,
    pub detailed_report_sections: DetailedReportSections,
    #[serde(rename = "manipulationByCategory")]
    pub manipulation_by_category: Vec<ManipulationCategory>,
}

impl FinalAnalysisResult {
    /// Assemble the final report from a validated remote result and the
    /// locally derived category breakdown.
    pub fn from_parts(result: AnalysisResult, categories: Vec<ManipulationCategory>) -> Self {
        Self {
            metadata: result.metadata.into(),
            executive_summary: result.executive_summary,
            intent_breakdown: result.intent_breakdown,
            overall_assessment: result.overall_assessment,
            tactics: result.tactics,
            detailed_report_sections: result.detailed_report_sections,
            manipulation_by_category: categories,
        }
    }
}
