//! Analysis prompt assembly
//!
//! Builds the fixed multi-part instruction set sent to the generative
//! service: persona, the document wrapped in explicit delimiters, taxonomy
//! grounding, a chain-of-thought procedure, intent-label definitions, and
//! output-format directives. Pure and deterministic: the same text and
//! taxonomy always produce the same segments.

use crate::models::Intent;
use crate::taxonomy::Taxonomy;

const INTENT_LEGITIMATE: &str = Intent::LegitimateUse.as_str();
const INTENT_BORDERLINE: &str = Intent::BorderlineManipulation.as_str();
const INTENT_BLATANT: &str = Intent::BlatantManipulation.as_str();

const PERSONA: &str = "Persona: Informed Persuasion Analyst";

/// Delimiters around the document payload so instructions and analyzed text
/// can never be confused with each other.
pub const TEXT_START_DELIMITER: &str = "--- START TEXT ---";
pub const TEXT_END_DELIMITER: &str = "--- END TEXT ---";

const OBJECTIVE_PREFIX: &str = "Objective: Deconstruct and analyse the following text to detect and \
     distinguish between legitimate persuasion vs purposeful manipulation:";

const TAXONOMY_HEADER: &str = "Tactic Taxonomy (known tactics by category):";

const PROCESS_HEADER: &str = "Process (Chain-of-Thought):";
const PROCESS_STEPS: &[&str] = &[
    "1. Identify author's Stated Goal: What does the author explicitly say they want to achieve \
     with this communication?",
    "2. List Persuasive Tactics Used: Identify all manipulative tactics present in the text, \
     using the provided tactic taxonomy.",
    "3. Assess Necessity of Tactics: Are these tactics necessary to achieve the stated goal, or \
     are they excessive and primarily intended to manipulate the audience's emotions or beliefs?",
    "4. Infer Author's Intent: Based on the above factors, determine the author's likely intent: \
     primarily to inform/persuade rationally, or primarily to manipulate/deceive? Provide a \
     confidence score (as a number 0-100) for this assessment.",
    "5. Identify Factual Claims: Scrutinise the text for specific, verifiable factual claims \
     (e.g., statistics, dates, events). Prioritise claims that are central to the author's \
     argument or that seem questionable.",
    "6. Identify grounded and ethical resistance strategies for each identified tactic.",
    "7. If the text makes unsubstantiated claims of fact, or twists facts to strengthen an \
     identified tactic: cite up to 3 relevant and trustworthy sources whose evidence directly \
     disproves or challenges such claims.",
];

const IMPLEMENTATION_HEADER: &str = "Implementation (Directional-Stimulus Prompting):";

const OUTPUT_HEADER: &str =
    "Output Format: IMPORTANT - Adhere strictly to the requested JSON schema.";

/// Assemble the ordered prompt segments for one analysis request.
///
/// `document_text` is assumed non-empty (intake rejects empty extractions
/// before the pipeline runs). An empty taxonomy simply omits the grounding
/// segment.
pub fn build_prompt(document_text: &str, taxonomy: &Taxonomy) -> Vec<String> {
    let mut segments = Vec::with_capacity(32);

    segments.push(PERSONA.to_string());
    segments.push(format!(
        "{OBJECTIVE_PREFIX}\n{TEXT_START_DELIMITER}\n{document_text}\n{TEXT_END_DELIMITER}"
    ));

    if !taxonomy.is_empty() {
        segments.push(render_taxonomy(taxonomy));
    }

    segments.push(PROCESS_HEADER.to_string());
    segments.extend(PROCESS_STEPS.iter().map(|step| step.to_string()));

    segments.push(IMPLEMENTATION_HEADER.to_string());
    segments.push("Intent Qualifiers: Classify the severity of each tactic as:".to_string());
    segments.push(format!("{INTENT_LEGITIMATE}: Justifiable in context."));
    segments.push(format!("{INTENT_BORDERLINE}: Potentially misleading."));
    segments.push(format!("{INTENT_BLATANT}: Clearly intended to deceive."));
    segments.push(
        "Fact-Checking Priority: Prioritise fact-checking claims that are used to support \
         manipulative tactics or that appear to be misleading or unsubstantiated. If a claim is \
         easily verifiable and directly relevant to assessing the author's intent, include a \
         fact-checking source."
            .to_string(),
    );
    segments.push("Tactic Analysis: For each tactic, provide the following:".to_string());
    segments.push("Example Quote: The specific text excerpt where the tactic is used.".to_string());
    segments.push("Tactic Name: The name of the tactic from the taxonomy.".to_string());
    segments.push(format!(
        "Intent: '{INTENT_LEGITIMATE}', '{INTENT_BORDERLINE}', or '{INTENT_BLATANT}'. Justify \
         this classification."
    ));
    segments.push(
        "Explanation: Explain how the tactic is being used and why it falls into the chosen \
         Intent category."
            .to_string(),
    );
    segments.push("resistanceStrategy: How to recognize and resist the tactic.".to_string());
    segments.push(
        "If applicable, fact-checking sources: up to 3 URLs that directly disprove or challenge \
         claims. Only include URLs from highly reputable sources (e.g., government agencies, \
         academic institutions, established news organisations with strong fact-checking \
         policies). Provide a very short description of what each source says."
            .to_string(),
    );

    segments.push(OUTPUT_HEADER.to_string());
    segments.push(
        "Specifically, provide the results for 'metadata', 'executive_summary', \
         'intentBreakdown', 'overall_assessment', 'tactics', and 'detailed_report_sections'."
            .to_string(),
    );
    segments.push(
        "For 'metadata.confidenceScore', provide a single number between 0 and 100.".to_string(),
    );
    segments.push(format!(
        "For 'intentBreakdown', provide a list of objects, where each object has a 'name' \
         (string, e.g., '{INTENT_BLATANT}') and a 'value' (number, the count of tactics matching \
         that intent)."
    ));
    segments
        .push("Do NOT include the 'manipulationByCategory' field in your response.".to_string());

    segments
}

/// Render the taxonomy grounding segment: one line per category listing the
/// known tactic names.
fn render_taxonomy(taxonomy: &Taxonomy) -> String {
    let mut lines = Vec::with_capacity(taxonomy.category_count() + 1);
    lines.push(TAXONOMY_HEADER.to_string());
    for (category, tactics) in taxonomy.categories() {
        let names: Vec<&str> = tactics.iter().map(|t| t.name.as_str()).collect();
        lines.push(format!("- {}: {}", category, names.join(", ")));
    }
    lines.join("\n")
}
