//! Data models for the persuasion analysis report

pub mod report;

pub use report::{
    AnalysisResult, DetailedReportSections, ExecutiveSummary, FinalAnalysisResult, FinalMetadata,
    Intent, IntentBreakdownItem, ManipulationCategory, Metadata, OverallAssessment, Tactic,
};
