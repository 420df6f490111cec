//! Service modules for the analysis pipeline

pub mod aggregator;
pub mod gemini;
pub mod pipeline;
pub mod prompt;
pub mod schema;
pub mod validator;

pub use aggregator::aggregate_by_category;
pub use gemini::{AnalysisInvoker, GeminiInvoker};
pub use pipeline::run_analysis;
pub use prompt::build_prompt;
pub use schema::analysis_response_schema;
pub use validator::validate_response;
