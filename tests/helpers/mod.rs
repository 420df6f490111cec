//! Shared test utilities

pub mod fake_invoker;
pub mod payloads;

pub use fake_invoker::FakeInvoker;
pub use payloads::{payload_without_confidence, valid_analysis_payload};
