//! Injectable fake for the remote analysis seam
//!
//! Stands in for the generative service: returns a canned response, counts
//! invocations, and records the prompt segments it was handed so tests can
//! assert on what would have been sent.

use async_trait::async_trait;
use spinlens::services::AnalysisInvoker;
use spinlens::AnalysisError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Responder = Box<dyn Fn() -> Result<String, AnalysisError> + Send + Sync>;

pub struct FakeInvoker {
    respond: Responder,
    calls: AtomicUsize,
    captured_segments: Mutex<Vec<Vec<String>>>,
}

impl FakeInvoker {
    /// Fake that answers every invocation with the given raw payload.
    pub fn returning_payload(payload: impl Into<String>) -> Self {
        let payload = payload.into();
        Self::with(move || Ok(payload.clone()))
    }

    /// Fake with an arbitrary response factory (errors are built fresh per
    /// call since `AnalysisError` is not `Clone`).
    pub fn with(
        respond: impl Fn() -> Result<String, AnalysisError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            captured_segments: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All prompt segments captured so far, one entry per invocation.
    pub fn captured_segments(&self) -> Vec<Vec<String>> {
        self.captured_segments.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisInvoker for FakeInvoker {
    async fn invoke(
        &self,
        _api_key: &str,
        segments: &[String],
    ) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured_segments
            .lock()
            .unwrap()
            .push(segments.to_vec());
        (self.respond)()
    }
}
