//! spinlens library interface
//!
//! Exposes the analysis pipeline and HTTP surface for the binary and for
//! integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod services;
pub mod taxonomy;

pub use crate::error::{AnalysisError, ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::gemini::AnalysisInvoker;
use crate::taxonomy::Taxonomy;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only tactic taxonomy loaded at startup
    pub taxonomy: Arc<Taxonomy>,
    /// Remote analysis invoker (production: Gemini; tests inject fakes)
    pub invoker: Arc<dyn AnalysisInvoker>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last analysis error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(taxonomy: Taxonomy, invoker: Arc<dyn AnalysisInvoker>) -> Self {
        Self {
            taxonomy: Arc::new(taxonomy),
            invoker,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::analyze_routes())
        .merge(api::health_routes())
        .with_state(state)
}
