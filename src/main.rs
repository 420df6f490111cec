//! spinlens - Persuasion Analysis Service
//!
//! Accepts document uploads over HTTP, extracts their text, and runs a
//! structured persuasion/manipulation analysis against a generative
//! language service, returning a validated report with derived per-category
//! tactic counts.

use anyhow::Result;
use axum::http::HeaderValue;
use clap::Parser;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::info;

use spinlens::config::{Cli, Config};
use spinlens::services::GeminiInvoker;
use spinlens::taxonomy::Taxonomy;
use spinlens::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification logged immediately after tracing init, before
    // any startup work that could delay or fail.
    info!(
        "Starting spinlens (Persuasion Analysis) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = Config::resolve(Cli::parse());
    info!("Model: {}", config.model);
    info!("Service endpoint: {}", config.gemini_base_url);
    info!("Taxonomy: {}", config.taxonomy_path.display());

    let taxonomy = Taxonomy::load(&config.taxonomy_path);

    let invoker = Arc::new(GeminiInvoker::new(
        config.model.clone(),
        config.gemini_base_url.clone(),
        config.request_timeout(),
    ));

    let state = AppState::new(taxonomy, invoker);
    let mut app = spinlens::build_router(state).layer(cors_layer(&config));

    if let Some(dir) = &config.static_assets {
        info!("Serving static assets from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);
    info!("Health check: http://{}/health", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Permissive CORS when no origins are configured; otherwise an allowlist.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let mut origins: Vec<HeaderValue> = Vec::with_capacity(config.allowed_origins.len());
    for origin in &config.allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(_) => tracing::warn!(origin = %origin, "ignoring malformed CORS origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
