mod config;
mod errors;
mod models;
mod routes;
mod scoring;
mod semantic;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::models::profile::CandidateProfile;
use crate::routes::build_router;
use crate::scoring::engine::FitEngine;
use crate::semantic::embedding_client::EmbeddingClient;
use crate::semantic::SemanticSimilarityProvider;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobfit v{}", env!("CARGO_PKG_VERSION"));

    let profile = CandidateProfile::load(config.profile_path.as_deref())
        .context("Failed to load candidate profile")?;
    match &config.profile_path {
        Some(path) => info!("Loaded candidate profile from {}", path.display()),
        None => info!("Using bundled candidate profile"),
    }

    // Semantic provider is optional; without it scoring uses keyword weights only
    let provider: Option<Arc<dyn SemanticSimilarityProvider>> = match &config.embedding {
        Some(embedding) => {
            let client = EmbeddingClient::new(
                &embedding.api_url,
                embedding.api_key.clone(),
                embedding.model.clone(),
                config.semantic_timeout,
            )
            .context("Failed to build embedding client")?;
            info!(
                "Embedding provider enabled (model: {}, timeout: {}ms)",
                client.model(),
                config.semantic_timeout.as_millis()
            );
            Some(Arc::new(client))
        }
        None => {
            info!("No EMBEDDING_API_URL set, semantic scoring disabled");
            None
        }
    };

    let engine = FitEngine::new(&profile, provider, config.semantic_timeout)
        .context("Invalid candidate profile")?;

    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
