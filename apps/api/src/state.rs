use std::sync::Arc;

use crate::config::Config;
use crate::scoring::engine::FitEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; read-only afterwards, so shared without locking.
    pub engine: Arc<FitEngine>,
    pub config: Config,
}
