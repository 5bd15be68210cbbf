use std::sync::Arc;

use crate::config::Config;
use crate::matching::MatchEngine;
use crate::optimization::Optimizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub engine: MatchEngine,
    /// Holds the injected text enhancer. `UnavailableEnhancer` when no API key is set.
    pub optimizer: Arc<Optimizer>,
}
