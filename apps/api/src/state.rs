use std::sync::Arc;

use crate::config::Config;
use crate::extraction::StrategyRegistry;
use crate::parsing::ReaderRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both registries are built once at startup and read-only afterwards; the
/// LLM client lives inside the delegated strategies.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub readers: Arc<ReaderRegistry>,
    pub strategies: Arc<StrategyRegistry>,
}
