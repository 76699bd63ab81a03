use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::onet::OccupationDirectory;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data: every handler is stateless.
#[derive(Clone)]
pub struct AppState {
    /// API-first, scrape-fallback occupation source.
    pub directory: Arc<dyn OccupationDirectory>,
    /// `None` when `ANTHROPIC_API_KEY` is unset; generation endpoints then
    /// answer with a configuration error.
    pub llm: Option<LlmClient>,
    pub config: Config,
}

impl AppState {
    pub fn new(directory: Arc<dyn OccupationDirectory>, llm: Option<LlmClient>, config: Config) -> Self {
        Self {
            directory,
            llm,
            config,
        }
    }
}
