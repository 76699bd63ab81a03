use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status plus which upstream integrations are configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skills-coach",
        "occupationSource": if state.config.onet_api_key.is_some() { "api" } else { "scrape" },
        "llmConfigured": state.llm.is_some(),
    }))
}
