pub mod health;
pub mod ui;

use axum::{
    routing::{get, post},
    Router,
};

use crate::coaching::handlers as coaching;
use crate::onet::handlers as onet;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::ui_index))
        .route("/health", get(health::health_handler))
        // Occupation directory
        .route("/search", get(onet::handle_search))
        .route("/details", get(onet::handle_details))
        // Coaching
        .route(
            "/generate-scenarios",
            post(coaching::handle_generate_scenarios),
        )
        .route("/feedback", post(coaching::handle_feedback))
        .with_state(state)
}
