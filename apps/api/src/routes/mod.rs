pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Leave headroom above the validation gate's cap so oversized uploads
    // reach the gate and get the typed FileTooLarge error.
    let body_limit = state.config.max_file_size + 1024 * 1024;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/parse-resume", post(handlers::handle_parse_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
