use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Service info and available endpoints.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Resume Parser API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "parse": "POST /parse-resume - Upload and parse a resume",
            "health": "GET /health - Health check endpoint"
        }
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-parser-api"
    }))
}
