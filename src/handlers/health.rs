use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::server::AppState;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "aws-cost-calculator",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Returns 200 OK once a pricing backend is initialized, 503 otherwise
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.backend.as_ref() {
        Some(backend) => (StatusCode::OK, Json(json!({
            "status": "ready",
            "service": "aws-cost-calculator",
            "pricing_mode": backend.mode().as_str(),
        }))),
        None => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({
            "status": "not_ready",
            "service": "aws-cost-calculator",
            "error": "AWS Pricing client not initialized",
        }))),
    }
}
