pub mod cart;
pub mod catalog;
pub mod export;
pub mod health;
pub mod metrics_handler;
pub mod pricing;

use crate::error::AppError;
use axum::extract::FromRequest;

/// JSON body extractor whose rejections use the `{success: false, error}` envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Fallback for unknown routes
pub async fn not_found() -> AppError {
    AppError::NotFound("Resource not found".to_string())
}
