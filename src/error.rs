use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error types
///
/// Every variant renders as the `{success: false, error}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The pricing backend could not be initialized at startup
    #[error("AWS Pricing client not initialized")]
    BackendNotInitialized,
    /// Unknown route or resource
    #[error("{0}")]
    NotFound(String),
    /// Request body could not be read
    #[error("Invalid request: {0}")]
    BadRequest(String),
    /// Pricing API answered with a non-success status
    #[error("Pricing API error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
    /// Transport failure or timeout talking to the pricing API
    #[error("Pricing API request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    /// Pricing API envelope was not what we expected
    #[error("Failed to parse pricing response: {0}")]
    Parse(String),
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BackendNotInitialized => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } | Self::HttpRequest(_) | Self::Parse(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Config(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BackendNotInitialized => "backend_not_initialized",
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Upstream { .. } => "upstream_error",
            Self::HttpRequest(_) => "http_request_error",
            Self::Parse(_) => "parse_error",
            Self::Config(_) => "config_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "Request failed");
        } else {
            tracing::debug!(error = %self, kind = self.kind(), "Request rejected");
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}
