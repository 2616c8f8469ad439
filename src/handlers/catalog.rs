use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::pricing::DEFAULT_REGION;
use crate::server::AppState;

/// Returned when the backend keeps no instance catalog
const BASIC_INSTANCES: &[&str] = &["t2.micro", "t3.micro", "m5.large"];

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub instances: Vec<String>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Handle GET /api/available-instances
pub async fn available_instances(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Json<CatalogResponse> {
    let region = params.region.unwrap_or_else(|| DEFAULT_REGION.to_string());

    let catalog = state
        .backend
        .as_ref()
        .and_then(|backend| backend.instance_catalog(&region));

    let response = match catalog {
        Some(instances) => CatalogResponse {
            success: true,
            count: instances.len(),
            instances,
            region: Some(region),
        },
        None => CatalogResponse {
            success: true,
            instances: BASIC_INSTANCES.iter().map(|s| s.to_string()).collect(),
            count: BASIC_INSTANCES.len(),
            region: None,
        },
    };

    Json(response)
}

/// Handle GET /api/test-connection
///
/// Always answers 200; failures are reported in the body. Never mutates state.
pub async fn test_connection(State(state): State<AppState>) -> Json<Value> {
    let Some(backend) = state.backend.as_ref() else {
        return Json(json!({
            "success": false,
            "error": "Pricing client not initialized",
        }));
    };

    match backend.probe().await {
        Ok(message) => Json(json!({ "success": true, "message": message })),
        Err(e) => {
            tracing::warn!(error = %e, mode = %backend.mode(), "Pricing connection test failed");
            Json(json!({ "success": false, "error": e.to_string() }))
        }
    }
}
