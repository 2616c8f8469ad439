use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cart::{round2, CartItem, NewCartItem};
use crate::error::AppError;
use crate::handlers::ApiJson;
use crate::metrics;
use crate::pricing::{coerce_f64, coerce_quantity};
use crate::server::AppState;
use crate::session::SessionId;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddToCartRequest {
    pub service: Option<String>,
    pub resource_type: Option<String>,
    pub specifications: Option<String>,
    pub region: Option<String>,
    pub quantity: Option<Value>,
    pub hourly_cost: Option<Value>,
    pub monthly_cost: Option<Value>,
}

impl From<AddToCartRequest> for NewCartItem {
    fn from(req: AddToCartRequest) -> Self {
        Self {
            quantity: coerce_quantity(req.quantity.as_ref(), 1),
            hourly_cost: coerce_f64(req.hourly_cost.as_ref(), 0.0),
            monthly_cost: coerce_f64(req.monthly_cost.as_ref(), 0.0),
            service: req.service,
            resource_type: req.resource_type,
            specifications: req.specifications,
            region: req.region,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cart_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CartItemsResponse {
    pub success: bool,
    pub items: Vec<CartItem>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CartTotalResponse {
    pub success: bool,
    pub total: f64,
    pub count: usize,
}

/// Handle POST /api/cart/add
pub async fn add_item(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    ApiJson(req): ApiJson<AddToCartRequest>,
) -> Result<Json<CartMutationResponse>, AppError> {
    let id = state.carts.add(&session, req.into());
    metrics::record_cart_operation("add");
    tracing::debug!(session = %session, item = %id, "Item added to cart");

    Ok(Json(CartMutationResponse {
        success: true,
        message: "Item added to cart",
        cart_count: Some(state.carts.count(&session)),
    }))
}

/// Handle GET /api/cart/items
pub async fn list_items(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Json<CartItemsResponse> {
    let items = state.carts.list(&session);
    Json(CartItemsResponse {
        success: true,
        count: items.len(),
        items,
    })
}

/// Handle DELETE /api/cart/remove/:id
///
/// Succeeds whether or not the item exists.
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Path(id): Path<String>,
) -> Json<CartMutationResponse> {
    let removed = state.carts.remove(&session, &id);
    metrics::record_cart_operation("remove");
    tracing::debug!(session = %session, item = %id, removed, "Cart remove");

    Json(CartMutationResponse {
        success: true,
        message: "Item removed from cart",
        cart_count: Some(state.carts.count(&session)),
    })
}

/// Handle DELETE /api/cart/clear
pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Json<CartMutationResponse> {
    state.carts.clear(&session);
    metrics::record_cart_operation("clear");

    Json(CartMutationResponse {
        success: true,
        message: "Cart cleared",
        cart_count: None,
    })
}

/// Handle GET /api/cart/total
pub async fn cart_total(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Json<CartTotalResponse> {
    Json(CartTotalResponse {
        success: true,
        total: round2(state.carts.total(&session)),
        count: state.carts.count(&session),
    })
}
