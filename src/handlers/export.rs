use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension,
};

use crate::metrics;
use crate::report;
use crate::server::AppState;
use crate::session::SessionId;

/// Handle GET /api/export/csv
pub async fn export_csv(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> impl IntoResponse {
    let items = state.carts.list(&session);
    let total = state.carts.total(&session);
    let body = report::render(&items, total, chrono::Local::now().naive_local());

    metrics::record_cart_operation("export");
    tracing::info!(session = %session, items = items.len(), "Exported cost estimate");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=aws_cost_estimate.csv",
            ),
        ],
        body,
    )
}
