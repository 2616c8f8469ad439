use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    cart::CartStore,
    config::Config,
    error::AppError,
    handlers, metrics,
    pricing::{self, PricingBackend},
    session,
    signals::setup_signal_handlers,
};

/// Shared state for every API handler
#[derive(Clone)]
pub struct AppState {
    /// `None` when no pricing backend could be initialized
    pub backend: Option<Arc<dyn PricingBackend>>,
    pub carts: Arc<CartStore>,
}

impl AppState {
    pub fn new(backend: Option<Arc<dyn PricingBackend>>) -> Self {
        Self {
            backend,
            carts: Arc::new(CartStore::new()),
        }
    }

    /// The active backend, or `BackendNotInitialized`
    pub fn backend(&self) -> Result<&Arc<dyn PricingBackend>, AppError> {
        self.backend.as_ref().ok_or(AppError::BackendNotInitialized)
    }
}

/// Start the calculator server
///
/// This function:
/// 1. Initializes metrics
/// 2. Picks the pricing backend
/// 3. Sets up signal handlers for graceful shutdown
/// 4. Binds to the configured address and serves until shutdown
pub async fn start_server(config: Config) -> Result<()> {
    let backend = pricing::build_backend(&config.pricing).await;
    let mode = backend
        .as_ref()
        .map(|b| b.mode().as_str())
        .unwrap_or("none");

    let metrics_handle = if config.metrics.enabled {
        info!("Initializing Prometheus metrics...");
        match metrics::init_metrics(mode) {
            Ok(handle) => Some(Arc::new(handle)),
            Err(e) => {
                warn!(error = %e, "Metrics disabled");
                None
            }
        }
    } else {
        None
    };

    if backend.is_none() {
        warn!("No pricing backend available; pricing routes will answer 500");
    }

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(AppState::new(backend), &config, metrics_handle);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting AWS cost calculator on {}", addr);
    info!("Pricing mode: {}", mode);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    state: AppState,
    config: &Config,
    metrics_handle: Option<Arc<PrometheusHandle>>,
) -> Router {
    let session_config = Arc::new(config.session.clone());

    // Session-scoped API routes
    let api_routes = Router::new()
        .route("/api/pricing/ec2", post(handlers::pricing::ec2_pricing))
        .route("/api/pricing/rds", post(handlers::pricing::rds_pricing))
        .route("/api/pricing/s3", post(handlers::pricing::s3_pricing))
        .route("/api/pricing/vpc", post(handlers::pricing::vpc_pricing))
        .route("/api/pricing/alb", post(handlers::pricing::alb_pricing))
        .route(
            "/api/pricing/route53",
            post(handlers::pricing::route53_pricing),
        )
        .route("/api/cart/add", post(handlers::cart::add_item))
        .route("/api/cart/items", get(handlers::cart::list_items))
        .route("/api/cart/remove/:id", delete(handlers::cart::remove_item))
        .route("/api/cart/clear", delete(handlers::cart::clear_cart))
        .route("/api/cart/total", get(handlers::cart::cart_total))
        .route("/api/export/csv", get(handlers::export::export_csv))
        .route(
            "/api/test-connection",
            get(handlers::catalog::test_connection),
        )
        .route(
            "/api/available-instances",
            get(handlers::catalog::available_instances),
        )
        .layer(middleware::from_fn_with_state(
            session_config,
            session::session_middleware,
        ));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .merge(api_routes)
        .with_state(state);

    if let Some(handle) = metrics_handle {
        let metrics_routes = Router::new()
            .route(
                &config.metrics.endpoint,
                get(handlers::metrics_handler::metrics),
            )
            .with_state(handle);
        app = app.merge(metrics_routes);
    }

    app.fallback(handlers::not_found)
        // Pricing and cart bodies are small JSON documents
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::StaticPricing;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_create_router() {
        let state = AppState::new(Some(Arc::new(StaticPricing::builtin())));
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let metrics_handle = Arc::new(recorder.handle());

        let app = create_router(state, &Config::default(), Some(metrics_handle));

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metrics_route_absent_without_handle() {
        let state = AppState::new(Some(Arc::new(StaticPricing::builtin())));
        let app = create_router(state, &Config::default(), None);

        let response = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backend_not_initialized() {
        let state = AppState::new(None);
        assert!(matches!(
            state.backend(),
            Err(AppError::BackendNotInitialized)
        ));
    }
}
