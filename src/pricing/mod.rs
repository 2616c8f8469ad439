pub mod backend;
pub mod data;
pub mod live;
pub mod models;
pub mod normalizer;
pub mod sigv4;
pub mod specs;
pub mod static_backend;
pub mod table;

pub use backend::{PricingBackend, PricingMode};
pub use live::AwsPricingApi;
pub use models::{
    LookupOutcome, NormalizedCostEntry, PriceQuery, PriceRecord, PriceUnit, Service,
    ServiceDetails, DEFAULT_REGION, HOURS_PER_MONTH,
};
pub use normalizer::{coerce_f64, coerce_quantity, monthly_cost, normalize, Amount};
pub use static_backend::StaticPricing;
pub use table::PriceTable;

use crate::config::{BackendMode, PricingConfig};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Pick and initialize the pricing backend for the configured mode.
///
/// Returns `None` when no backend could be initialized; every pricing
/// route then answers with "AWS Pricing client not initialized".
pub async fn build_backend(config: &PricingConfig) -> Option<Arc<dyn PricingBackend>> {
    match config.mode {
        BackendMode::Static => Some(build_static(config).await),
        BackendMode::Live => match build_live(config).await {
            Ok(api) => Some(api),
            Err(e) => {
                error!(error = %e, "Live pricing backend failed to initialize");
                None
            }
        },
        BackendMode::Auto => {
            if config.live.credentials().is_none() {
                info!("No AWS credentials found, using built-in pricing");
                return Some(build_static(config).await);
            }

            match build_live(config).await {
                Ok(api) => Some(api),
                Err(e) if config.fallback_to_static => {
                    warn!(error = %e, "AWS Pricing API unavailable, using built-in pricing");
                    Some(build_static(config).await)
                }
                Err(e) => {
                    error!(error = %e, "AWS Pricing API unavailable and fallback disabled");
                    None
                }
            }
        }
    }
}

async fn build_static(config: &PricingConfig) -> Arc<dyn PricingBackend> {
    let table = Arc::new(PriceTable::builtin());

    info!(
        ec2_entries = table.ec2_entry_count(),
        rds_entries = table.rds_entry_count(),
        "Built-in pricing loaded"
    );

    if let Some(path) = config.cache_file.as_deref().filter(|p| !p.is_empty()) {
        table.save_cache(Path::new(path)).await;
    }

    Arc::new(StaticPricing::new(table))
}

async fn build_live(config: &PricingConfig) -> Result<Arc<dyn PricingBackend>, crate::AppError> {
    let credentials = config
        .live
        .credentials()
        .ok_or_else(|| crate::AppError::Config("AWS credentials not configured".to_string()))?;

    let api = AwsPricingApi::new(&config.live, credentials)?;
    let message = api.probe().await?;
    info!("{}", message);

    Ok(Arc::new(api))
}
