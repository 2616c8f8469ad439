use crate::error::AppError;
use crate::metrics;
use crate::pricing::backend::{PricingBackend, PricingMode};
use crate::pricing::models::{LookupOutcome, PriceQuery, PriceRecord, DEFAULT_REGION};
use crate::pricing::table::PriceTable;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Credential-free backend over the compiled-in price table
pub struct StaticPricing {
    table: Arc<PriceTable>,
}

impl StaticPricing {
    pub fn new(table: Arc<PriceTable>) -> Self {
        Self { table }
    }

    pub fn builtin() -> Self {
        Self::new(Arc::new(PriceTable::builtin()))
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    /// Exact region first, then the default region, then a zero-priced miss
    pub fn lookup(&self, query: &PriceQuery) -> PriceRecord {
        let region = query.region().unwrap_or(DEFAULT_REGION);

        let record = if let Some(price) = self.table.lookup(query, region) {
            PriceRecord::from_catalog(query.clone(), price, LookupOutcome::Exact)
        } else if let Some(price) = self.table.lookup(query, DEFAULT_REGION) {
            debug!(
                service = %query.service(),
                region = region,
                "Price missing for region, using {}",
                DEFAULT_REGION
            );
            PriceRecord::from_catalog(query.clone(), price, LookupOutcome::DefaultRegion)
        } else {
            warn!(
                service = %query.service(),
                region = region,
                key = query.resource_key(),
                selectors = ?query,
                "No catalog price, returning zero"
            );
            PriceRecord::miss(query.clone())
        };

        metrics::record_lookup(record.service().as_str(), record.outcome.as_str());
        record
    }
}

#[async_trait]
impl PricingBackend for StaticPricing {
    fn mode(&self) -> PricingMode {
        PricingMode::Static
    }

    async fn resolve(&self, query: &PriceQuery) -> Result<Vec<PriceRecord>, AppError> {
        Ok(vec![self.lookup(query)])
    }

    async fn probe(&self) -> Result<String, AppError> {
        Ok("Using credential-free pricing".to_string())
    }

    fn instance_catalog(&self, region: &str) -> Option<Vec<String>> {
        Some(self.table.instance_catalog(region))
    }
}
