use crate::error::AppError;
use crate::pricing::models::{PriceQuery, PriceRecord};
use async_trait::async_trait;
use std::fmt;

/// Which backend answers price lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    /// Compiled-in price table, no network access
    Static,
    /// AWS Price List Query API
    Live,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Static => "static",
            PricingMode::Live => "live",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified price resolution interface.
///
/// Chosen once at startup by [`crate::pricing::build_backend`] and shared by
/// every request handler.
#[async_trait]
pub trait PricingBackend: Send + Sync + 'static {
    fn mode(&self) -> PricingMode;

    /// Resolve a query into zero or more price records.
    ///
    /// The static backend always returns exactly one record (a zero-priced
    /// miss when nothing matches). The live backend returns one record per
    /// price dimension and may return none.
    async fn resolve(&self, query: &PriceQuery) -> Result<Vec<PriceRecord>, AppError>;

    /// Connectivity check. Returns a human-readable status on success.
    async fn probe(&self) -> Result<String, AppError>;

    /// Sorted EC2 instance types known for `region`, if the backend keeps a catalog
    fn instance_catalog(&self, _region: &str) -> Option<Vec<String>> {
        None
    }
}
