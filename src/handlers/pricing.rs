use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::handlers::ApiJson;
use crate::metrics;
use crate::pricing::{
    coerce_f64, coerce_quantity, normalize, Amount, NormalizedCostEntry, PriceQuery,
    DEFAULT_REGION,
};
use crate::server::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ec2PricingRequest {
    pub instance_type: Option<String>,
    pub region: Option<String>,
    pub operating_system: Option<String>,
    pub tenancy: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RdsPricingRequest {
    pub instance_type: Option<String>,
    pub region: Option<String>,
    pub database_engine: Option<String>,
    pub deployment_option: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct S3PricingRequest {
    pub storage_class: Option<String>,
    pub region: Option<String>,
    #[serde(rename = "storageGB")]
    pub storage_gb: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VpcPricingRequest {
    pub component: Option<String>,
    pub region: Option<String>,
    pub quantity: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbPricingRequest {
    pub region: Option<String>,
    pub quantity: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Route53PricingRequest {
    pub component: Option<String>,
    pub quantity: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PricingResponse {
    pub success: bool,
    pub data: Vec<NormalizedCostEntry>,
    pub count: usize,
}

fn or_default(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_string())
}

fn region(value: Option<String>) -> String {
    or_default(value, DEFAULT_REGION)
}

/// Handle POST /api/pricing/ec2
pub async fn ec2_pricing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Ec2PricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let query = PriceQuery::EC2 {
        instance_type: or_default(req.instance_type, "t2.micro"),
        region: region(req.region),
        operating_system: or_default(req.operating_system, "Linux"),
        tenancy: or_default(req.tenancy, "Shared"),
    };
    price(&state, query, Amount::Units(1)).await
}

/// Handle POST /api/pricing/rds
pub async fn rds_pricing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RdsPricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let query = PriceQuery::RDS {
        instance_type: or_default(req.instance_type, "db.t3.micro"),
        region: region(req.region),
        database_engine: or_default(req.database_engine, "MySQL"),
        deployment_option: or_default(req.deployment_option, "Single-AZ"),
    };
    price(&state, query, Amount::Units(1)).await
}

/// Handle POST /api/pricing/s3
pub async fn s3_pricing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<S3PricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let storage_gb = coerce_f64(req.storage_gb.as_ref(), 0.0);
    let query = PriceQuery::S3 {
        storage_class: or_default(req.storage_class, "General Purpose"),
        region: region(req.region),
    };
    price(&state, query, Amount::Gigabytes(storage_gb)).await
}

/// Handle POST /api/pricing/vpc
pub async fn vpc_pricing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VpcPricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let quantity = coerce_quantity(req.quantity.as_ref(), 1);
    let query = PriceQuery::VPC {
        component: or_default(req.component, "NatGateway"),
        region: region(req.region),
    };
    price(&state, query, Amount::Units(quantity)).await
}

/// Handle POST /api/pricing/alb
pub async fn alb_pricing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AlbPricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let quantity = coerce_quantity(req.quantity.as_ref(), 1);
    let query = PriceQuery::ALB {
        region: region(req.region),
    };
    price(&state, query, Amount::Units(quantity)).await
}

/// Handle POST /api/pricing/route53
pub async fn route53_pricing(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Route53PricingRequest>,
) -> Result<Json<PricingResponse>, AppError> {
    let quantity = coerce_quantity(req.quantity.as_ref(), 1);
    let query = PriceQuery::Route53 {
        component: or_default(req.component, "HostedZone"),
    };
    price(&state, query, Amount::Units(quantity)).await
}

/// Resolve, normalize and wrap in the `{success, data, count}` envelope
async fn price(
    state: &AppState,
    query: PriceQuery,
    amount: Amount,
) -> Result<Json<PricingResponse>, AppError> {
    let service = query.service();

    let result = match state.backend() {
        Ok(backend) => backend.resolve(&query).await,
        Err(e) => Err(e),
    };

    let records = match result {
        Ok(records) => {
            metrics::record_pricing_request(service.as_str(), "success");
            records
        }
        Err(e) => {
            metrics::record_pricing_request(service.as_str(), e.kind());
            return Err(e);
        }
    };

    let data: Vec<NormalizedCostEntry> = records
        .iter()
        .map(|record| normalize(record, amount))
        .collect();

    tracing::debug!(
        service = %service,
        key = query.resource_key(),
        results = data.len(),
        "Pricing lookup served"
    );

    Ok(Json(PricingResponse {
        success: true,
        count: data.len(),
        data,
    }))
}
