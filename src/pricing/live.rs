use crate::config::{AwsCredentials, LiveApiConfig};
use crate::error::AppError;
use crate::logging::Redacted;
use crate::metrics;
use crate::pricing::backend::{PricingBackend, PricingMode};
use crate::pricing::models::{
    sanitize_price, LookupOutcome, PriceQuery, PriceRecord, PriceUnit, ProductAttributes,
};
use crate::pricing::sigv4::Signer;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const TARGET_PREFIX: &str = "AWSPriceListService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const MAX_RESULTS: u32 = 10;

/// One `TERM_MATCH` filter of a GetProducts request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    #[serde(rename = "Type")]
    pub kind: &'static str,
    pub field: &'static str,
    pub value: String,
}

impl Filter {
    fn term(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind: "TERM_MATCH",
            field,
            value: value.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GetProductsResponse {
    #[serde(rename = "PriceList", default)]
    price_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DescribeServicesResponse {
    #[serde(rename = "Services", default)]
    services: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PriceListProduct {
    product: Product,
    #[serde(default)]
    terms: Terms,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    product_family: Option<String>,
    #[serde(default)]
    attributes: ProductAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct Terms {
    #[serde(rename = "OnDemand", default)]
    on_demand: BTreeMap<String, OnDemandTerm>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OnDemandTerm {
    #[serde(default)]
    price_dimensions: BTreeMap<String, PriceDimension>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceDimension {
    #[serde(default)]
    unit: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price_per_unit: HashMap<String, String>,
}

/// Client for the AWS Price List Query API
pub struct AwsPricingApi {
    client: Client,
    endpoint: url::Url,
    signer: Signer,
    timeout: Duration,
}

impl AwsPricingApi {
    pub fn new(config: &LiveApiConfig, credentials: AwsCredentials) -> Result<Self, AppError> {
        let endpoint = url::Url::parse(&config.endpoint)
            .map_err(|e| AppError::Config(format!("Invalid pricing endpoint: {}", e)))?;
        let timeout = Duration::from_secs(config.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            endpoint = %endpoint,
            access_key_id = %Redacted(&credentials.access_key_id),
            "Live pricing client configured"
        );

        Ok(Self {
            client,
            endpoint,
            signer: Signer::new(credentials, config.region.clone(), "pricing"),
            timeout,
        })
    }

    /// `TERM_MATCH` filters for a query
    pub fn filters(query: &PriceQuery) -> Vec<Filter> {
        match query {
            PriceQuery::EC2 {
                instance_type,
                region,
                operating_system,
                tenancy,
            } => vec![
                Filter::term("instanceType", instance_type),
                Filter::term("location", region),
                Filter::term("operatingSystem", operating_system),
                Filter::term("tenancy", tenancy),
                Filter::term("preInstalledSw", "NA"),
                Filter::term("capacitystatus", "Used"),
            ],
            PriceQuery::RDS {
                instance_type,
                region,
                database_engine,
                deployment_option,
            } => vec![
                Filter::term("instanceType", instance_type),
                Filter::term("location", region),
                Filter::term("databaseEngine", database_engine),
                Filter::term("deploymentOption", deployment_option),
            ],
            PriceQuery::S3 {
                storage_class,
                region,
            } => vec![
                Filter::term("location", region),
                Filter::term("storageClass", storage_class),
                Filter::term("volumeType", "Standard"),
            ],
            PriceQuery::VPC { component, region } => {
                let family = match component.as_str() {
                    "NatGateway" => "NAT Gateway",
                    "VPN" => "VPN Connection",
                    _ => return Vec::new(),
                };
                vec![
                    Filter::term("location", region),
                    Filter::term("productFamily", family),
                ]
            }
            PriceQuery::ALB { region } => vec![
                Filter::term("location", region),
                Filter::term("productFamily", "Load Balancer-Application"),
            ],
            PriceQuery::Route53 { component } => match component.as_str() {
                "HostedZone" => vec![Filter::term("productFamily", "DNS Zone")],
                "Queries" => vec![Filter::term("productFamily", "DNS Query")],
                _ => Vec::new(),
            },
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        body: &serde_json::Value,
    ) -> Result<T, AppError> {
        let target = format!("{}.{}", TARGET_PREFIX, operation);
        let body_bytes = serde_json::to_vec(body)?;

        let signed_headers = self.signer.sign(
            "POST",
            &self.endpoint,
            &[("content-type", CONTENT_TYPE), ("x-amz-target", target.as_str())],
            &body_bytes,
        )?;

        let mut req = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.timeout);

        for (key, value) in &signed_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let response = req
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", target.as_str())
            .body(body_bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status,
                message: truncate(&message, 512),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AppError::Parse(e.to_string()))
    }

    /// Raw `PriceList` entries for a service, each a JSON document in a string
    pub async fn get_products(
        &self,
        service_code: &str,
        filters: &[Filter],
        max_results: u32,
    ) -> Result<Vec<String>, AppError> {
        let mut body = json!({
            "ServiceCode": service_code,
            "FormatVersion": "aws_v1",
            "MaxResults": max_results,
        });
        if !filters.is_empty() {
            body["Filters"] = serde_json::to_value(filters)?;
        }

        let response: GetProductsResponse = self.call("GetProducts", &body).await?;
        Ok(response.price_list)
    }

    /// Number of services visible to these credentials, capped at `max_results`
    pub async fn describe_services(&self, max_results: u32) -> Result<usize, AppError> {
        let response: DescribeServicesResponse = self
            .call("DescribeServices", &json!({ "MaxResults": max_results }))
            .await?;
        Ok(response.services.len())
    }
}

/// Parse `PriceList` entries into one record per on-demand price dimension.
///
/// Records follow entry order, then term and dimension codes in sorted order.
/// Entries that do not parse are skipped.
pub fn parse_price_list(query: &PriceQuery, entries: &[String]) -> Vec<PriceRecord> {
    let mut records = Vec::new();

    for raw in entries {
        let product: PriceListProduct = match serde_json::from_str(raw) {
            Ok(product) => product,
            Err(e) => {
                warn!(
                    service = %query.service(),
                    error = %e,
                    "Skipping unparseable price list entry"
                );
                continue;
            }
        };

        let mut attributes = product.product.attributes;
        if attributes.product_family.is_none() {
            attributes.product_family = product.product.product_family;
        }

        let location = attributes
            .location
            .clone()
            .or_else(|| query.region().map(str::to_string))
            .unwrap_or_else(|| "Global".to_string());

        for term in product.terms.on_demand.into_values() {
            for dimension in term.price_dimensions.into_values() {
                let unit_price = dimension
                    .price_per_unit
                    .get("USD")
                    .and_then(|usd| usd.trim().parse::<f64>().ok())
                    .map(sanitize_price)
                    .unwrap_or(0.0);

                records.push(PriceRecord {
                    query: query.clone(),
                    location: location.clone(),
                    unit_price,
                    unit: PriceUnit::from_api_unit(&dimension.unit),
                    unit_label: dimension.unit,
                    description: dimension.description,
                    attributes: attributes.clone(),
                    outcome: LookupOutcome::Live,
                });
            }
        }
    }

    records
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}

#[async_trait]
impl PricingBackend for AwsPricingApi {
    fn mode(&self) -> PricingMode {
        PricingMode::Live
    }

    async fn resolve(&self, query: &PriceQuery) -> Result<Vec<PriceRecord>, AppError> {
        let service = query.service();
        let filters = Self::filters(query);

        let start = Instant::now();
        let result = self
            .get_products(service.service_code(), &filters, MAX_RESULTS)
            .await;
        metrics::record_live_duration(service.as_str(), start.elapsed());

        let entries = result?;
        let records = parse_price_list(query, &entries);

        debug!(
            service = %service,
            entries = entries.len(),
            records = records.len(),
            "Live price lookup complete"
        );
        metrics::record_lookup(service.as_str(), LookupOutcome::Live.as_str());

        Ok(records)
    }

    async fn probe(&self) -> Result<String, AppError> {
        self.describe_services(1).await?;
        Ok("Connected to AWS Pricing API".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::DEFAULT_REGION;

    const EC2_ENTRY: &str = r#"{
        "product": {
            "productFamily": "Compute Instance",
            "attributes": {
                "instanceType": "t3.micro",
                "location": "US East (N. Virginia)",
                "vcpu": "2",
                "memory": "1 GiB",
                "storage": "EBS only",
                "networkPerformance": "Up to 5 Gigabit"
            }
        },
        "terms": {
            "OnDemand": {
                "ABC.JRTCKXETXF": {
                    "priceDimensions": {
                        "ABC.JRTCKXETXF.6YS6EN2CT7": {
                            "unit": "Hrs",
                            "description": "$0.0104 per On Demand Linux t3.micro Instance Hour",
                            "pricePerUnit": { "USD": "0.0104000000" }
                        }
                    }
                }
            }
        }
    }"#;

    fn ec2_query() -> PriceQuery {
        PriceQuery::EC2 {
            instance_type: "t3.micro".to_string(),
            region: DEFAULT_REGION.to_string(),
            operating_system: "Linux".to_string(),
            tenancy: "Shared".to_string(),
        }
    }

    #[test]
    fn test_parse_price_list_one_record_per_dimension() {
        let records = parse_price_list(&ec2_query(), &[EC2_ENTRY.to_string()]);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.unit_price, 0.0104);
        assert_eq!(record.unit, PriceUnit::Hours);
        assert_eq!(record.outcome, LookupOutcome::Live);
        assert_eq!(record.attributes.vcpu.as_deref(), Some("2"));
        assert_eq!(
            record.attributes.product_family.as_deref(),
            Some("Compute Instance")
        );
    }

    #[test]
    fn test_parse_price_list_skips_bad_entries() {
        let entries = vec!["not json".to_string(), EC2_ENTRY.to_string()];
        assert_eq!(parse_price_list(&ec2_query(), &entries).len(), 1);
    }

    #[test]
    fn test_parse_price_list_unparseable_price_is_zero() {
        let entry = EC2_ENTRY.replace("0.0104000000", "n/a");
        let records = parse_price_list(&ec2_query(), &[entry]);
        assert_eq!(records[0].unit_price, 0.0);
    }

    #[test]
    fn test_parse_price_list_dimension_order_is_stable() {
        let entry = r#"{
            "product": { "productFamily": "Storage", "attributes": {} },
            "terms": {
                "OnDemand": {
                    "S3.T2": {
                        "priceDimensions": {
                            "S3.T2.C": {
                                "unit": "GB-Mo",
                                "description": "over 500 TB",
                                "pricePerUnit": { "USD": "0.021" }
                            },
                            "S3.T2.A": {
                                "unit": "GB-Mo",
                                "description": "first 50 TB",
                                "pricePerUnit": { "USD": "0.023" }
                            },
                            "S3.T2.B": {
                                "unit": "GB-Mo",
                                "description": "next 450 TB",
                                "pricePerUnit": { "USD": "0.022" }
                            }
                        }
                    },
                    "S3.T1": {
                        "priceDimensions": {
                            "S3.T1.A": {
                                "unit": "Requests",
                                "description": "per 1,000 PUT requests",
                                "pricePerUnit": { "USD": "0.005" }
                            }
                        }
                    }
                }
            }
        }"#;
        let query = PriceQuery::S3 {
            storage_class: "General Purpose".to_string(),
            region: DEFAULT_REGION.to_string(),
        };
        let entries = vec![entry.to_string()];

        for _ in 0..32 {
            let descriptions: Vec<_> = parse_price_list(&query, &entries)
                .into_iter()
                .map(|r| r.description)
                .collect();
            assert_eq!(
                descriptions,
                vec![
                    "per 1,000 PUT requests",
                    "first 50 TB",
                    "next 450 TB",
                    "over 500 TB"
                ]
            );
        }
    }

    #[test]
    fn test_ec2_filters() {
        let filters = AwsPricingApi::filters(&ec2_query());
        let fields: Vec<_> = filters.iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![
                "instanceType",
                "location",
                "operatingSystem",
                "tenancy",
                "preInstalledSw",
                "capacitystatus"
            ]
        );
        assert!(filters.iter().all(|f| f.kind == "TERM_MATCH"));
    }

    #[test]
    fn test_component_filters() {
        let vpn = PriceQuery::VPC {
            component: "VPN".to_string(),
            region: DEFAULT_REGION.to_string(),
        };
        assert_eq!(AwsPricingApi::filters(&vpn)[1].value, "VPN Connection");

        let unknown = PriceQuery::VPC {
            component: "TransitGateway".to_string(),
            region: DEFAULT_REGION.to_string(),
        };
        assert!(AwsPricingApi::filters(&unknown).is_empty());

        let zone = PriceQuery::Route53 {
            component: "HostedZone".to_string(),
        };
        assert_eq!(AwsPricingApi::filters(&zone)[0].value, "DNS Zone");
    }

    #[test]
    fn test_filter_serializes_in_api_shape() {
        let value = serde_json::to_value(Filter::term("location", "EU (Ireland)")).unwrap();
        assert_eq!(value["Type"], "TERM_MATCH");
        assert_eq!(value["Field"], "location");
        assert_eq!(value["Value"], "EU (Ireland)");
    }
}
