use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region used when a price is missing for the requested region
pub const DEFAULT_REGION: &str = "US East (N. Virginia)";

/// Average hours per month (365 days / 12 months * 24 hours)
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Priced AWS services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Service {
    EC2,
    RDS,
    S3,
    VPC,
    ALB,
    Route53,
}

impl Service {
    pub const ALL: [Service; 6] = [
        Service::EC2,
        Service::RDS,
        Service::S3,
        Service::VPC,
        Service::ALB,
        Service::Route53,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Service::EC2 => "EC2",
            Service::RDS => "RDS",
            Service::S3 => "S3",
            Service::VPC => "VPC",
            Service::ALB => "ALB",
            Service::Route53 => "Route53",
        }
    }

    /// Service code understood by the AWS Price List API
    pub fn service_code(&self) -> &'static str {
        match self {
            Service::EC2 => "AmazonEC2",
            Service::RDS => "AmazonRDS",
            Service::S3 => "AmazonS3",
            Service::VPC => "AmazonVPC",
            Service::ALB => "AWSELB",
            Service::Route53 => "AmazonRoute53",
        }
    }

    /// Billing unit of the built-in catalog for this service
    pub fn catalog_unit(&self) -> PriceUnit {
        match self {
            Service::EC2 | Service::RDS | Service::VPC | Service::ALB => PriceUnit::Hours,
            Service::S3 => PriceUnit::GbMonth,
            Service::Route53 => PriceUnit::Month,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown service: {}", s))
    }
}

/// How a unit price converts into a monthly figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceUnit {
    #[serde(rename = "Hrs")]
    Hours,
    #[serde(rename = "GB-Mo")]
    GbMonth,
    /// Already monthly or per-unit; multiplied by quantity only
    #[serde(rename = "Month")]
    Month,
}

impl PriceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceUnit::Hours => "Hrs",
            PriceUnit::GbMonth => "GB-Mo",
            PriceUnit::Month => "Month",
        }
    }

    /// Classify a unit string from a price dimension.
    ///
    /// Anything that is neither hourly nor GB-month is billed flat per unit.
    pub fn from_api_unit(unit: &str) -> Self {
        if unit.contains("Hrs") {
            PriceUnit::Hours
        } else if unit.eq_ignore_ascii_case("GB-Mo") {
            PriceUnit::GbMonth
        } else {
            PriceUnit::Month
        }
    }
}

/// Typed selector set for one price lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "service", rename_all_fields = "camelCase")]
pub enum PriceQuery {
    EC2 {
        instance_type: String,
        region: String,
        operating_system: String,
        tenancy: String,
    },
    RDS {
        instance_type: String,
        region: String,
        database_engine: String,
        deployment_option: String,
    },
    S3 {
        storage_class: String,
        region: String,
    },
    VPC {
        component: String,
        region: String,
    },
    ALB {
        region: String,
    },
    Route53 {
        component: String,
    },
}

impl PriceQuery {
    pub fn service(&self) -> Service {
        match self {
            PriceQuery::EC2 { .. } => Service::EC2,
            PriceQuery::RDS { .. } => Service::RDS,
            PriceQuery::S3 { .. } => Service::S3,
            PriceQuery::VPC { .. } => Service::VPC,
            PriceQuery::ALB { .. } => Service::ALB,
            PriceQuery::Route53 { .. } => Service::Route53,
        }
    }

    /// Region selector; Route 53 is global and has none
    pub fn region(&self) -> Option<&str> {
        match self {
            PriceQuery::EC2 { region, .. }
            | PriceQuery::RDS { region, .. }
            | PriceQuery::S3 { region, .. }
            | PriceQuery::VPC { region, .. }
            | PriceQuery::ALB { region } => Some(region),
            PriceQuery::Route53 { .. } => None,
        }
    }

    /// Resource key within the service (instance type, storage class, component)
    pub fn resource_key(&self) -> &str {
        match self {
            PriceQuery::EC2 { instance_type, .. } | PriceQuery::RDS { instance_type, .. } => {
                instance_type
            }
            PriceQuery::S3 { storage_class, .. } => storage_class,
            PriceQuery::VPC { component, .. } | PriceQuery::Route53 { component } => component,
            PriceQuery::ALB { .. } => "Load Balancer-Application",
        }
    }

    /// Human-readable price description used by the built-in catalog
    pub fn describe(&self) -> String {
        match self {
            PriceQuery::EC2 {
                instance_type,
                operating_system,
                ..
            } => format!("{} {} on-demand", instance_type, operating_system),
            PriceQuery::RDS {
                instance_type,
                database_engine,
                deployment_option,
                ..
            } => format!("{} {} {}", instance_type, database_engine, deployment_option),
            PriceQuery::S3 { storage_class, .. } => format!("S3 {} storage", storage_class),
            PriceQuery::VPC { component, .. } | PriceQuery::Route53 { component } => {
                component.clone()
            }
            PriceQuery::ALB { .. } => "Load Balancer-Application".to_string(),
        }
    }
}

/// How a price was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// Found under the requested region
    Exact,
    /// Found only under [`DEFAULT_REGION`]
    DefaultRegion,
    /// Not found anywhere; the price is a placeholder zero
    Miss,
    /// Returned by the live pricing API
    Live,
}

impl LookupOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupOutcome::Exact => "exact",
            LookupOutcome::DefaultRegion => "default_region",
            LookupOutcome::Miss => "miss",
            LookupOutcome::Live => "live",
        }
    }
}

/// Descriptive product attributes as published by the Price List API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAttributes {
    pub instance_type: Option<String>,
    pub location: Option<String>,
    pub vcpu: Option<String>,
    pub memory: Option<String>,
    pub storage: Option<String>,
    pub network_performance: Option<String>,
    pub storage_class: Option<String>,
    pub volume_type: Option<String>,
    pub product_family: Option<String>,
    #[serde(rename = "usagetype")]
    pub usage_type: Option<String>,
}

/// A resolved unit price. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub query: PriceQuery,
    pub location: String,
    pub unit_price: f64,
    pub unit: PriceUnit,
    /// Unit as published (e.g. "Hrs", "Queries")
    pub unit_label: String,
    pub description: String,
    pub attributes: ProductAttributes,
    pub outcome: LookupOutcome,
}

impl PriceRecord {
    /// Build a record from the built-in catalog. Negative or non-finite prices become 0.
    pub fn from_catalog(query: PriceQuery, unit_price: f64, outcome: LookupOutcome) -> Self {
        let unit = query.service().catalog_unit();
        let location = query.region().unwrap_or("Global").to_string();
        let description = query.describe();

        Self {
            query,
            location,
            unit_price: sanitize_price(unit_price),
            unit,
            unit_label: unit.as_str().to_string(),
            description,
            attributes: ProductAttributes::default(),
            outcome,
        }
    }

    /// Zero-price placeholder for selectors with no catalog entry
    pub fn miss(query: PriceQuery) -> Self {
        Self::from_catalog(query, 0.0, LookupOutcome::Miss)
    }

    pub fn with_attributes(mut self, attributes: ProductAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn service(&self) -> Service {
        self.query.service()
    }

    pub fn is_miss(&self) -> bool {
        self.outcome == LookupOutcome::Miss
    }
}

pub(crate) fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// One price dimension in the response, in the shape clients already read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLine {
    pub amount: f64,
    pub unit: String,
    pub description: String,
    pub monthly_cost: f64,
}

/// EC2 / RDS descriptive fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceDetails {
    pub instance_type: String,
    pub vcpu: String,
    pub memory: String,
    pub storage: String,
    pub network_performance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_option: Option<String>,
}

/// S3 descriptive fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDetails {
    pub storage_class: String,
    #[serde(rename = "storageGB")]
    pub storage_gb: f64,
}

/// VPC / ALB / Route 53 descriptive fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDetails {
    pub product_family: String,
    pub quantity: u32,
}

/// Per-service fields layered over the shared entry base
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceDetails {
    Instance(InstanceDetails),
    Storage(StorageDetails),
    Component(ComponentDetails),
}

/// Unified pricing output across all six services
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedCostEntry {
    pub service: Service,
    pub description: String,
    pub location: String,
    pub quantity_or_size: f64,
    pub unit_price: f64,
    pub monthly_cost: f64,
    pub unit: PriceUnit,
    #[serde(flatten)]
    pub details: ServiceDetails,
    pub prices: Vec<PriceLine>,
}

impl NormalizedCostEntry {
    pub fn annual_cost(&self) -> f64 {
        self.monthly_cost * 12.0
    }
}
