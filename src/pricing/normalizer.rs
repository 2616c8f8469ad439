use crate::pricing::models::{
    ComponentDetails, InstanceDetails, NormalizedCostEntry, PriceLine, PriceQuery, PriceRecord,
    PriceUnit, ServiceDetails, StorageDetails, HOURS_PER_MONTH,
};
use crate::pricing::specs;
use serde_json::Value;

/// Monthly cost of `unit_price` for `quantity_or_size` units of `unit`
pub fn monthly_cost(unit_price: f64, unit: PriceUnit, quantity_or_size: f64) -> f64 {
    match unit {
        PriceUnit::Hours => unit_price * HOURS_PER_MONTH * quantity_or_size,
        PriceUnit::GbMonth | PriceUnit::Month => unit_price * quantity_or_size,
    }
}

/// What a unit price is multiplied by
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// Instances, components or hosted zones
    Units(u32),
    /// S3 storage size
    Gigabytes(f64),
}

impl Amount {
    pub fn value(self) -> f64 {
        match self {
            Amount::Units(count) => f64::from(count),
            Amount::Gigabytes(size) => non_negative(size),
        }
    }

    /// Whole-unit count; a storage size carries none
    fn units(self) -> u32 {
        match self {
            Amount::Units(count) => count,
            Amount::Gigabytes(_) => 0,
        }
    }
}

/// Turn a resolved price plus the requested quantity (or GB for S3) into a
/// normalized entry.
pub fn normalize(record: &PriceRecord, amount: Amount) -> NormalizedCostEntry {
    let quantity_or_size = amount.value();
    let monthly = monthly_cost(record.unit_price, record.unit, quantity_or_size);

    let details = match &record.query {
        PriceQuery::EC2 { instance_type, .. } => {
            ServiceDetails::Instance(instance_details(record, instance_type, None))
        }
        PriceQuery::RDS {
            instance_type,
            database_engine,
            deployment_option,
            ..
        } => ServiceDetails::Instance(instance_details(
            record,
            instance_type,
            Some((database_engine, deployment_option)),
        )),
        PriceQuery::S3 { storage_class, .. } => ServiceDetails::Storage(StorageDetails {
            storage_class: record
                .attributes
                .storage_class
                .clone()
                .unwrap_or_else(|| storage_class.clone()),
            storage_gb: quantity_or_size,
        }),
        PriceQuery::VPC { component, .. } | PriceQuery::Route53 { component } => {
            ServiceDetails::Component(ComponentDetails {
                product_family: record
                    .attributes
                    .product_family
                    .clone()
                    .unwrap_or_else(|| component.clone()),
                quantity: amount.units(),
            })
        }
        PriceQuery::ALB { .. } => ServiceDetails::Component(ComponentDetails {
            product_family: "Load Balancer-Application".to_string(),
            quantity: amount.units(),
        }),
    };

    NormalizedCostEntry {
        service: record.service(),
        description: record.description.clone(),
        location: record.location.clone(),
        quantity_or_size,
        unit_price: record.unit_price,
        monthly_cost: monthly,
        unit: record.unit,
        details,
        prices: vec![PriceLine {
            amount: record.unit_price,
            unit: record.unit_label.clone(),
            description: record.description.clone(),
            monthly_cost: monthly,
        }],
    }
}

fn instance_details(
    record: &PriceRecord,
    instance_type: &str,
    rds: Option<(&String, &String)>,
) -> InstanceDetails {
    let attrs = &record.attributes;
    let storage_default = if rds.is_some() { "EBS" } else { "EBS only" };

    InstanceDetails {
        instance_type: attrs
            .instance_type
            .clone()
            .unwrap_or_else(|| instance_type.to_string()),
        vcpu: attrs
            .vcpu
            .clone()
            .unwrap_or_else(|| specs::estimate_vcpu(instance_type)),
        memory: attrs
            .memory
            .clone()
            .unwrap_or_else(|| specs::estimate_memory(instance_type)),
        storage: attrs
            .storage
            .clone()
            .unwrap_or_else(|| storage_default.to_string()),
        network_performance: attrs.network_performance.clone().unwrap_or_else(|| {
            if rds.is_some() {
                "Moderate".to_string()
            } else {
                specs::network_performance(instance_type)
            }
        }),
        database_engine: rds.map(|(engine, _)| engine.clone()),
        deployment_option: rds.map(|(_, deployment)| deployment.clone()),
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Read a numeric request field leniently.
///
/// Numbers and numeric strings are accepted; a missing or null field yields
/// `default`; anything else that is present but malformed yields 0.
/// Negative and non-finite values become 0.
pub fn coerce_f64(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) => return default,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(_) => 0.0,
    };
    non_negative(parsed)
}

/// Like [`coerce_f64`] but truncated to a whole count
pub fn coerce_quantity(value: Option<&Value>, default: u32) -> u32 {
    let quantity = coerce_f64(value, f64::from(default)).trunc();
    if quantity >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        quantity as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{LookupOutcome, Service, DEFAULT_REGION};
    use serde_json::json;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn ec2_record(price: f64) -> PriceRecord {
        PriceRecord::from_catalog(
            PriceQuery::EC2 {
                instance_type: "t2.micro".to_string(),
                region: DEFAULT_REGION.to_string(),
                operating_system: "Linux".to_string(),
                tenancy: "Shared".to_string(),
            },
            price,
            LookupOutcome::Exact,
        )
    }

    #[test]
    fn test_hourly_uses_730_hours() {
        let entry = normalize(&ec2_record(0.0116), Amount::Units(1));
        assert!(approx(entry.monthly_cost, 8.468));
        assert!(approx(entry.annual_cost(), 101.616));
        assert_eq!(entry.unit, PriceUnit::Hours);
        assert_eq!(entry.service, Service::EC2);

        match &entry.details {
            ServiceDetails::Instance(details) => {
                assert_eq!(details.instance_type, "t2.micro");
                assert_eq!(details.vcpu, "1-2");
                assert_eq!(details.storage, "EBS only");
                assert!(details.database_engine.is_none());
            }
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_storage_uses_gb() {
        let record = PriceRecord::from_catalog(
            PriceQuery::S3 {
                storage_class: "General Purpose".to_string(),
                region: DEFAULT_REGION.to_string(),
            },
            0.023,
            LookupOutcome::Exact,
        );
        assert!(approx(normalize(&record, Amount::Gigabytes(100.0)).monthly_cost, 2.30));
        assert_eq!(normalize(&record, Amount::Gigabytes(0.0)).monthly_cost, 0.0);
    }

    #[test]
    fn test_flat_monthly_uses_quantity() {
        let record = PriceRecord::from_catalog(
            PriceQuery::Route53 {
                component: "HostedZone".to_string(),
            },
            0.50,
            LookupOutcome::Exact,
        );
        let entry = normalize(&record, Amount::Units(3));
        assert!(approx(entry.monthly_cost, 1.50));
        assert_eq!(entry.prices[0].unit, "Month");
    }

    #[test]
    fn test_component_quantity_is_exact() {
        let record = PriceRecord::from_catalog(
            PriceQuery::ALB {
                region: DEFAULT_REGION.to_string(),
            },
            0.0225,
            LookupOutcome::Exact,
        );
        let entry = normalize(&record, Amount::Units(u32::MAX));
        match &entry.details {
            ServiceDetails::Component(details) => assert_eq!(details.quantity, u32::MAX),
            other => panic!("unexpected details: {:?}", other),
        }
        assert_eq!(entry.quantity_or_size, f64::from(u32::MAX));
    }

    #[test]
    fn test_negative_storage_size_is_zero() {
        let record = PriceRecord::from_catalog(
            PriceQuery::S3 {
                storage_class: "Archive".to_string(),
                region: DEFAULT_REGION.to_string(),
            },
            0.004,
            LookupOutcome::Exact,
        );
        let entry = normalize(&record, Amount::Gigabytes(-50.0));
        assert_eq!(entry.quantity_or_size, 0.0);
        assert_eq!(entry.monthly_cost, 0.0);
    }

    #[test]
    fn test_miss_normalizes_to_zero() {
        let record = PriceRecord::miss(PriceQuery::VPC {
            component: "TransitGateway".to_string(),
            region: DEFAULT_REGION.to_string(),
        });
        let entry = normalize(&record, Amount::Units(4));
        assert_eq!(entry.monthly_cost, 0.0);
        assert_eq!(entry.quantity_or_size, 4.0);
    }

    #[test]
    fn test_entry_serializes_flat_camel_case() {
        let value = serde_json::to_value(normalize(&ec2_record(0.0116), Amount::Units(1))).unwrap();
        assert_eq!(value["service"], "EC2");
        assert_eq!(value["instanceType"], "t2.micro");
        assert_eq!(value["unit"], "Hrs");
        assert_eq!(value["prices"][0]["amount"], 0.0116);
        assert!(value["prices"][0]["monthly_cost"].is_number());
        assert!(value.get("details").is_none());
    }

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(None, 1.0), 1.0);
        assert_eq!(coerce_f64(Some(&Value::Null), 1.0), 1.0);
        assert_eq!(coerce_f64(Some(&json!(12.5)), 1.0), 12.5);
        assert_eq!(coerce_f64(Some(&json!(" 40 ")), 0.0), 40.0);
        assert_eq!(coerce_f64(Some(&json!("lots")), 1.0), 0.0);
        assert_eq!(coerce_f64(Some(&json!(true)), 1.0), 0.0);
        assert_eq!(coerce_f64(Some(&json!(-3)), 1.0), 0.0);
        assert_eq!(coerce_f64(Some(&json!("NaN")), 1.0), 0.0);
    }

    #[test]
    fn test_coerce_quantity_truncates() {
        assert_eq!(coerce_quantity(Some(&json!(2.9)), 1), 2);
        assert_eq!(coerce_quantity(Some(&json!("3")), 1), 3);
        assert_eq!(coerce_quantity(None, 1), 1);
    }
}
