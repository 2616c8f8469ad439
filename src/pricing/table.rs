use crate::pricing::data;
use crate::pricing::models::PriceQuery;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

type RegionMap<T> = BTreeMap<String, T>;

/// In-memory price table: region -> resource key -> attribute -> USD
///
/// Built once from the compiled-in catalog and never mutated afterwards.
/// Serializes to the same nested layout as the on-disk cache file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriceTable {
    #[serde(rename = "EC2")]
    ec2: RegionMap<BTreeMap<String, BTreeMap<String, f64>>>,
    #[serde(rename = "RDS")]
    rds: RegionMap<BTreeMap<String, BTreeMap<String, BTreeMap<String, f64>>>>,
    #[serde(rename = "S3")]
    s3: RegionMap<BTreeMap<String, f64>>,
    #[serde(rename = "VPC")]
    vpc: RegionMap<BTreeMap<String, f64>>,
    #[serde(rename = "ALB")]
    alb: RegionMap<f64>,
    #[serde(rename = "Route53")]
    route53: BTreeMap<String, f64>,
}

#[derive(Serialize)]
struct CacheFile<'a> {
    updated: String,
    data: &'a PriceTable,
}

fn regional(price: f64, multiplier: f64) -> f64 {
    (price * multiplier * 10_000.0).round() / 10_000.0
}

fn os_prices(linux: f64, windows: f64) -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("Linux".to_string(), linux),
        ("Windows".to_string(), windows),
    ])
}

impl PriceTable {
    /// Build the full table from the compiled-in catalog.
    ///
    /// Published regional overrides are inserted first; every multiplier
    /// region is then filled with the US East catalog scaled by its factor,
    /// without replacing entries that already exist.
    pub fn builtin() -> Self {
        let mut table = Self::default();

        for (region, overrides) in data::EC2_REGIONAL_OVERRIDES {
            let entries = table.ec2.entry(region.to_string()).or_default();
            for (instance_type, linux, windows) in overrides.iter() {
                entries.insert(instance_type.to_string(), os_prices(*linux, *windows));
            }
        }

        for (region, multiplier) in data::REGION_MULTIPLIERS {
            let m = *multiplier;

            let ec2 = table.ec2.entry(region.to_string()).or_default();
            for (instance_type, linux, windows) in data::EC2_US_EAST {
                ec2.entry(instance_type.to_string())
                    .or_insert_with(|| os_prices(regional(*linux, m), regional(*windows, m)));
            }

            let rds = table.rds.entry(region.to_string()).or_default();
            for (class, single_az, multi_az) in data::RDS_US_EAST {
                let engines = data::RDS_ENGINES
                    .iter()
                    .map(|engine| {
                        let deployments = BTreeMap::from([
                            ("Single-AZ".to_string(), regional(*single_az, m)),
                            ("Multi-AZ".to_string(), regional(*multi_az, m)),
                        ]);
                        (engine.to_string(), deployments)
                    })
                    .collect();
                rds.insert(class.to_string(), engines);
            }

            table.s3.insert(
                region.to_string(),
                data::S3_US_EAST
                    .iter()
                    .map(|(class, price)| (class.to_string(), regional(*price, m)))
                    .collect(),
            );

            table.vpc.insert(
                region.to_string(),
                data::VPC_US_EAST
                    .iter()
                    .map(|(component, price)| (component.to_string(), regional(*price, m)))
                    .collect(),
            );

            table
                .alb
                .insert(region.to_string(), regional(data::ALB_US_EAST, m));
        }

        table.route53 = data::ROUTE53
            .iter()
            .map(|(component, price)| (component.to_string(), *price))
            .collect();

        table
    }

    /// Price for `query` under `region`, ignoring the query's own region.
    ///
    /// Route 53 is global and ignores `region`. EC2 tenancy is not part of
    /// the catalog key.
    pub fn lookup(&self, query: &PriceQuery, region: &str) -> Option<f64> {
        match query {
            PriceQuery::EC2 {
                instance_type,
                operating_system,
                ..
            } => self
                .ec2
                .get(region)?
                .get(instance_type)?
                .get(operating_system)
                .copied(),
            PriceQuery::RDS {
                instance_type,
                database_engine,
                deployment_option,
                ..
            } => self
                .rds
                .get(region)?
                .get(instance_type)?
                .get(database_engine)?
                .get(deployment_option)
                .copied(),
            PriceQuery::S3 { storage_class, .. } => {
                self.s3.get(region)?.get(storage_class).copied()
            }
            PriceQuery::VPC { component, .. } => self.vpc.get(region)?.get(component).copied(),
            PriceQuery::ALB { .. } => self.alb.get(region).copied(),
            PriceQuery::Route53 { component } => self.route53.get(component).copied(),
        }
    }

    /// Sorted EC2 instance types known for `region`
    pub fn instance_catalog(&self, region: &str) -> Vec<String> {
        self.ec2
            .get(region)
            .map(|types| types.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.ec2.keys().map(String::as_str)
    }

    pub fn ec2_entry_count(&self) -> usize {
        self.ec2.values().map(BTreeMap::len).sum()
    }

    pub fn rds_entry_count(&self) -> usize {
        self.rds.values().map(BTreeMap::len).sum()
    }

    /// Write a JSON mirror of the table. Not read back; failures are logged.
    pub async fn save_cache(&self, path: &Path) {
        if let Err(e) = self.write_cache(path).await {
            warn!(path = %path.display(), error = %e, "Failed to save pricing cache");
        }
    }

    async fn write_cache(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let cache = CacheFile {
            updated: chrono::Utc::now().to_rfc3339(),
            data: self,
        };
        let body = serde_json::to_vec_pretty(&cache)?;
        tokio::fs::write(path, body).await?;

        info!(path = %path.display(), "Pricing cached");
        Ok(())
    }
}
