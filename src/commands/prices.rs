use anyhow::Result;
use aws_cost_calculator::pricing::{
    data, normalize, Amount, LookupOutcome, PriceQuery, PriceRecord, StaticPricing,
};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Execute the prices command
///
/// Prints the built-in price table for one region
pub fn execute(region: &str) -> Result<()> {
    let pricing = StaticPricing::builtin();

    if !pricing.table().regions().any(|r| r == region) {
        println!(
            "{}",
            format!("Unknown region '{}', showing US East prices", region).yellow()
        );
    }

    let records: Vec<PriceRecord> = queries(&pricing, region)
        .iter()
        .map(|query| pricing.lookup(query))
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Service", "Resource", "Unit Price", "Unit", "Monthly (x1)", "Source"]);

    for record in &records {
        let entry = normalize(record, Amount::Units(1));
        let source = match record.outcome {
            LookupOutcome::Exact => Cell::new(record.outcome.as_str()).fg(Color::Green),
            LookupOutcome::DefaultRegion => Cell::new(record.outcome.as_str()).fg(Color::Yellow),
            _ => Cell::new(record.outcome.as_str()).fg(Color::Red),
        };

        table.add_row(vec![
            Cell::new(record.service().as_str()),
            Cell::new(&record.description),
            Cell::new(format!("${:.4}", record.unit_price)),
            Cell::new(record.unit.as_str()),
            Cell::new(format!("${:.2}", entry.monthly_cost)),
            source,
        ]);
    }

    println!("{}", format!("Built-in prices for {}", region).bold());
    println!("{table}");
    println!("{} {}", "Entries:".cyan(), records.len());

    Ok(())
}

/// Every catalog entry for `region`; EC2 types come from the regional table
fn queries(pricing: &StaticPricing, region: &str) -> Vec<PriceQuery> {
    let mut instance_types = pricing.table().instance_catalog(region);
    if instance_types.is_empty() {
        instance_types = data::EC2_US_EAST
            .iter()
            .map(|(instance_type, _, _)| instance_type.to_string())
            .collect();
    }

    let mut queries = Vec::new();

    for instance_type in instance_types {
        for os in ["Linux", "Windows"] {
            queries.push(PriceQuery::EC2 {
                instance_type: instance_type.clone(),
                region: region.to_string(),
                operating_system: os.to_string(),
                tenancy: "Shared".to_string(),
            });
        }
    }

    for (class, _, _) in data::RDS_US_EAST {
        for deployment in ["Single-AZ", "Multi-AZ"] {
            queries.push(PriceQuery::RDS {
                instance_type: class.to_string(),
                region: region.to_string(),
                database_engine: "MySQL".to_string(),
                deployment_option: deployment.to_string(),
            });
        }
    }

    queries.extend(data::S3_US_EAST.iter().map(|(class, _)| PriceQuery::S3 {
        storage_class: class.to_string(),
        region: region.to_string(),
    }));

    queries.extend(data::VPC_US_EAST.iter().map(|(component, _)| PriceQuery::VPC {
        component: component.to_string(),
        region: region.to_string(),
    }));

    queries.push(PriceQuery::ALB {
        region: region.to_string(),
    });

    queries.extend(data::ROUTE53.iter().map(|(component, _)| PriceQuery::Route53 {
        component: component.to_string(),
    }));

    queries
}
