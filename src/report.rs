//! CSV cost estimate export.

use crate::cart::CartItem;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

const NOTES: &[(&str, &str)] = &[
    (
        "1. Pricing Basis",
        "On-Demand pricing (no reservations or savings plans)",
    ),
    ("2. Monthly Hours", "730 hours (365 days ÷ 12 months × 24 hours)"),
    ("3. Currency", "USD (United States Dollars)"),
    (
        "4. Exclusions",
        "Data transfer, requests, and additional service-specific charges",
    ),
    (
        "5. Accuracy",
        "Estimates based on official AWS pricing as of January 2026",
    ),
    (
        "6. Actual Costs",
        "May vary based on usage patterns, reserved instances, and volume discounts",
    ),
];

const FOOTER: &[&str] = &[
    "Report generated by AWS Cost Calculator",
    "For the most accurate pricing, please consult the official AWS Pricing Calculator",
    "https://calculator.aws/",
];

/// Render the cost estimate report for `items`.
///
/// `total` is the monthly total shown in the summary section.
pub fn render(items: &[CartItem], total: f64, generated_at: NaiveDateTime) -> String {
    let mut csv = CsvWriter::default();

    csv.row(&["AWS COST ESTIMATE REPORT"]);
    csv.row(&[
        "Generated",
        &generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    ]);
    csv.row(&["Total Resources", &items.len().to_string()]);
    csv.blank();

    csv.row(&["RESOURCE BREAKDOWN"]);
    csv.blank();
    csv.row(&[
        "Service",
        "Resource",
        "Specifications",
        "Region",
        "Qty",
        "Hourly Rate",
        "Monthly Cost",
        "Annual Cost",
    ]);
    csv.separator(&[15, 20, 40, 25, 5, 12, 15, 15]);
    for item in items {
        csv.row(&[
            or_na(&item.service),
            or_na(&item.resource_type),
            or_na(&item.specifications),
            or_na(&item.region),
            &item.quantity.to_string(),
            &format!("${:.4}/hr", item.hourly_cost),
            &format_usd(item.monthly_cost),
            &format_usd(item.monthly_cost * 12.0),
        ]);
    }
    csv.blank();

    csv.row(&["COST SUMMARY"]);
    csv.blank();
    csv.row(&["Period", "Total Cost"]);
    csv.separator(&[20, 20]);
    csv.row(&["Monthly", &format_usd(total)]);
    csv.row(&["Annual", &format_usd(total * 12.0)]);
    csv.blank();

    csv.row(&["COST BY SERVICE"]);
    csv.blank();
    csv.row(&["Service", "Resources", "Monthly Cost", "Annual Cost"]);
    csv.separator(&[15, 12, 15, 15]);
    csv.aggregate(group_by(items, |item| or_na(&item.service)));
    csv.blank();

    csv.row(&["COST BY REGION"]);
    csv.blank();
    csv.row(&["Region", "Resources", "Monthly Cost", "Annual Cost"]);
    csv.separator(&[30, 12, 15, 15]);
    csv.aggregate(group_by(items, |item| or_na(&item.region)));
    csv.blank();

    csv.row(&["IMPORTANT NOTES"]);
    csv.blank();
    for (label, text) in NOTES {
        csv.row(&[*label, *text]);
    }
    csv.blank();

    for line in FOOTER {
        csv.row(&[*line]);
    }

    csv.finish()
}

/// Format as US dollars with thousands separators, e.g. `$1,234.56`
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

/// (count, monthly sum) per key, sorted by key
fn group_by<'a>(
    items: &'a [CartItem],
    key: impl Fn(&'a CartItem) -> &'a str,
) -> BTreeMap<&'a str, (usize, f64)> {
    let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
    for item in items {
        let entry = groups.entry(key(item)).or_default();
        entry.0 += 1;
        entry.1 += item.monthly_cost;
    }
    groups
}

/// Minimal RFC 4180 writer with CRLF line endings
#[derive(Default)]
struct CsvWriter {
    out: String,
}

impl CsvWriter {
    fn row(&mut self, fields: &[&str]) {
        let line = fields
            .iter()
            .map(|field| escape(field))
            .collect::<Vec<_>>()
            .join(",");
        self.out.push_str(&line);
        self.out.push_str("\r\n");
    }

    fn blank(&mut self) {
        self.out.push_str("\r\n");
    }

    fn separator(&mut self, widths: &[usize]) {
        let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let fields: Vec<&str> = dashes.iter().map(String::as_str).collect();
        self.row(&fields);
    }

    fn aggregate(&mut self, groups: BTreeMap<&str, (usize, f64)>) {
        for (key, (count, monthly)) in groups {
            self.row(&[
                key,
                &count.to_string(),
                &format_usd(monthly),
                &format_usd(monthly * 12.0),
            ]);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn item(service: &str, region: &str, monthly: f64) -> CartItem {
        CartItem {
            id: uuid::Uuid::new_v4().to_string(),
            service: Some(service.to_string()),
            resource_type: Some("t2.micro".to_string()),
            specifications: Some("Linux, 1 vCPU".to_string()),
            region: Some(region.to_string()),
            quantity: 1,
            hourly_cost: 0.0116,
            monthly_cost: monthly,
        }
    }

    fn section<'a>(report: &'a str, title: &str) -> Vec<&'a str> {
        report
            .split("\r\n")
            .skip_while(|line| *line != title)
            .skip(4)
            .take_while(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(8.468), "$8.47");
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-12.0), "-$12.00");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("$1,234.56"), "\"$1,234.56\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_header_section() {
        let report = render(&[], 0.0, at());
        let lines: Vec<&str> = report.split("\r\n").collect();
        assert_eq!(lines[0], "AWS COST ESTIMATE REPORT");
        assert_eq!(lines[1], "Generated,2026-01-15 09:30:00");
        assert_eq!(lines[2], "Total Resources,0");
        assert_eq!(lines[3], "");
        assert!(report.ends_with("https://calculator.aws/\r\n"));
    }

    #[test]
    fn test_one_data_row_per_item() {
        let items = vec![
            item("EC2", "US East (N. Virginia)", 8.468),
            item("EC2", "EU (Ireland)", 9.2),
            item("S3", "US East (N. Virginia)", 2.3),
        ];
        let total: f64 = items.iter().map(|i| i.monthly_cost).sum();
        let report = render(&items, total, at());

        let rows = section(&report, "RESOURCE BREAKDOWN");
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            "EC2,t2.micro,\"Linux, 1 vCPU\",US East (N. Virginia),1,$0.0116/hr,$8.47,$101.62"
        );

        let services = section(&report, "COST BY SERVICE");
        assert_eq!(services, vec!["EC2,2,$17.67,$212.02", "S3,1,$2.30,$27.60"]);

        let regions = section(&report, "COST BY REGION");
        assert_eq!(regions.len(), 2);
        assert!(regions[0].starts_with("EU (Ireland),1,"));
    }

    #[test]
    fn test_summary_uses_given_total() {
        let report = render(&[item("ALB", "EU (Ireland)", 1500.0)], 1500.0, at());
        assert!(report.contains("Monthly,\"$1,500.00\"\r\n"));
        assert!(report.contains("Annual,\"$18,000.00\"\r\n"));
    }

    #[test]
    fn test_missing_fields_render_na() {
        let mut bare = item("EC2", "x", 0.0);
        bare.service = None;
        bare.region = None;
        let report = render(&[bare], 0.0, at());

        let rows = section(&report, "RESOURCE BREAKDOWN");
        assert!(rows[0].starts_with("N/A,"));
        assert_eq!(section(&report, "COST BY SERVICE"), vec!["N/A,1,$0.00,$0.00"]);
    }
}
