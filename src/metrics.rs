use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
///
/// Fails if a global recorder is already installed.
pub fn init_metrics(mode: &str) -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();
    set_info(mode);

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "pricing_lookups_total",
        "Price resolutions by service and outcome"
    );
    describe_counter!(
        "pricing_requests_total",
        "Pricing API requests by service and status"
    );
    describe_counter!("cart_operations_total", "Cart operations by kind");
    describe_histogram!(
        "pricing_live_request_duration_seconds",
        "AWS Price List API call duration in seconds"
    );
    describe_gauge!(
        "calculator_info",
        "Calculator version and active pricing mode"
    );
}

/// Publish version and pricing mode
pub fn set_info(mode: &str) {
    gauge!(
        "calculator_info",
        "version" => env!("CARGO_PKG_VERSION"),
        "mode" => mode.to_string(),
    )
    .set(1.0);
}

/// Record how a price was resolved (exact, default_region, miss, live)
pub fn record_lookup(service: &str, outcome: &str) {
    counter!(
        "pricing_lookups_total",
        "service" => service.to_string(),
        "outcome" => outcome.to_string(),
    )
    .increment(1);
}

/// Record a pricing route result
pub fn record_pricing_request(service: &str, status: &str) {
    counter!(
        "pricing_requests_total",
        "service" => service.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
}

pub fn record_cart_operation(operation: &str) {
    counter!("cart_operations_total", "operation" => operation.to_string()).increment(1);
}

/// Record live API call duration
pub fn record_live_duration(service: &str, duration: Duration) {
    histogram!(
        "pricing_live_request_duration_seconds",
        "service" => service.to_string(),
    )
    .record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        record_lookup("EC2", "exact");
        record_lookup("VPC", "miss");
        record_pricing_request("S3", "success");
        record_cart_operation("add");
        record_live_duration("RDS", Duration::from_millis(250));
        set_info("static");

        // No recorder is installed here; the calls must simply not panic
    }

    #[test]
    fn test_local_recorder_renders_lookup() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_lookup("EC2", "miss");
        });

        let rendered = handle.render();
        assert!(rendered.contains("pricing_lookups_total"));
        assert!(rendered.contains("outcome=\"miss\""));
    }
}
