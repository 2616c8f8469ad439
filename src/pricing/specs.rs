//! Rough instance descriptions for catalog prices, which carry no product
//! attributes. Derived from the size suffix and family letter only.

/// Estimated vCPU count for an instance size
pub fn estimate_vcpu(instance_type: &str) -> String {
    let size = size_of(instance_type);

    if size.contains("nano") {
        "1".to_string()
    } else if size.contains("micro") || size.contains("small") {
        "1-2".to_string()
    } else if size.contains("medium") {
        "2".to_string()
    } else if size.contains("xlarge") {
        let multiplier = size.matches('x').count() + 1;
        (2 * multiplier).to_string()
    } else if size.contains("large") {
        "2".to_string()
    } else {
        "N/A".to_string()
    }
}

/// Estimated memory for an instance size
pub fn estimate_memory(instance_type: &str) -> String {
    let size = size_of(instance_type);

    let memory = if size.contains("micro") {
        "1 GiB"
    } else if size.contains("small") {
        "2 GiB"
    } else if size.contains("medium") {
        "4 GiB"
    } else if size.contains("xlarge") {
        "16+ GiB"
    } else if size.contains("large") {
        "8 GiB"
    } else {
        "N/A"
    };
    memory.to_string()
}

/// Network tier by instance family
pub fn network_performance(instance_type: &str) -> String {
    let family = instance_type.trim_start_matches("db.");

    let tier = match family.chars().next() {
        Some('t') => "Low to Moderate",
        Some('c') | Some('r') => "High",
        _ => "Moderate",
    };
    tier.to_string()
}

fn size_of(instance_type: &str) -> &str {
    instance_type
        .trim_start_matches("db.")
        .rsplit('.')
        .next()
        .unwrap_or(instance_type)
}
