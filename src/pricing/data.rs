//! Built-in on-demand price catalog (USD, January 2026 list prices).
//!
//! Only US East (N. Virginia) is listed in full. Other regions are derived
//! from it with [`REGION_MULTIPLIERS`] unless a published price exists in
//! [`EC2_REGIONAL_OVERRIDES`]. Multiplied prices are rounded to 4 decimals.

/// Database engines priced identically for every RDS instance class
pub const RDS_ENGINES: &[&str] = &["MySQL", "PostgreSQL", "MariaDB"];

/// US East RDS catalog: (instance class, Single-AZ, Multi-AZ) USD/hour
pub const RDS_US_EAST: &[(&str, f64, f64)] = &[
    ("db.t3.nano", 0.008, 0.016),
    ("db.t3.micro", 0.017, 0.034),
    ("db.t3.small", 0.034, 0.068),
    ("db.t3.medium", 0.068, 0.136),
    ("db.t3.large", 0.136, 0.272),
    ("db.m5.large", 0.19, 0.38),
    ("db.m5.xlarge", 0.38, 0.76),
    ("db.m5.2xlarge", 0.76, 1.52),
    ("db.r5.large", 0.24, 0.48),
    ("db.r5.xlarge", 0.48, 0.96),
];

/// S3 storage classes, USD per GB-month
pub const S3_US_EAST: &[(&str, f64)] = &[
    ("General Purpose", 0.023),
    ("Infrequent Access", 0.0125),
    ("Archive", 0.004),
];

/// VPC components, USD/hour
pub const VPC_US_EAST: &[(&str, f64)] = &[("NatGateway", 0.045), ("VPN", 0.05)];

/// Application Load Balancer, USD/hour
pub const ALB_US_EAST: f64 = 0.0225;

/// Route 53 is global: hosted zones per month, queries per million
pub const ROUTE53: &[(&str, f64)] = &[("HostedZone", 0.50), ("Queries", 0.40)];

/// US East (N. Virginia) on-demand EC2 catalog: (instance type, Linux, Windows) USD/hour
pub const EC2_US_EAST: &[(&str, f64, f64)] = &[
    ("t2.nano", 0.0058, 0.0104),
    ("t2.micro", 0.0116, 0.0162),
    ("t2.small", 0.023, 0.032),
    ("t2.medium", 0.0464, 0.0648),
    ("t2.large", 0.0928, 0.1296),
    ("t2.xlarge", 0.1856, 0.2592),
    ("t2.2xlarge", 0.3712, 0.5184),
    ("t3.nano", 0.0052, 0.0098),
    ("t3.micro", 0.0104, 0.015),
    ("t3.small", 0.0208, 0.0298),
    ("t3.medium", 0.0416, 0.0596),
    ("t3.large", 0.0832, 0.1192),
    ("t3.xlarge", 0.1664, 0.2384),
    ("t3.2xlarge", 0.3328, 0.4768),
    ("t3a.nano", 0.0047, 0.0088),
    ("t3a.micro", 0.0094, 0.0135),
    ("t3a.small", 0.0188, 0.0268),
    ("t3a.medium", 0.0376, 0.0536),
    ("t3a.large", 0.0752, 0.1072),
    ("t3a.xlarge", 0.1504, 0.2144),
    ("t3a.2xlarge", 0.3008, 0.4288),
    ("m5.large", 0.096, 0.192),
    ("m5.xlarge", 0.192, 0.384),
    ("m5.2xlarge", 0.384, 0.576),
    ("m5.4xlarge", 0.768, 1.152),
    ("m5.8xlarge", 0.536, 2.304),
    ("m5.12xlarge", 2.304, 3.456),
    ("m5.16xlarge", 3.072, 4.608),
    ("m5.24xlarge", 4.608, 6.912),
    ("m5a.large", 0.086, 0.172),
    ("m5a.xlarge", 0.172, 0.344),
    ("m5a.2xlarge", 0.344, 0.516),
    ("m5a.4xlarge", 0.688, 1.032),
    ("m5a.8xlarge", 1.376, 2.064),
    ("m5a.12xlarge", 2.064, 3.096),
    ("m5a.16xlarge", 2.752, 4.128),
    ("m5a.24xlarge", 4.128, 6.192),
    ("m6i.large", 0.096, 0.192),
    ("m6i.xlarge", 0.192, 0.384),
    ("m6i.2xlarge", 0.384, 0.576),
    ("m6i.4xlarge", 0.768, 1.152),
    ("m6i.8xlarge", 1.536, 2.304),
    ("m6i.12xlarge", 2.304, 3.456),
    ("m6i.16xlarge", 3.072, 4.608),
    ("m6i.24xlarge", 4.608, 6.912),
    ("m6i.32xlarge", 6.144, 9.216),
    ("c5.large", 0.085, 0.187),
    ("c5.xlarge", 0.17, 0.374),
    ("c5.2xlarge", 0.34, 0.544),
    ("c5.4xlarge", 0.68, 1.088),
    ("c5.9xlarge", 1.53, 2.448),
    ("c5.12xlarge", 2.04, 3.264),
    ("c5.18xlarge", 3.06, 4.896),
    ("c5.24xlarge", 4.08, 6.528),
    ("c5a.large", 0.077, 0.169),
    ("c5a.xlarge", 0.154, 0.338),
    ("c5a.2xlarge", 0.308, 0.676),
    ("c5a.4xlarge", 0.616, 1.352),
    ("c5a.8xlarge", 1.232, 2.704),
    ("c5a.12xlarge", 1.848, 4.056),
    ("c5a.16xlarge", 2.464, 5.408),
    ("c5a.24xlarge", 3.696, 8.112),
    ("c6i.large", 0.085, 0.187),
    ("c6i.xlarge", 0.17, 0.374),
    ("c6i.2xlarge", 0.34, 0.544),
    ("c6i.4xlarge", 0.68, 1.088),
    ("c6i.8xlarge", 1.36, 2.176),
    ("c6i.12xlarge", 2.04, 3.264),
    ("c6i.16xlarge", 2.72, 4.352),
    ("c6i.24xlarge", 4.08, 6.528),
    ("c6i.32xlarge", 5.44, 8.704),
    ("r5.large", 0.126, 0.252),
    ("r5.xlarge", 0.252, 0.504),
    ("r5.2xlarge", 0.504, 0.756),
    ("r5.4xlarge", 1.008, 1.512),
    ("r5.8xlarge", 2.016, 3.024),
    ("r5.12xlarge", 3.024, 4.536),
    ("r5.16xlarge", 4.032, 6.048),
    ("r5.24xlarge", 6.048, 9.072),
    ("r5a.large", 0.113, 0.226),
    ("r5a.xlarge", 0.226, 0.452),
    ("r5a.2xlarge", 0.452, 0.678),
    ("r5a.4xlarge", 0.904, 1.356),
    ("r5a.8xlarge", 1.808, 2.712),
    ("r5a.12xlarge", 2.712, 4.068),
    ("r5a.16xlarge", 3.616, 5.424),
    ("r5a.24xlarge", 5.424, 8.136),
    ("r6i.large", 0.126, 0.252),
    ("r6i.xlarge", 0.252, 0.504),
    ("r6i.2xlarge", 0.504, 0.756),
    ("r6i.4xlarge", 1.008, 1.512),
    ("r6i.8xlarge", 2.016, 3.024),
    ("r6i.12xlarge", 3.024, 4.536),
    ("r6i.16xlarge", 4.032, 6.048),
    ("r6i.24xlarge", 6.048, 9.072),
    ("r6i.32xlarge", 8.064, 12.096),
    ("x1.16xlarge", 6.669, 9.669),
    ("x1.32xlarge", 13.338, 19.338),
    ("x1e.xlarge", 0.834, 1.334),
    ("x1e.2xlarge", 1.668, 2.668),
    ("x1e.4xlarge", 3.336, 5.336),
    ("x1e.8xlarge", 6.672, 10.672),
    ("x1e.16xlarge", 13.344, 21.344),
    ("x1e.32xlarge", 26.688, 42.688),
    ("i3.large", 0.156, 0.312),
    ("i3.xlarge", 0.312, 0.624),
    ("i3.2xlarge", 0.624, 0.936),
    ("i3.4xlarge", 1.248, 1.872),
    ("i3.8xlarge", 2.496, 3.744),
    ("i3.16xlarge", 4.992, 7.488),
    ("i4i.large", 0.156, 0.312),
    ("i4i.xlarge", 0.312, 0.624),
    ("i4i.2xlarge", 0.624, 0.936),
    ("i4i.4xlarge", 1.248, 1.872),
    ("i4i.8xlarge", 2.496, 3.744),
    ("i4i.16xlarge", 4.992, 7.488),
    ("i4i.32xlarge", 9.984, 14.976),
    ("d3.xlarge", 0.298, 0.596),
    ("d3.2xlarge", 0.596, 0.894),
    ("d3.4xlarge", 1.192, 1.788),
    ("d3.8xlarge", 2.384, 3.576),
    ("d3en.xlarge", 0.526, 0.789),
    ("d3en.2xlarge", 1.052, 1.578),
    ("d3en.4xlarge", 2.104, 3.156),
    ("d3en.6xlarge", 3.156, 4.734),
    ("d3en.8xlarge", 4.208, 6.312),
    ("d3en.12xlarge", 6.312, 9.468),
    ("p3.2xlarge", 3.06, 3.594),
    ("p3.8xlarge", 12.24, 13.308),
    ("p3.16xlarge", 24.48, 26.616),
    ("p4d.24xlarge", 32.77, 34.906),
    ("g4dn.xlarge", 0.526, 0.786),
    ("g4dn.2xlarge", 0.752, 1.012),
    ("g4dn.4xlarge", 1.204, 1.464),
    ("g4dn.8xlarge", 2.176, 2.696),
    ("g4dn.12xlarge", 3.912, 4.692),
    ("g4dn.16xlarge", 4.352, 5.132),
    ("g5.xlarge", 1.006, 1.266),
    ("g5.2xlarge", 1.212, 1.472),
    ("g5.4xlarge", 1.624, 1.884),
    ("g5.8xlarge", 2.448, 2.968),
    ("g5.12xlarge", 5.672, 6.452),
    ("g5.16xlarge", 4.096, 4.876),
    ("g5.24xlarge", 8.144, 9.184),
    ("g5.48xlarge", 16.288, 18.368),
];

/// Published prices that differ from the multiplier estimate
pub const EC2_REGIONAL_OVERRIDES: &[(&str, &[(&str, f64, f64)])] = &[
    (
        "US West (Oregon)",
        &[
            ("t2.micro", 0.0116, 0.0162),
            ("t3.micro", 0.0104, 0.015),
            ("m5.large", 0.096, 0.192),
            ("m5.xlarge", 0.192, 0.384),
            ("c5.large", 0.085, 0.187),
            ("c5.xlarge", 0.17, 0.374),
            ("r5.large", 0.126, 0.252),
            ("r5.xlarge", 0.252, 0.504),
        ],
    ),
    (
        "EU (Ireland)",
        &[
            ("t2.micro", 0.0126, 0.0172),
            ("t3.micro", 0.0114, 0.0164),
            ("m5.large", 0.107, 0.203),
            ("m5.xlarge", 0.214, 0.406),
            ("c5.large", 0.095, 0.197),
            ("c5.xlarge", 0.19, 0.394),
            ("r5.large", 0.141, 0.267),
            ("r5.xlarge", 0.282, 0.534),
        ],
    ),
    (
        "EU (Frankfurt)",
        &[
            ("t2.micro", 0.0134, 0.018),
            ("t3.micro", 0.0122, 0.0172),
            ("m5.large", 0.114, 0.21),
            ("m5.xlarge", 0.228, 0.42),
            ("c5.large", 0.101, 0.203),
            ("c5.xlarge", 0.202, 0.406),
            ("r5.large", 0.15, 0.276),
            ("r5.xlarge", 0.3, 0.552),
        ],
    ),
    (
        "Asia Pacific (Singapore)",
        &[
            ("t2.micro", 0.0132, 0.0178),
            ("t3.micro", 0.012, 0.017),
            ("m5.large", 0.112, 0.208),
            ("m5.xlarge", 0.224, 0.416),
            ("c5.large", 0.099, 0.201),
            ("c5.xlarge", 0.198, 0.402),
            ("r5.large", 0.148, 0.274),
            ("r5.xlarge", 0.296, 0.548),
        ],
    ),
    (
        "Asia Pacific (Tokyo)",
        &[
            ("t2.micro", 0.0152, 0.0198),
            ("t3.micro", 0.014, 0.019),
            ("m5.large", 0.13, 0.226),
            ("m5.xlarge", 0.26, 0.452),
            ("c5.large", 0.116, 0.218),
            ("c5.xlarge", 0.232, 0.436),
            ("r5.large", 0.168, 0.294),
            ("r5.xlarge", 0.336, 0.588),
        ],
    ),
    (
        "Asia Pacific (Sydney)",
        &[
            ("t2.micro", 0.0146, 0.0192),
            ("t3.micro", 0.0134, 0.0184),
            ("m5.large", 0.124, 0.22),
            ("m5.xlarge", 0.248, 0.44),
            ("c5.large", 0.11, 0.212),
            ("c5.xlarge", 0.22, 0.424),
            ("r5.large", 0.162, 0.288),
            ("r5.xlarge", 0.324, 0.576),
        ],
    ),
];

/// Regional price multipliers relative to US East (N. Virginia)
pub const REGION_MULTIPLIERS: &[(&str, f64)] = &[
    ("US East (N. Virginia)", 1.0),
    ("US East (Ohio)", 1.0),
    ("US West (N. California)", 1.08),
    ("US West (Oregon)", 1.0),
    ("Canada (Central)", 1.05),
    ("EU (Ireland)", 1.12),
    ("EU (London)", 1.13),
    ("EU (Paris)", 1.12),
    ("EU (Frankfurt)", 1.14),
    ("EU (Stockholm)", 1.1),
    ("EU (Milan)", 1.13),
    ("EU (Spain)", 1.12),
    ("EU (Zurich)", 1.15),
    ("Asia Pacific (Mumbai)", 1.15),
    ("Asia Pacific (Singapore)", 1.18),
    ("Asia Pacific (Sydney)", 1.2),
    ("Asia Pacific (Tokyo)", 1.24),
    ("Asia Pacific (Seoul)", 1.18),
    ("Asia Pacific (Osaka)", 1.24),
    ("Asia Pacific (Hong Kong)", 1.22),
    ("Asia Pacific (Jakarta)", 1.18),
    ("Asia Pacific (Melbourne)", 1.2),
    ("Middle East (Bahrain)", 1.2),
    ("Middle East (UAE)", 1.2),
    ("South America (São Paulo)", 1.35),
    ("Africa (Cape Town)", 1.28),
    ("AWS GovCloud (US-East)", 1.08),
    ("AWS GovCloud (US-West)", 1.08),
    ("China (Beijing)", 1.1),
    ("China (Ningxia)", 1.1),
];
