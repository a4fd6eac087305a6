use crate::analytics::metrics::{MetricKey, MetricSnapshot};
use crate::analytics::market::MarketMetrics;

/// A network firing on all cylinders: every sub-metric at or beyond its
/// top anchor.
pub(super) fn thriving_snapshot() -> MetricSnapshot {
    [
        (MetricKey::BidCoverageRate, 0.95),
        (MetricKey::AvgHoursToFirstBid, 2.0),
        (MetricKey::FillRate, 0.70),
        (MetricKey::Csat, 4.8),
        (MetricKey::DisputeRate, 0.01),
        (MetricKey::NoShowRate, 0.005),
        (MetricKey::ActiveProviders, 350.0),
        (MetricKey::ProviderUtilization, 0.55),
        (MetricKey::ProviderChurnRate, 0.02),
        (MetricKey::MonthlyRequests, 900.0),
        (MetricKey::RepeatCustomerRate, 0.60),
        (MetricKey::CancellationRate, 0.03),
        (MetricKey::GmvGrowthMom, 0.20),
        (MetricKey::RevenueVsTarget, 1.10),
        (MetricKey::RefundRate, 0.01),
    ]
    .into_iter()
    .collect()
}

/// Mid-anchor values everywhere a linear sub-score is involved, and the
/// optimal utilization band.
pub(super) fn midpoint_snapshot() -> MetricSnapshot {
    [
        (MetricKey::BidCoverageRate, 0.70),
        (MetricKey::AvgHoursToFirstBid, 10.0),
        (MetricKey::FillRate, 0.45),
        (MetricKey::Csat, 4.35),
        (MetricKey::DisputeRate, 0.05),
        (MetricKey::NoShowRate, 0.03),
        (MetricKey::ActiveProviders, 200.0),
        (MetricKey::ProviderUtilization, 0.55),
        (MetricKey::ProviderChurnRate, 0.055),
        (MetricKey::MonthlyRequests, 500.0),
        (MetricKey::RepeatCustomerRate, 0.325),
        (MetricKey::CancellationRate, 0.10),
        (MetricKey::GmvGrowthMom, 0.05),
        (MetricKey::RevenueVsTarget, 0.75),
        (MetricKey::RefundRate, 0.05),
    ]
    .into_iter()
    .collect()
}

pub(super) fn market(
    name: &str,
    providers_active: u32,
    bid_coverage_rate: f64,
    fill_rate: f64,
    provider_utilization: f64,
) -> MarketMetrics {
    MarketMetrics {
        market: name.to_string(),
        providers_active,
        weekly_requests: 120,
        bid_coverage_rate,
        fill_rate,
        avg_hours_to_first_bid: 6.0,
        weekly_gmv_cents: 4_250_000,
        provider_utilization,
    }
}
