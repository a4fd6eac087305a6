use super::config::{
    DemandConfig, FinancialConfig, LiquidityConfig, QualityConfig, SupplyConfig,
};
use crate::analytics::metrics::{MetricKey, MetricSnapshot};

/// Are customers getting bids, and quickly, and do bids convert?
pub(crate) fn score_liquidity(metrics: &MetricSnapshot, config: &LiquidityConfig) -> f64 {
    let coverage = config.coverage.score(metrics.get(MetricKey::BidCoverageRate));
    let first_bid = config
        .first_bid_hours
        .score_inverse(metrics.get(MetricKey::AvgHoursToFirstBid));
    let fill = config.fill_rate.score(metrics.get(MetricKey::FillRate));

    config.coverage.weight * coverage
        + config.first_bid_hours.weight * first_bid
        + config.fill_rate.weight * fill
}

/// Are customers satisfied, and are disputes and no-shows rare?
pub(crate) fn score_quality(metrics: &MetricSnapshot, config: &QualityConfig) -> f64 {
    let csat = config.csat.score(metrics.get(MetricKey::Csat));
    let disputes = config
        .dispute_rate
        .score_inverse(metrics.get(MetricKey::DisputeRate));
    let no_shows = config
        .no_show_rate
        .score_inverse(metrics.get(MetricKey::NoShowRate));

    config.csat.weight * csat
        + config.dispute_rate.weight * disputes
        + config.no_show_rate.weight * no_shows
}

/// Is the provider base deep enough, busy enough, and sticking around?
pub(crate) fn score_supply(metrics: &MetricSnapshot, config: &SupplyConfig) -> f64 {
    let providers = config
        .active_providers
        .score(metrics.get(MetricKey::ActiveProviders));
    let utilization = config
        .utilization
        .score(metrics.get(MetricKey::ProviderUtilization));
    let churn = config
        .churn
        .score_inverse(metrics.get(MetricKey::ProviderChurnRate));

    config.active_providers.weight * providers
        + config.utilization.weight * utilization
        + config.churn.weight * churn
}

pub(crate) fn score_demand(metrics: &MetricSnapshot, config: &DemandConfig) -> f64 {
    let requests = config
        .monthly_requests
        .score(metrics.get(MetricKey::MonthlyRequests));
    let repeats = config
        .repeat_rate
        .score(metrics.get(MetricKey::RepeatCustomerRate));
    let cancellations = config
        .cancellation_rate
        .score_inverse(metrics.get(MetricKey::CancellationRate));

    config.monthly_requests.weight * requests
        + config.repeat_rate.weight * repeats
        + config.cancellation_rate.weight * cancellations
}

pub(crate) fn score_financial(metrics: &MetricSnapshot, config: &FinancialConfig) -> f64 {
    let growth = config.gmv_growth.score(metrics.get(MetricKey::GmvGrowthMom));
    let revenue = config
        .revenue_vs_target
        .score(metrics.get(MetricKey::RevenueVsTarget));
    let refunds = config
        .refund_rate
        .score_inverse(metrics.get(MetricKey::RefundRate));

    config.gmv_growth.weight * growth
        + config.revenue_vs_target.weight * revenue
        + config.refund_rate.weight * refunds
}
