use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named numeric inputs produced by the reporting warehouse.
///
/// Every key has a documented fallback applied when a snapshot omits it.
/// The fallbacks deliberately bias toward the worst case (a market that
/// reports nothing scores as if it had no coverage and day-long bid times),
/// with the single exception of the lower-is-better rates, which mirror the
/// warehouse contract of reporting zero when no incidents occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    /// Fraction of requests receiving at least three bids. Default 0.
    BidCoverageRate,
    /// Average hours until the first bid arrives. Default 24.
    AvgHoursToFirstBid,
    /// Fraction of requests converting to a completed booking. Default 0.
    FillRate,
    /// Customer satisfaction on the 1-5 scale. Default 0.
    Csat,
    /// Fraction of bookings ending in a dispute. Default 0.
    DisputeRate,
    /// Fraction of bookings where the provider failed to show. Default 0.
    NoShowRate,
    /// Count of providers active in the period. Default 0.
    ActiveProviders,
    /// Average fraction of provider capacity in use. Default 0.
    ProviderUtilization,
    /// Monthly provider churn rate. Default 0.
    ProviderChurnRate,
    /// Service requests received this month. Default 0.
    MonthlyRequests,
    /// Fraction of customers with a prior completed booking. Default 0.
    RepeatCustomerRate,
    /// Fraction of bookings cancelled. Default 0.
    CancellationRate,
    /// Month-over-month GMV growth as a signed fraction. Default 0.
    GmvGrowthMom,
    /// Revenue attainment against target as a fraction. Default 0.
    RevenueVsTarget,
    /// Fraction of captured volume refunded. Default 0.
    RefundRate,
}

impl MetricKey {
    /// Fallback used when the snapshot omits this key.
    pub const fn default_value(self) -> f64 {
        match self {
            MetricKey::AvgHoursToFirstBid => 24.0,
            _ => 0.0,
        }
    }
}

/// Immutable mapping of reported metrics for one period.
///
/// Produced by the external reporting source and consumed read-only; the
/// defaulting policy lives entirely in [`MetricSnapshot::get`] so it can be
/// audited and tested in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot(BTreeMap<MetricKey, f64>);

impl MetricSnapshot {
    pub fn new(values: BTreeMap<MetricKey, f64>) -> Self {
        Self(values)
    }

    /// Value for `key`, falling back to the documented per-key default.
    pub fn get(&self, key: MetricKey) -> f64 {
        self.0
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.default_value())
    }

    pub fn contains(&self, key: MetricKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MetricKey, f64)> for MetricSnapshot {
    fn from_iter<I: IntoIterator<Item = (MetricKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
