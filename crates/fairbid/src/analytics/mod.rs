//! Network and market quality signals.
//!
//! Raw warehouse metrics flow one way: named inputs are normalized onto a
//! 0-100 scale, combined into weighted component scores, aggregated into the
//! composite health index, and classified against fixed interpretation
//! bands. Earnings fairness and per-market diagnostics follow the same
//! pattern with their own threshold ladders. Every analyzer is stateless and
//! holds only the immutable configuration it was constructed with.

pub mod fairness;
pub mod health;
pub mod market;
pub mod metrics;
pub mod normalize;

#[cfg(test)]
mod tests;

pub use fairness::{EarningsDistribution, FairnessAnalyzer, FairnessStatus, GiniThresholds};
pub use health::{
    HealthBand, HealthIndex, HealthIndexAnalyzer, HealthIndexConfig, HealthInterpretation,
};
pub use market::{
    ActionOwner, ActionPriority, InterventionAction, InterventionPlanner, InterventionTriggers,
    MarketHealth, MarketMetrics, MarketStatus, MarketStatusClassifier, MarketThresholds,
    TierThresholds,
};
pub use metrics::{MetricKey, MetricSnapshot};
