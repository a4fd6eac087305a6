//! Per-market diagnostics: status classification against two ordered
//! threshold tiers, and the intervention playbook for markets that miss
//! them. Markets are evaluated independently because each has its own
//! supply/demand dynamics.

use serde::{Deserialize, Serialize};

use crate::config::InvalidConfig;

fn unknown_market() -> String {
    "unknown".to_string()
}

/// Raw per-market reporting record. Absent fields default to zero (and the
/// market identifier to "unknown"), the same worst-case bias as the network
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMetrics {
    #[serde(default = "unknown_market")]
    pub market: String,
    #[serde(default)]
    pub providers_active: u32,
    #[serde(default)]
    pub weekly_requests: u32,
    /// Fraction of requests with 3+ bids.
    #[serde(default)]
    pub bid_coverage_rate: f64,
    /// Fraction of requests that convert to a booking.
    #[serde(default)]
    pub fill_rate: f64,
    #[serde(default)]
    pub avg_hours_to_first_bid: f64,
    #[serde(default)]
    pub weekly_gmv_cents: u64,
    /// Average fraction of provider capacity used.
    #[serde(default)]
    pub provider_utilization: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    Healthy,
    Watch,
    Intervene,
}

impl MarketStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MarketStatus::Healthy => "healthy",
            MarketStatus::Watch => "watch",
            MarketStatus::Intervene => "intervene",
        }
    }
}

/// A market snapshot with its derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketHealth {
    pub market: String,
    pub providers_active: u32,
    pub weekly_requests: u32,
    pub bid_coverage_rate: f64,
    pub fill_rate: f64,
    pub avg_hours_to_first_bid: f64,
    pub weekly_gmv_cents: u64,
    pub provider_utilization: f64,
    pub status: MarketStatus,
}

/// Floor a market must clear on both coverage and fill rate to sit in a
/// tier. Both conditions must hold; failing either drops the market to the
/// next tier down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub bid_coverage: f64,
    pub fill_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketThresholds {
    pub healthy: TierThresholds,
    pub watch: TierThresholds,
}

impl Default for MarketThresholds {
    fn default() -> Self {
        Self {
            healthy: TierThresholds {
                bid_coverage: 0.80,
                fill_rate: 0.55,
            },
            watch: TierThresholds {
                bid_coverage: 0.65,
                fill_rate: 0.40,
            },
        }
    }
}

impl MarketThresholds {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.healthy.bid_coverage <= self.watch.bid_coverage {
            return Err(InvalidConfig::InvertedBounds {
                context: "market bid-coverage tiers",
                lower: self.watch.bid_coverage,
                upper: self.healthy.bid_coverage,
            });
        }
        if self.healthy.fill_rate <= self.watch.fill_rate {
            return Err(InvalidConfig::InvertedBounds {
                context: "market fill-rate tiers",
                lower: self.watch.fill_rate,
                upper: self.healthy.fill_rate,
            });
        }
        Ok(())
    }
}

/// Classifies a single market against the two-tier threshold ladder.
#[derive(Debug, Clone)]
pub struct MarketStatusClassifier {
    thresholds: MarketThresholds,
}

impl MarketStatusClassifier {
    pub fn new(thresholds: MarketThresholds) -> Result<Self, InvalidConfig> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn assess(&self, metrics: MarketMetrics) -> MarketHealth {
        let status = self.status_for(metrics.bid_coverage_rate, metrics.fill_rate);

        MarketHealth {
            market: metrics.market,
            providers_active: metrics.providers_active,
            weekly_requests: metrics.weekly_requests,
            bid_coverage_rate: metrics.bid_coverage_rate,
            fill_rate: metrics.fill_rate,
            avg_hours_to_first_bid: metrics.avg_hours_to_first_bid,
            weekly_gmv_cents: metrics.weekly_gmv_cents,
            provider_utilization: metrics.provider_utilization,
            status,
        }
    }

    fn status_for(&self, bid_coverage: f64, fill_rate: f64) -> MarketStatus {
        let t = &self.thresholds;
        if bid_coverage >= t.healthy.bid_coverage && fill_rate >= t.healthy.fill_rate {
            MarketStatus::Healthy
        } else if bid_coverage >= t.watch.bid_coverage && fill_rate >= t.watch.fill_rate {
            MarketStatus::Watch
        } else {
            MarketStatus::Intervene
        }
    }
}

impl Default for MarketStatusClassifier {
    fn default() -> Self {
        Self {
            thresholds: MarketThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionOwner {
    Operations,
    Engineering,
    Product,
}

/// One step of the intervention playbook for an underperforming market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionAction {
    pub action: &'static str,
    pub description: String,
    pub priority: ActionPriority,
    pub owner: ActionOwner,
}

/// Trigger conditions for the playbook. Each is evaluated independently;
/// several may fire for the same market and every matching action is
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterventionTriggers {
    pub low_bid_coverage: f64,
    pub min_active_providers: u32,
    pub low_utilization: f64,
    pub low_fill_rate: f64,
}

impl Default for InterventionTriggers {
    fn default() -> Self {
        Self {
            low_bid_coverage: 0.80,
            min_active_providers: 15,
            low_utilization: 0.30,
            low_fill_rate: 0.40,
        }
    }
}

/// Derives the prioritized action list for a market that is not healthy.
#[derive(Debug, Clone, Default)]
pub struct InterventionPlanner {
    triggers: InterventionTriggers,
}

impl InterventionPlanner {
    pub fn new(triggers: InterventionTriggers) -> Self {
        Self { triggers }
    }

    /// Playbook: find the category gaps, recruit into them, widen the
    /// matching radius, route demand manually, and investigate conversion.
    /// A healthy market needs none of it and yields an empty plan.
    pub fn plan(&self, market: &MarketHealth) -> Vec<InterventionAction> {
        if market.status == MarketStatus::Healthy {
            return Vec::new();
        }

        let mut actions = Vec::new();

        if market.bid_coverage_rate < self.triggers.low_bid_coverage {
            actions.push(InterventionAction {
                action: "identify_category_gaps",
                description: format!(
                    "Analyze which categories in {} have < {:.0}% bid coverage",
                    market.market,
                    self.triggers.low_bid_coverage * 100.0
                ),
                priority: ActionPriority::High,
                owner: ActionOwner::Operations,
            });
            actions.push(InterventionAction {
                action: "expand_matching_radius",
                description: format!(
                    "Temporarily increase matching radius by 10 miles in {}",
                    market.market
                ),
                priority: ActionPriority::High,
                owner: ActionOwner::Engineering,
            });
        }

        if market.providers_active < self.triggers.min_active_providers {
            actions.push(InterventionAction {
                action: "targeted_recruitment",
                description: format!(
                    "Recruit 10+ providers in {} for underserved categories",
                    market.market
                ),
                priority: ActionPriority::High,
                owner: ActionOwner::Operations,
            });
        }

        if market.provider_utilization < self.triggers.low_utilization {
            actions.push(InterventionAction {
                action: "route_demand",
                description: format!(
                    "Operator manually routes additional demand to {}",
                    market.market
                ),
                priority: ActionPriority::Medium,
                owner: ActionOwner::Operations,
            });
        }

        if market.fill_rate < self.triggers.low_fill_rate {
            actions.push(InterventionAction {
                action: "investigate_conversion",
                description: format!(
                    "Analyze why bids in {} aren't converting. Check bid quality, pricing, provider profiles.",
                    market.market
                ),
                priority: ActionPriority::Medium,
                owner: ActionOwner::Product,
            });
        }

        actions
    }
}
