use serde::{Deserialize, Serialize};

use crate::analytics::normalize;
use crate::config::{check_ordered, check_weight_sum, InvalidConfig};

/// A weighted piecewise-linear sub-score: the anchor pair for normalization
/// plus this sub-metric's share of its component. For inverse sub-scores the
/// anchors read (fast, slow) instead of (low, high).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedAnchor {
    pub weight: f64,
    pub low: f64,
    pub high: f64,
}

impl WeightedAnchor {
    pub(crate) fn score(self, value: f64) -> f64 {
        normalize::linear(value, self.low, self.high)
    }

    pub(crate) fn score_inverse(self, value: f64) -> f64 {
        normalize::linear_inverse(value, self.low, self.high)
    }

    fn validate(self, context: &'static str) -> Result<(), InvalidConfig> {
        check_ordered(context, self.low, self.high)
    }
}

/// Liquidity sub-scores: bid coverage dominates, first-bid latency and fill
/// rate split the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityConfig {
    pub coverage: WeightedAnchor,
    pub first_bid_hours: WeightedAnchor,
    pub fill_rate: WeightedAnchor,
}

impl Default for LiquidityConfig {
    fn default() -> Self {
        Self {
            coverage: WeightedAnchor {
                weight: 0.40,
                low: 0.50,
                high: 0.90,
            },
            first_bid_hours: WeightedAnchor {
                weight: 0.30,
                low: 4.0,
                high: 16.0,
            },
            fill_rate: WeightedAnchor {
                weight: 0.30,
                low: 0.30,
                high: 0.60,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    pub csat: WeightedAnchor,
    pub dispute_rate: WeightedAnchor,
    pub no_show_rate: WeightedAnchor,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            csat: WeightedAnchor {
                weight: 0.50,
                low: 4.0,
                high: 4.7,
            },
            dispute_rate: WeightedAnchor {
                weight: 0.30,
                low: 0.02,
                high: 0.08,
            },
            no_show_rate: WeightedAnchor {
                weight: 0.20,
                low: 0.01,
                high: 0.05,
            },
        }
    }
}

/// Provider utilization has an optimal band rather than a monotone anchor:
/// too low means providers are starved, too high means demand is outrunning
/// supply. Inside the optimal band scores 100, inside the acceptable band 60,
/// outside 20.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationBands {
    pub weight: f64,
    pub optimal_low: f64,
    pub optimal_high: f64,
    pub acceptable_low: f64,
    pub acceptable_high: f64,
}

impl UtilizationBands {
    pub(crate) fn score(self, utilization: f64) -> f64 {
        if (self.optimal_low..=self.optimal_high).contains(&utilization) {
            100.0
        } else if (self.acceptable_low..self.optimal_low).contains(&utilization)
            || (utilization > self.optimal_high && utilization <= self.acceptable_high)
        {
            60.0
        } else {
            20.0
        }
    }

    fn validate(self) -> Result<(), InvalidConfig> {
        check_ordered("supply.utilization optimal band", self.optimal_low, self.optimal_high)?;
        check_ordered(
            "supply.utilization acceptable band",
            self.acceptable_low,
            self.acceptable_high,
        )?;
        check_ordered(
            "supply.utilization band nesting (low edge)",
            self.acceptable_low,
            self.optimal_low,
        )?;
        check_ordered(
            "supply.utilization band nesting (high edge)",
            self.optimal_high,
            self.acceptable_high,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupplyConfig {
    pub active_providers: WeightedAnchor,
    pub utilization: UtilizationBands,
    pub churn: WeightedAnchor,
}

impl Default for SupplyConfig {
    fn default() -> Self {
        Self {
            active_providers: WeightedAnchor {
                weight: 0.35,
                low: 100.0,
                high: 300.0,
            },
            utilization: UtilizationBands {
                weight: 0.35,
                optimal_low: 0.40,
                optimal_high: 0.70,
                acceptable_low: 0.20,
                acceptable_high: 0.80,
            },
            churn: WeightedAnchor {
                weight: 0.30,
                low: 0.03,
                high: 0.08,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandConfig {
    pub monthly_requests: WeightedAnchor,
    pub repeat_rate: WeightedAnchor,
    pub cancellation_rate: WeightedAnchor,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            monthly_requests: WeightedAnchor {
                weight: 0.40,
                low: 200.0,
                high: 800.0,
            },
            repeat_rate: WeightedAnchor {
                weight: 0.35,
                low: 0.15,
                high: 0.50,
            },
            cancellation_rate: WeightedAnchor {
                weight: 0.25,
                low: 0.05,
                high: 0.15,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialConfig {
    pub gmv_growth: WeightedAnchor,
    pub revenue_vs_target: WeightedAnchor,
    pub refund_rate: WeightedAnchor,
}

impl Default for FinancialConfig {
    fn default() -> Self {
        Self {
            gmv_growth: WeightedAnchor {
                weight: 0.40,
                low: -0.05,
                high: 0.15,
            },
            revenue_vs_target: WeightedAnchor {
                weight: 0.35,
                low: 0.50,
                high: 1.0,
            },
            refund_rate: WeightedAnchor {
                weight: 0.25,
                low: 0.02,
                high: 0.08,
            },
        }
    }
}

/// Top-level component weights for the composite index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub liquidity: f64,
    pub quality: f64,
    pub supply: f64,
    pub demand: f64,
    pub financial: f64,
}

impl ComponentWeights {
    pub(crate) fn combine(
        self,
        liquidity: f64,
        quality: f64,
        supply: f64,
        demand: f64,
        financial: f64,
    ) -> f64 {
        self.liquidity * liquidity
            + self.quality * quality
            + self.supply * supply
            + self.demand * demand
            + self.financial * financial
    }

    fn sum(self) -> f64 {
        self.liquidity + self.quality + self.supply + self.demand + self.financial
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            liquidity: 0.25,
            quality: 0.25,
            supply: 0.20,
            demand: 0.20,
            financial: 0.10,
        }
    }
}

/// Interpretation of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthInterpretation {
    /// Expand to new markets.
    Thriving,
    /// Optimize before expanding.
    Healthy,
    /// Fix weak components.
    Stressed,
    /// Pause expansion, stabilize.
    Critical,
}

impl HealthInterpretation {
    pub const fn label(self) -> &'static str {
        match self {
            HealthInterpretation::Thriving => "thriving",
            HealthInterpretation::Healthy => "healthy",
            HealthInterpretation::Stressed => "stressed",
            HealthInterpretation::Critical => "critical",
        }
    }
}

/// One inclusive band of the interpretation ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthBand {
    pub interpretation: HealthInterpretation,
    pub low: f64,
    pub high: f64,
}

/// Ordered interpretation ladder. Evaluation is first-match-wins over the
/// listed bands, both ends inclusive; a score matching no band falls back to
/// [`HealthInterpretation::Critical`] as a numeric guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBands(pub Vec<HealthBand>);

impl HealthBands {
    pub(crate) fn interpret(&self, score: f64) -> HealthInterpretation {
        for band in &self.0 {
            if band.low <= score && score <= band.high {
                return band.interpretation;
            }
        }
        HealthInterpretation::Critical
    }

    fn validate(&self) -> Result<(), InvalidConfig> {
        for band in &self.0 {
            check_ordered("health band", band.low, band.high)?;
        }
        Ok(())
    }
}

impl Default for HealthBands {
    fn default() -> Self {
        Self(vec![
            HealthBand {
                interpretation: HealthInterpretation::Thriving,
                low: 85.0,
                high: 100.0,
            },
            HealthBand {
                interpretation: HealthInterpretation::Healthy,
                low: 70.0,
                high: 84.0,
            },
            HealthBand {
                interpretation: HealthInterpretation::Stressed,
                low: 55.0,
                high: 69.0,
            },
            HealthBand {
                interpretation: HealthInterpretation::Critical,
                low: 0.0,
                high: 54.0,
            },
        ])
    }
}

/// Complete configuration for the health index: top-level weights, the five
/// component anchor tables, and the interpretation ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIndexConfig {
    pub weights: ComponentWeights,
    pub liquidity: LiquidityConfig,
    pub quality: QualityConfig,
    pub supply: SupplyConfig,
    pub demand: DemandConfig,
    pub financial: FinancialConfig,
    pub bands: HealthBands,
}

impl Default for HealthIndexConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            liquidity: LiquidityConfig::default(),
            quality: QualityConfig::default(),
            supply: SupplyConfig::default(),
            demand: DemandConfig::default(),
            financial: FinancialConfig::default(),
            bands: HealthBands::default(),
        }
    }
}

impl HealthIndexConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        check_weight_sum("health component weights", self.weights.sum())?;

        check_weight_sum(
            "liquidity sub-weights",
            self.liquidity.coverage.weight
                + self.liquidity.first_bid_hours.weight
                + self.liquidity.fill_rate.weight,
        )?;
        self.liquidity.coverage.validate("liquidity.coverage")?;
        self.liquidity
            .first_bid_hours
            .validate("liquidity.first_bid_hours")?;
        self.liquidity.fill_rate.validate("liquidity.fill_rate")?;

        check_weight_sum(
            "quality sub-weights",
            self.quality.csat.weight
                + self.quality.dispute_rate.weight
                + self.quality.no_show_rate.weight,
        )?;
        self.quality.csat.validate("quality.csat")?;
        self.quality.dispute_rate.validate("quality.dispute_rate")?;
        self.quality.no_show_rate.validate("quality.no_show_rate")?;

        check_weight_sum(
            "supply sub-weights",
            self.supply.active_providers.weight
                + self.supply.utilization.weight
                + self.supply.churn.weight,
        )?;
        self.supply
            .active_providers
            .validate("supply.active_providers")?;
        self.supply.utilization.validate()?;
        self.supply.churn.validate("supply.churn")?;

        check_weight_sum(
            "demand sub-weights",
            self.demand.monthly_requests.weight
                + self.demand.repeat_rate.weight
                + self.demand.cancellation_rate.weight,
        )?;
        self.demand
            .monthly_requests
            .validate("demand.monthly_requests")?;
        self.demand.repeat_rate.validate("demand.repeat_rate")?;
        self.demand
            .cancellation_rate
            .validate("demand.cancellation_rate")?;

        check_weight_sum(
            "financial sub-weights",
            self.financial.gmv_growth.weight
                + self.financial.revenue_vs_target.weight
                + self.financial.refund_rate.weight,
        )?;
        self.financial.gmv_growth.validate("financial.gmv_growth")?;
        self.financial
            .revenue_vs_target
            .validate("financial.revenue_vs_target")?;
        self.financial.refund_rate.validate("financial.refund_rate")?;

        self.bands.validate()
    }
}
