//! The composite health index: the single number that summarizes overall
//! network status, reported weekly to the product team.

mod components;
mod config;

pub use config::{
    ComponentWeights, DemandConfig, FinancialConfig, HealthBand, HealthBands, HealthIndexConfig,
    HealthInterpretation, LiquidityConfig, QualityConfig, SupplyConfig, UtilizationBands,
    WeightedAnchor,
};

use serde::{Deserialize, Serialize};

use super::metrics::MetricSnapshot;
use crate::config::InvalidConfig;

/// Composite network health: overall score, the five component scores (all
/// 0-100, rounded to one decimal), and the interpretation band.
///
/// The overall score is the fixed-weight sum of the five components before
/// rounding; the band is looked up on the unrounded composite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIndex {
    pub overall_score: f64,
    pub liquidity_score: f64,
    pub quality_score: f64,
    pub supply_score: f64,
    pub demand_score: f64,
    pub financial_score: f64,
    pub interpretation: HealthInterpretation,
}

/// Stateless analyzer that applies a validated weight/anchor configuration
/// to a metric snapshot.
#[derive(Debug, Clone)]
pub struct HealthIndexAnalyzer {
    config: HealthIndexConfig,
}

impl HealthIndexAnalyzer {
    pub fn new(config: HealthIndexConfig) -> Result<Self, InvalidConfig> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HealthIndexConfig {
        &self.config
    }

    /// Calculate the composite health index for one reporting period.
    ///
    /// Each component is scored 0-100 independently, then weighted:
    /// liquidity 25%, quality 25%, supply 20%, demand 20%, financial 10%
    /// under the default configuration.
    pub fn index(&self, metrics: &MetricSnapshot) -> HealthIndex {
        let liquidity = components::score_liquidity(metrics, &self.config.liquidity);
        let quality = components::score_quality(metrics, &self.config.quality);
        let supply = components::score_supply(metrics, &self.config.supply);
        let demand = components::score_demand(metrics, &self.config.demand);
        let financial = components::score_financial(metrics, &self.config.financial);

        let overall = self
            .config
            .weights
            .combine(liquidity, quality, supply, demand, financial);

        HealthIndex {
            overall_score: round_tenth(overall),
            liquidity_score: round_tenth(liquidity),
            quality_score: round_tenth(quality),
            supply_score: round_tenth(supply),
            demand_score: round_tenth(demand),
            financial_score: round_tenth(financial),
            interpretation: self.config.bands.interpret(overall),
        }
    }
}

impl Default for HealthIndexAnalyzer {
    fn default() -> Self {
        Self {
            config: HealthIndexConfig::default(),
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(HealthIndexConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut config = HealthIndexConfig::default();
        config.weights.financial = 0.30;
        assert!(matches!(
            HealthIndexAnalyzer::new(config),
            Err(InvalidConfig::WeightSum { .. })
        ));
    }

    #[test]
    fn rejects_inverted_anchor_pair() {
        let mut config = HealthIndexConfig::default();
        config.quality.csat.low = 5.0;
        config.quality.csat.high = 4.0;
        assert!(matches!(
            HealthIndexAnalyzer::new(config),
            Err(InvalidConfig::InvertedBounds { .. })
        ));
    }

    #[test]
    fn utilization_band_is_a_three_tier_step() {
        let bands = SupplyConfig::default().utilization;
        assert_eq!(bands.score(0.40), 100.0);
        assert_eq!(bands.score(0.55), 100.0);
        assert_eq!(bands.score(0.70), 100.0);
        assert_eq!(bands.score(0.20), 60.0);
        assert_eq!(bands.score(0.39), 60.0);
        assert_eq!(bands.score(0.71), 60.0);
        assert_eq!(bands.score(0.80), 60.0);
        assert_eq!(bands.score(0.10), 20.0);
        assert_eq!(bands.score(0.95), 20.0);
    }

    #[test]
    fn band_lookup_falls_back_to_critical() {
        let bands = HealthBands::default();
        assert_eq!(bands.interpret(100.0), HealthInterpretation::Thriving);
        assert_eq!(bands.interpret(85.0), HealthInterpretation::Thriving);
        assert_eq!(bands.interpret(84.0), HealthInterpretation::Healthy);
        assert_eq!(bands.interpret(70.0), HealthInterpretation::Healthy);
        assert_eq!(bands.interpret(69.0), HealthInterpretation::Stressed);
        assert_eq!(bands.interpret(55.0), HealthInterpretation::Stressed);
        assert_eq!(bands.interpret(54.0), HealthInterpretation::Critical);
        assert_eq!(bands.interpret(0.0), HealthInterpretation::Critical);
        // Scores outside every listed band hit the numeric guard.
        assert_eq!(bands.interpret(-3.0), HealthInterpretation::Critical);
        assert_eq!(bands.interpret(101.0), HealthInterpretation::Critical);
    }
}
