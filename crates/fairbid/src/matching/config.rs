use serde::{Deserialize, Serialize};

use super::domain::ProviderTier;
use crate::config::{check_weight_sum, InvalidConfig};

/// Composite match score weights. Rating dominates; recency is a small
/// nudge toward providers who still open the app.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub rating: f64,
    pub completion_rate: f64,
    pub response_time: f64,
    pub tier: f64,
    pub recency: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            rating: 0.35,
            completion_rate: 0.25,
            response_time: 0.20,
            tier: 0.15,
            recency: 0.05,
        }
    }
}

impl MatchWeights {
    fn sum(self) -> f64 {
        self.rating + self.completion_rate + self.response_time + self.tier + self.recency
    }
}

/// Per-tier sub-score on the 0-1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierScores {
    pub elite: f64,
    pub preferred: f64,
    pub standard: f64,
}

impl Default for TierScores {
    fn default() -> Self {
        Self {
            elite: 1.0,
            preferred: 0.7,
            standard: 0.4,
        }
    }
}

impl TierScores {
    pub fn score(&self, tier: ProviderTier) -> f64 {
        match tier {
            ProviderTier::Elite => self.elite,
            ProviderTier::Preferred => self.preferred,
            ProviderTier::Standard => self.standard,
        }
    }
}

/// Matching policy knobs: score weights, the tier table, result limits, and
/// the radius step used when a request needs a second pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: MatchWeights,
    pub tier_scores: TierScores,
    /// How many providers get notified on a first match.
    pub default_limit: usize,
    /// How many candidates a rematch scores before exclusions are applied.
    pub rematch_limit: usize,
    /// Radius expansion for a rematch, in miles.
    pub rematch_radius_increase_miles: u32,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            tier_scores: TierScores::default(),
            default_limit: 10,
            rematch_limit: 20,
            rematch_radius_increase_miles: 10,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        check_weight_sum("match weights", self.weights.sum())?;
        for (context, score) in [
            ("tier score (elite)", self.tier_scores.elite),
            ("tier score (preferred)", self.tier_scores.preferred),
            ("tier score (standard)", self.tier_scores.standard),
        ] {
            if !(0.0..=1.0).contains(&score) {
                return Err(InvalidConfig::RateOutOfRange {
                    context,
                    value: score,
                });
            }
        }
        if self.default_limit == 0 {
            return Err(InvalidConfig::ZeroLimit {
                context: "matching default limit",
            });
        }
        if self.rematch_limit < self.default_limit {
            return Err(InvalidConfig::InvertedBounds {
                context: "rematch limit below default limit",
                lower: self.rematch_limit as f64,
                upper: self.default_limit as f64,
            });
        }
        Ok(())
    }
}
