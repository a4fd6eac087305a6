//! Earnings-fairness measurement across the provider network.
//!
//! The Gini coefficient is tracked as a guardrail metric: winner-take-all
//! dynamics kill supply-side marketplaces, while a perfectly flat
//! distribution means the best providers are not being rewarded.

use serde::{Deserialize, Serialize};

use crate::config::{check_ordered, InvalidConfig};

/// Ordered Gini threshold ladder. Evaluation is first-match-wins in the
/// order: healthy band, below-band, then the escalating concentration tiers;
/// the ranges are contiguous, so the order decides boundary inclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GiniThresholds {
    /// Lower edge of the target band (inclusive).
    pub healthy_low: f64,
    /// Upper edge of the target band (inclusive).
    pub healthy_high: f64,
    /// Upper edge of the concentration-beginning watch tier (inclusive).
    pub watch_high: f64,
    /// Upper edge of the warning tier (inclusive); above is critical.
    pub warning_high: f64,
}

impl Default for GiniThresholds {
    fn default() -> Self {
        Self {
            healthy_low: 0.30,
            healthy_high: 0.45,
            watch_high: 0.50,
            warning_high: 0.55,
        }
    }
}

impl GiniThresholds {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        check_ordered("gini healthy band", self.healthy_low, self.healthy_high)?;
        check_ordered("gini watch tier", self.healthy_high, self.watch_high)?;
        check_ordered("gini warning tier", self.watch_high, self.warning_high)
    }
}

/// Classification of an earnings distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessStatus {
    Healthy,
    Watch,
    Warning,
    Critical,
    InsufficientData,
    NoEarnings,
}

impl FairnessStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FairnessStatus::Healthy => "healthy",
            FairnessStatus::Watch => "watch",
            FairnessStatus::Warning => "warning",
            FairnessStatus::Critical => "critical",
            FairnessStatus::InsufficientData => "insufficient_data",
            FairnessStatus::NoEarnings => "no_earnings",
        }
    }
}

/// How provider earnings are distributed for a period: the Gini coefficient
/// (0 = perfect equality, 1 = one provider earns everything), the
/// percentile-bucket shares, and the classification with its remediation
/// recommendation. All ratios are rounded to four decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsDistribution {
    pub gini_coefficient: f64,
    pub top_10_pct_share: f64,
    pub middle_50_pct_share: f64,
    pub bottom_40_pct_share: f64,
    pub status: FairnessStatus,
    pub recommendation: Option<String>,
}

impl EarningsDistribution {
    fn sentinel(status: FairnessStatus, recommendation: Option<String>) -> Self {
        Self {
            gini_coefficient: 0.0,
            top_10_pct_share: 0.0,
            middle_50_pct_share: 0.0,
            bottom_40_pct_share: 0.0,
            status,
            recommendation,
        }
    }
}

/// Stateless analyzer applying the threshold ladder to per-provider
/// earnings totals (cents).
#[derive(Debug, Clone)]
pub struct FairnessAnalyzer {
    thresholds: GiniThresholds,
}

impl FairnessAnalyzer {
    pub fn new(thresholds: GiniThresholds) -> Result<Self, InvalidConfig> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    /// Measure the earnings distribution for one period.
    ///
    /// Two degenerate inputs short-circuit to sentinel distributions instead
    /// of computing a ratio: fewer than two providers, and a period with
    /// zero total earnings.
    ///
    /// Gini = (2 * Σ(rank * earning)) / (n * total) − (n + 1) / n, with
    /// earnings sorted ascending and rank 1-based.
    pub fn distribution(&self, provider_earnings: &[u64]) -> EarningsDistribution {
        if provider_earnings.len() < 2 {
            return EarningsDistribution::sentinel(
                FairnessStatus::InsufficientData,
                Some(
                    "Need at least 2 providers with earnings to calculate distribution"
                        .to_string(),
                ),
            );
        }

        let mut sorted = provider_earnings.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();
        let total: u128 = sorted.iter().map(|earning| u128::from(*earning)).sum();

        if total == 0 {
            return EarningsDistribution::sentinel(FairnessStatus::NoEarnings, None);
        }

        let rank_weighted: u128 = sorted
            .iter()
            .enumerate()
            .map(|(index, earning)| (index as u128 + 1) * u128::from(*earning))
            .sum();

        let n_f = n as f64;
        let total_f = total as f64;
        let gini = (2.0 * rank_weighted as f64) / (n_f * total_f) - (n_f + 1.0) / n_f;
        let gini = round_four(gini);

        // Bucket edges land on floor(n * percentile), clamped so each bucket
        // keeps at least one entry even for tiny networks.
        let top_10_idx = ((n_f * 0.9) as usize).max(1);
        let bottom_40_idx = ((n_f * 0.4) as usize).max(1);

        let share = |slice: &[u64]| {
            slice.iter().map(|earning| u128::from(*earning)).sum::<u128>() as f64 / total_f
        };
        let top_10_share = share(&sorted[top_10_idx..]);
        let bottom_40_share = share(&sorted[..bottom_40_idx]);
        let middle_50_share = share(&sorted[bottom_40_idx..top_10_idx]);

        let (status, recommendation) = self.classify(gini, top_10_share);

        EarningsDistribution {
            gini_coefficient: gini,
            top_10_pct_share: round_four(top_10_share),
            middle_50_pct_share: round_four(middle_50_share),
            bottom_40_pct_share: round_four(bottom_40_share),
            status,
            recommendation,
        }
    }

    fn classify(&self, gini: f64, top_10_share: f64) -> (FairnessStatus, Option<String>) {
        let t = &self.thresholds;

        if t.healthy_low <= gini && gini <= t.healthy_high {
            return (FairnessStatus::Healthy, None);
        }

        if gini < t.healthy_low {
            return (
                FairnessStatus::Watch,
                Some(
                    "Earnings distribution is very flat. Top performers may not feel \
                     sufficiently rewarded. Consider increasing tier differentiation."
                        .to_string(),
                ),
            );
        }

        if gini <= t.watch_high {
            return (
                FairnessStatus::Watch,
                Some(
                    "Earnings are beginning to concentrate. Monitor which categories \
                     and markets are driving concentration. Consider increasing matching \
                     diversity weight."
                        .to_string(),
                ),
            );
        }

        if gini <= t.warning_high {
            return (
                FairnessStatus::Warning,
                Some(format!(
                    "Significant earnings concentration detected. Introduce 'new provider' \
                     boost in matching. Review if specific providers are monopolizing categories. \
                     Top 10% earning {:.0}% of GMV.",
                    top_10_share * 100.0
                )),
            );
        }

        (
            FairnessStatus::Critical,
            Some(format!(
                "Extreme earnings concentration. Most providers are likely not earning \
                 enough to stay engaged. Active intervention required: reduce max concurrent \
                 for top earners, increase matching radius, review tier criteria. \
                 Top 10% earning {:.0}% of GMV.",
                top_10_share * 100.0
            )),
        )
    }
}

impl Default for FairnessAnalyzer {
    fn default() -> Self {
        Self {
            thresholds: GiniThresholds::default(),
        }
    }
}

fn round_four(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
