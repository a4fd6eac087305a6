use serde::{Deserialize, Serialize};

use crate::config::{check_rate, InvalidConfig};
use crate::matching::ProviderTier;

/// Fee rates for a transaction. The customer fee is added on top of the
/// bid; the platform fee comes out of the provider payout, discounted for
/// Elite tier. Processor costs are absorbed by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub customer_fee_rate: f64,
    pub standard_provider_fee_rate: f64,
    pub elite_provider_fee_rate: f64,
    pub processor_rate: f64,
    pub processor_fixed_cents: u64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            customer_fee_rate: 0.05,
            standard_provider_fee_rate: 0.15,
            elite_provider_fee_rate: 0.12,
            processor_rate: 0.029,
            processor_fixed_cents: 30,
        }
    }
}

impl FeeSchedule {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        check_rate("customer fee rate", self.customer_fee_rate)?;
        check_rate("standard provider fee rate", self.standard_provider_fee_rate)?;
        check_rate("elite provider fee rate", self.elite_provider_fee_rate)?;
        check_rate("processor rate", self.processor_rate)?;
        if self.elite_provider_fee_rate > self.standard_provider_fee_rate {
            return Err(InvalidConfig::InvertedBounds {
                context: "elite fee rate above standard",
                lower: self.standard_provider_fee_rate,
                upper: self.elite_provider_fee_rate,
            });
        }
        Ok(())
    }

    /// Elite providers keep a larger cut; Preferred pays the standard rate.
    pub fn provider_fee_rate(&self, tier: ProviderTier) -> f64 {
        match tier {
            ProviderTier::Elite => self.elite_provider_fee_rate,
            ProviderTier::Preferred | ProviderTier::Standard => self.standard_provider_fee_rate,
        }
    }

    /// Every fee component for one bid, in integer cents (fractions
    /// truncate toward the payer, matching the ledger).
    ///
    /// Example, $1,000 bid from a Standard provider: customer pays $1,050,
    /// the platform retains $200 ($50 customer fee + $150 provider fee),
    /// the provider receives $850.
    pub fn breakdown(&self, bid_amount_cents: u64, tier: ProviderTier) -> FeeBreakdown {
        let customer_fee_cents = (bid_amount_cents as f64 * self.customer_fee_rate) as u64;
        let amount_total_cents = bid_amount_cents + customer_fee_cents;

        let platform_fee_cents = (bid_amount_cents as f64 * self.provider_fee_rate(tier)) as u64;
        let provider_payout_cents = bid_amount_cents - platform_fee_cents;

        FeeBreakdown {
            bid_amount_cents,
            customer_fee_cents,
            amount_total_cents,
            platform_fee_cents,
            provider_payout_cents,
            application_fee_cents: customer_fee_cents + platform_fee_cents,
        }
    }

    /// Full economic picture of one transaction, processor costs included.
    /// Used for financial reporting and unit-economics analysis.
    pub fn economics(&self, bid_amount_cents: u64, tier: ProviderTier) -> PlatformEconomics {
        let breakdown = self.breakdown(bid_amount_cents, tier);

        let gross_platform_revenue_cents = breakdown.application_fee_cents;
        let processor_fee_cents = (breakdown.amount_total_cents as f64 * self.processor_rate)
            as u64
            + self.processor_fixed_cents;
        let net_platform_revenue_cents =
            gross_platform_revenue_cents as i64 - processor_fee_cents as i64;

        let effective_take_rate = if bid_amount_cents == 0 {
            0.0
        } else {
            round_four(net_platform_revenue_cents as f64 / bid_amount_cents as f64)
        };

        PlatformEconomics {
            breakdown,
            gross_platform_revenue_cents,
            processor_fee_cents,
            net_platform_revenue_cents,
            effective_take_rate,
            provider_fee_rate: self.provider_fee_rate(tier),
            tier,
        }
    }
}

/// Integer-cent fee components for one bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub bid_amount_cents: u64,
    pub customer_fee_cents: u64,
    /// What the customer's card is authorized for.
    pub amount_total_cents: u64,
    /// The provider-side platform fee.
    pub platform_fee_cents: u64,
    pub provider_payout_cents: u64,
    /// What the platform retains: customer fee plus provider fee.
    pub application_fee_cents: u64,
}

/// Unit economics of a transaction after processor costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformEconomics {
    #[serde(flatten)]
    pub breakdown: FeeBreakdown,
    pub gross_platform_revenue_cents: u64,
    pub processor_fee_cents: u64,
    /// Can go negative on very small bids; the fixed processor fee bites.
    pub net_platform_revenue_cents: i64,
    pub effective_take_rate: f64,
    pub provider_fee_rate: f64,
    pub tier: ProviderTier,
}

fn round_four(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tier_thousand_dollar_bid() {
        let schedule = FeeSchedule::default();
        let breakdown = schedule.breakdown(100_000, ProviderTier::Standard);

        assert_eq!(breakdown.customer_fee_cents, 5_000);
        assert_eq!(breakdown.amount_total_cents, 105_000);
        assert_eq!(breakdown.platform_fee_cents, 15_000);
        assert_eq!(breakdown.provider_payout_cents, 85_000);
        assert_eq!(breakdown.application_fee_cents, 20_000);
    }

    #[test]
    fn elite_tier_pays_the_discounted_fee() {
        let schedule = FeeSchedule::default();
        let breakdown = schedule.breakdown(100_000, ProviderTier::Elite);

        assert_eq!(breakdown.platform_fee_cents, 12_000);
        assert_eq!(breakdown.provider_payout_cents, 88_000);
    }

    #[test]
    fn preferred_tier_pays_the_standard_fee() {
        let schedule = FeeSchedule::default();
        let preferred = schedule.breakdown(100_000, ProviderTier::Preferred);
        let standard = schedule.breakdown(100_000, ProviderTier::Standard);
        assert_eq!(preferred, standard);
    }

    #[test]
    fn economics_nets_out_processor_costs() {
        let schedule = FeeSchedule::default();
        let economics = schedule.economics(100_000, ProviderTier::Standard);

        // 2.9% of $1,050 + 30 cents.
        assert_eq!(economics.processor_fee_cents, 3_075);
        assert_eq!(economics.gross_platform_revenue_cents, 20_000);
        assert_eq!(economics.net_platform_revenue_cents, 16_925);
        assert_eq!(economics.effective_take_rate, 0.1693);
        assert_eq!(economics.provider_fee_rate, 0.15);
    }

    #[test]
    fn tiny_bids_can_net_negative() {
        let schedule = FeeSchedule::default();
        let economics = schedule.economics(100, ProviderTier::Standard);
        assert!(economics.net_platform_revenue_cents < 0);
    }

    #[test]
    fn zero_bid_has_a_zero_take_rate() {
        let schedule = FeeSchedule::default();
        let economics = schedule.economics(0, ProviderTier::Standard);
        assert_eq!(economics.effective_take_rate, 0.0);
    }

    #[test]
    fn rejects_elite_rate_above_standard() {
        let schedule = FeeSchedule {
            elite_provider_fee_rate: 0.20,
            ..FeeSchedule::default()
        };
        assert!(matches!(
            schedule.validate(),
            Err(InvalidConfig::InvertedBounds { .. })
        ));
    }
}
