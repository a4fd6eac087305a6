use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::fees::{FeeBreakdown, FeeSchedule};
use crate::config::InvalidConfig;
use crate::matching::{ProviderId, ProviderTier};

/// Lifecycle of a held payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowStatus {
    Pending,
    EscrowHeld,
    Captured,
    Refunded,
    PartiallyRefunded,
    Failed,
}

impl EscrowStatus {
    pub const fn label(self) -> &'static str {
        match self {
            EscrowStatus::Pending => "pending",
            EscrowStatus::EscrowHeld => "escrow_held",
            EscrowStatus::Captured => "captured",
            EscrowStatus::Refunded => "refunded",
            EscrowStatus::PartiallyRefunded => "partially_refunded",
            EscrowStatus::Failed => "failed",
        }
    }
}

/// A funds hold created when a customer accepts a bid: the authorization
/// reference, the full fee breakdown, and where the hold stands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscrowHold {
    pub payment_intent_id: String,
    pub transfer_id: Option<String>,
    pub bid_id: String,
    pub fees: FeeBreakdown,
    pub status: EscrowStatus,
}

/// Provider earnings view for their dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutSummary {
    pub provider_id: ProviderId,
    /// Lifetime captured payments, cents.
    pub total_earned_cents: u64,
    /// Captured but not yet deposited, cents.
    pub pending_payout_cents: u64,
    /// Authorized but not yet captured, cents.
    pub in_escrow_cents: u64,
    pub completed_payments: u32,
}

/// What the gateway needs to place a manual-capture authorization: the
/// charge total, the platform's cut, and the two accounts involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowAuthorization {
    pub bid_id: String,
    pub customer_account: String,
    pub provider_account: String,
    pub amount_total_cents: u64,
    pub application_fee_cents: u64,
}

/// Reference returned by the processor for an accepted instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReceipt {
    pub payment_intent_id: String,
    pub transfer_id: Option<String>,
}

/// Failure surfaced by the payment processor.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),
    #[error("payment processor unavailable: {0}")]
    Unavailable(String),
    #[error("unknown payment intent: {0}")]
    UnknownIntent(String),
    #[error("refund of {refund_cents} cents exceeds held amount of {held_cents} cents")]
    RefundExceedsHold { refund_cents: u64, held_cents: u64 },
}

/// Fund movement, owned by the external processor. Authorize places a
/// manual-capture hold (the escrow); capture charges it; cancel releases
/// it; refund reverses a captured charge.
pub trait PaymentGateway: Send + Sync {
    fn authorize(&self, authorization: EscrowAuthorization) -> Result<GatewayReceipt, PaymentError>;
    fn capture(&self, payment_intent_id: &str) -> Result<GatewayReceipt, PaymentError>;
    fn capture_partial(
        &self,
        payment_intent_id: &str,
        amount_cents: u64,
    ) -> Result<GatewayReceipt, PaymentError>;
    fn cancel(&self, payment_intent_id: &str) -> Result<(), PaymentError>;
    fn balance(&self, provider_account: &str) -> Result<PayoutSummary, PaymentError>;
}

/// Composes the fee schedule with the gateway to run the escrow flow:
/// hold on bid acceptance, capture on confirmed completion, full or partial
/// refund on dispute resolution.
pub struct EscrowService<G> {
    gateway: Arc<G>,
    fees: FeeSchedule,
}

impl<G> EscrowService<G>
where
    G: PaymentGateway + 'static,
{
    pub fn new(gateway: Arc<G>, fees: FeeSchedule) -> Result<Self, InvalidConfig> {
        fees.validate()?;
        Ok(Self { gateway, fees })
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Authorize the customer's card for the bid plus fees without
    /// charging it. The hold stands until completion or dispute resolution.
    pub fn create_escrow(
        &self,
        bid_id: &str,
        bid_amount_cents: u64,
        customer_account: &str,
        provider_account: &str,
        provider_tier: ProviderTier,
    ) -> Result<EscrowHold, PaymentError> {
        let fees = self.fees.breakdown(bid_amount_cents, provider_tier);
        let receipt = self.gateway.authorize(EscrowAuthorization {
            bid_id: bid_id.to_string(),
            customer_account: customer_account.to_string(),
            provider_account: provider_account.to_string(),
            amount_total_cents: fees.amount_total_cents,
            application_fee_cents: fees.application_fee_cents,
        })?;

        Ok(EscrowHold {
            payment_intent_id: receipt.payment_intent_id,
            transfer_id: receipt.transfer_id,
            bid_id: bid_id.to_string(),
            fees,
            status: EscrowStatus::EscrowHeld,
        })
    }

    /// Charge the held amount once the customer confirms completion. The
    /// provider payout is scheduled by the processor from here.
    pub fn capture(&self, hold: &EscrowHold) -> Result<EscrowHold, PaymentError> {
        let receipt = self.gateway.capture(&hold.payment_intent_id)?;
        Ok(EscrowHold {
            transfer_id: receipt.transfer_id,
            status: EscrowStatus::Captured,
            ..hold.clone()
        })
    }

    /// Release the hold entirely: the customer is never charged and the
    /// provider receives nothing. Used for no-shows, pre-work
    /// cancellations, and disputes resolved for the customer.
    pub fn refund_full(&self, hold: &EscrowHold) -> Result<EscrowHold, PaymentError> {
        self.gateway.cancel(&hold.payment_intent_id)?;
        Ok(EscrowHold {
            status: EscrowStatus::Refunded,
            ..hold.clone()
        })
    }

    /// Capture a reduced amount when the operator rules a partial refund,
    /// e.g. work 60% complete: capture 60%, release the rest.
    pub fn refund_partial(
        &self,
        hold: &EscrowHold,
        refund_amount_cents: u64,
    ) -> Result<EscrowHold, PaymentError> {
        let held_cents = hold.fees.amount_total_cents;
        if refund_amount_cents > held_cents {
            return Err(PaymentError::RefundExceedsHold {
                refund_cents: refund_amount_cents,
                held_cents,
            });
        }

        let receipt = self
            .gateway
            .capture_partial(&hold.payment_intent_id, held_cents - refund_amount_cents)?;
        Ok(EscrowHold {
            transfer_id: receipt.transfer_id,
            status: EscrowStatus::PartiallyRefunded,
            ..hold.clone()
        })
    }

    /// Provider earnings summary straight from the processor's books.
    pub fn provider_earnings(&self, provider_account: &str) -> Result<PayoutSummary, PaymentError> {
        self.gateway.balance(provider_account)
    }
}
