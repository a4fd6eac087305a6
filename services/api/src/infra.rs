use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use fairbid::matching::{CandidateProvider, CandidateSource, ServiceRequest, SpatialError};
use fairbid::payments::{
    EscrowAuthorization, GatewayReceipt, PaymentError, PaymentGateway, PayoutSummary,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Candidate source backed by records supplied with the request (or seeded
/// for a demo). Production traffic hits the geo-indexed store instead; this
/// keeps the same radius contract so the engine behaves identically.
pub(crate) struct InMemoryCandidateSource {
    candidates: Vec<CandidateProvider>,
}

impl InMemoryCandidateSource {
    pub(crate) fn new(candidates: Vec<CandidateProvider>) -> Self {
        Self { candidates }
    }
}

impl CandidateSource for InMemoryCandidateSource {
    fn find_candidates(
        &self,
        request: &ServiceRequest,
    ) -> Result<Vec<CandidateProvider>, SpatialError> {
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| candidate.distance_miles <= request.matching_radius_miles as f64)
            .cloned()
            .collect())
    }
}

/// Gateway double for demos: accepts every instruction and invents
/// processor references.
#[derive(Default)]
pub(crate) struct InMemoryPaymentGateway {
    captured: Mutex<u32>,
}

impl PaymentGateway for InMemoryPaymentGateway {
    fn authorize(&self, authorization: EscrowAuthorization) -> Result<GatewayReceipt, PaymentError> {
        Ok(GatewayReceipt {
            payment_intent_id: format!("pi_demo_{}", authorization.bid_id),
            transfer_id: None,
        })
    }

    fn capture(&self, payment_intent_id: &str) -> Result<GatewayReceipt, PaymentError> {
        *self.captured.lock().expect("gateway mutex poisoned") += 1;
        Ok(GatewayReceipt {
            payment_intent_id: payment_intent_id.to_string(),
            transfer_id: Some(format!("tr_demo_{payment_intent_id}")),
        })
    }

    fn capture_partial(
        &self,
        payment_intent_id: &str,
        _amount_cents: u64,
    ) -> Result<GatewayReceipt, PaymentError> {
        Ok(GatewayReceipt {
            payment_intent_id: payment_intent_id.to_string(),
            transfer_id: Some(format!("tr_demo_{payment_intent_id}")),
        })
    }

    fn cancel(&self, _payment_intent_id: &str) -> Result<(), PaymentError> {
        Ok(())
    }

    fn balance(&self, provider_account: &str) -> Result<PayoutSummary, PaymentError> {
        Ok(PayoutSummary {
            provider_id: fairbid::matching::ProviderId(provider_account.to_string()),
            total_earned_cents: 0,
            pending_payout_cents: 0,
            in_escrow_cents: 0,
            completed_payments: *self.captured.lock().expect("gateway mutex poisoned"),
        })
    }
}
