//! Escrow fee mathematics and payment lifecycle orchestration.
//!
//! The platform is merchant of record: a customer's card is authorized when
//! they accept a bid and only captured once the job is confirmed complete.
//! This module computes every fee component and drives the lifecycle
//! through an injected [`PaymentGateway`]; actual fund movement stays with
//! the processor.

pub mod escrow;
pub mod fees;

pub use escrow::{
    EscrowAuthorization, EscrowHold, EscrowService, EscrowStatus, GatewayReceipt, PaymentError,
    PaymentGateway, PayoutSummary,
};
pub use fees::{FeeBreakdown, FeeSchedule, PlatformEconomics};
