//! Provider verification decision logic.
//!
//! The checks themselves run at external vendors (background screening,
//! state licensing boards, certificate extraction); this module owns the
//! pure decisions around them: assembling check outcomes into a
//! verification result, classifying background reports against the trust
//! policy, validating insurance coverage, and the credential-expiry
//! reminder ladder consumed by the external scheduler.

pub mod credentials;
pub mod domain;
pub mod pipeline;
pub mod vendors;

pub use credentials::{ExpiringCredential, ExpiryEscalation, ReminderLadder};
pub use domain::{
    BackgroundReport, CheckStatus, CheckType, InsuranceCertificate, OffenseCategory,
    OffenseRecord, ProviderDocuments, ReportResult, VerificationCheck, VerificationResult,
};
pub use pipeline::{VerificationPipeline, VerificationPolicy};
pub use vendors::{BackgroundCheckVendor, LicenseRecord, LicenseRegistry, VendorError};
