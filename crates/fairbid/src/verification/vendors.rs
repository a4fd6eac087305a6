use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::matching::ProviderId;

/// Failure surfaced by a verification vendor.
#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    #[error("vendor unavailable: {0}")]
    Unavailable(String),
    #[error("vendor rejected the request: {0}")]
    Rejected(String),
}

/// Identity and criminal screening vendor. Initiation is synchronous; the
/// report itself arrives later through a webhook carrying a
/// [`BackgroundReport`](super::domain::BackgroundReport).
pub trait BackgroundCheckVendor: Send + Sync {
    /// Create the candidate and invitation; returns the vendor's reference
    /// id for correlating the eventual report.
    fn initiate(&self, provider_id: &ProviderId) -> Result<String, VendorError>;
}

/// State licensing board record for a trade license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseRecord {
    pub license_number: String,
    /// Not revoked, suspended, or lapsed.
    pub active: bool,
    pub expires_at: NaiveDate,
}

/// Automated licensing board lookup for the states that expose one.
pub trait LicenseRegistry: Send + Sync {
    fn lookup(&self, license_number: &str, state: &str) -> Result<LicenseRecord, VendorError>;
}
