use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::matching::ProviderId;

/// The credential categories a provider is screened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    Identity,
    CriminalBackground,
    TradeLicense,
    BusinessLicense,
    #[serde(rename = "general_liability_insurance")]
    GeneralLiability,
    #[serde(rename = "workers_comp_insurance")]
    WorkersComp,
}

/// Where a single check stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pending,
    InProgress,
    Passed,
    Failed,
    Expired,
    RequiresManualReview,
}

/// Outcome record for one verification check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationCheck {
    pub check_type: CheckType,
    pub status: CheckStatus,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub vendor_ref_id: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl VerificationCheck {
    pub(crate) fn new(check_type: CheckType, status: CheckStatus) -> Self {
        Self {
            check_type,
            status,
            vendor: None,
            vendor_ref_id: None,
            document_number: None,
            expires_at: None,
            failure_reason: None,
        }
    }

    pub(crate) fn failed(check_type: CheckType, reason: impl Into<String>) -> Self {
        Self {
            failure_reason: Some(reason.into()),
            ..Self::new(check_type, CheckStatus::Failed)
        }
    }
}

/// Documents uploaded with a provider application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderDocuments {
    #[serde(default)]
    pub government_id: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub license_state: Option<String>,
    /// Storage reference for the ACORD certificate, already extracted by
    /// the document vendor.
    #[serde(default)]
    pub insurance_certificate: Option<InsuranceCertificate>,
}

/// Fields extracted from an ACORD 25/28 certificate of insurance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceCertificate {
    pub carrier: String,
    pub policy_number: String,
    /// General liability per-occurrence coverage, whole dollars.
    pub gl_per_occurrence: u64,
    pub gl_aggregate: u64,
    pub named_insured: String,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

/// Outcome of a completed background screening report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportResult {
    /// No records found.
    Clear,
    /// Records found; evaluate against the trust policy.
    Consider,
}

/// One record surfaced by the screening vendor, pre-classified into the
/// categories the trust policy speaks in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffenseRecord {
    pub category: OffenseCategory,
    #[serde(default)]
    pub years_since: Option<u8>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffenseCategory {
    FelonyViolence,
    SexOffense,
    FelonyFraud,
    ActiveWarrant,
    Other,
}

/// Webhook payload for a completed background report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundReport {
    pub report_id: String,
    pub result: ReportResult,
    #[serde(default)]
    pub records: Vec<OffenseRecord>,
}

/// Assembled verification state for a provider application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub provider_id: ProviderId,
    pub checks: Vec<VerificationCheck>,
    pub all_passed: bool,
    /// Passed or still in flight, with nothing blocking: the application
    /// can sit in the operator review queue while async checks finish.
    pub ready_for_operator_review: bool,
    pub blocking_failures: Vec<String>,
}
