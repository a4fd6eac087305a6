use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{
    BackgroundReport, CheckStatus, CheckType, InsuranceCertificate, OffenseCategory,
    ProviderDocuments, ReportResult, VerificationCheck, VerificationResult,
};
use super::vendors::{BackgroundCheckVendor, LicenseRegistry, VendorError};
use crate::matching::ProviderId;

/// Trust policy: what disqualifies outright, the coverage floor, and how
/// close to expiry a credential may sit before it is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationPolicy {
    /// Fraud/theft felonies older than this no longer auto-disqualify.
    pub fraud_lookback_years: u8,
    /// Minimum general liability per-occurrence coverage, whole dollars.
    pub gl_minimum_per_occurrence: u64,
    /// Credentials must outlive this horizon, in days.
    pub expiry_horizon_days: i64,
    /// States whose licensing board exposes a lookup API; everything else
    /// routes to manual verification.
    pub license_api_states: BTreeSet<String>,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        let license_api_states = [
            "AL", "AZ", "CA", "CO", "CT", "FL", "GA", "IL", "IN", "KY", "LA", "MA", "MD", "MI",
            "MN", "MO", "NC", "NJ", "NV", "NY", "OH", "OK", "OR", "PA", "SC", "TN", "TX", "UT",
            "VA", "WA", "WI", "WV", "DC", "HI",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            fraud_lookback_years: 7,
            gl_minimum_per_occurrence: 1_000_000,
            expiry_horizon_days: 30,
            license_api_states,
        }
    }
}

/// Orchestrates the verification checks for a new provider application and
/// folds their outcomes into a [`VerificationResult`].
pub struct VerificationPipeline<B, L> {
    background: Arc<B>,
    licenses: Arc<L>,
    policy: VerificationPolicy,
}

impl<B, L> VerificationPipeline<B, L>
where
    B: BackgroundCheckVendor + 'static,
    L: LicenseRegistry + 'static,
{
    pub fn new(background: Arc<B>, licenses: Arc<L>, policy: VerificationPolicy) -> Self {
        Self {
            background,
            licenses,
            policy,
        }
    }

    pub fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    /// Kick off every check for a new application. The background check is
    /// async and comes back as in-progress; license and insurance resolve
    /// immediately. Vendor transport failures propagate unchanged.
    pub fn start_verification(
        &self,
        provider_id: &ProviderId,
        documents: &ProviderDocuments,
        today: NaiveDate,
    ) -> Result<VerificationResult, VendorError> {
        let vendor_ref = self.background.initiate(provider_id)?;
        let background_check = VerificationCheck {
            vendor: Some("screening".to_string()),
            vendor_ref_id: Some(vendor_ref),
            ..VerificationCheck::new(CheckType::CriminalBackground, CheckStatus::InProgress)
        };

        let license_check = self.verify_license(
            documents.license_number.as_deref(),
            documents.license_state.as_deref(),
            today,
        )?;
        let insurance_check =
            self.verify_insurance(documents.insurance_certificate.as_ref(), today);

        let checks = vec![background_check, license_check, insurance_check];
        Ok(assemble(provider_id.clone(), checks))
    }

    /// License validation: automated where the state exposes a board API,
    /// manual review otherwise.
    pub fn verify_license(
        &self,
        license_number: Option<&str>,
        state: Option<&str>,
        today: NaiveDate,
    ) -> Result<VerificationCheck, VendorError> {
        let (license_number, state) = match (license_number, state) {
            (Some(number), Some(state)) if !number.is_empty() && !state.is_empty() => {
                (number, state)
            }
            _ => {
                return Ok(VerificationCheck::failed(
                    CheckType::TradeLicense,
                    "License number and state are required",
                ))
            }
        };

        let state_code = state.to_ascii_uppercase();
        if !self.policy.license_api_states.contains(&state_code) {
            return Ok(VerificationCheck {
                vendor: Some("manual".to_string()),
                document_number: Some(license_number.to_string()),
                failure_reason: Some(format!(
                    "No API available for {state_code}. Manual verification required."
                )),
                ..VerificationCheck::new(CheckType::TradeLicense, CheckStatus::RequiresManualReview)
            });
        }

        let record = self.licenses.lookup(license_number, &state_code)?;
        let check = if !record.active {
            VerificationCheck::failed(
                CheckType::TradeLicense,
                format!("License {} is not active", record.license_number),
            )
        } else if record.expires_at < today + Duration::days(self.policy.expiry_horizon_days) {
            VerificationCheck {
                expires_at: Some(record.expires_at),
                ..VerificationCheck::failed(
                    CheckType::TradeLicense,
                    format!(
                        "License expires within {} days. Renewal required before approval.",
                        self.policy.expiry_horizon_days
                    ),
                )
            }
        } else {
            VerificationCheck {
                document_number: Some(record.license_number.clone()),
                expires_at: Some(record.expires_at),
                ..VerificationCheck::new(CheckType::TradeLicense, CheckStatus::Passed)
            }
        };

        Ok(VerificationCheck {
            vendor: Some("state_api".to_string()),
            ..check
        })
    }

    /// Validate an extracted certificate against the coverage floor and the
    /// expiry horizon.
    pub fn verify_insurance(
        &self,
        certificate: Option<&InsuranceCertificate>,
        today: NaiveDate,
    ) -> VerificationCheck {
        let Some(certificate) = certificate else {
            return VerificationCheck::failed(
                CheckType::GeneralLiability,
                "Insurance certificate is required",
            );
        };

        if certificate.gl_per_occurrence < self.policy.gl_minimum_per_occurrence {
            return VerificationCheck::failed(
                CheckType::GeneralLiability,
                format!(
                    "General liability coverage ${} is below minimum ${}",
                    certificate.gl_per_occurrence, self.policy.gl_minimum_per_occurrence
                ),
            );
        }

        if certificate.expiration_date < today + Duration::days(self.policy.expiry_horizon_days) {
            return VerificationCheck {
                expires_at: Some(certificate.expiration_date),
                ..VerificationCheck::failed(
                    CheckType::GeneralLiability,
                    format!(
                        "Insurance expires within {} days. Please upload renewed certificate.",
                        self.policy.expiry_horizon_days
                    ),
                )
            };
        }

        VerificationCheck {
            document_number: Some(certificate.policy_number.clone()),
            expires_at: Some(certificate.expiration_date),
            ..VerificationCheck::new(CheckType::GeneralLiability, CheckStatus::Passed)
        }
    }

    /// Classify a completed background report against the trust policy.
    ///
    /// A clear report passes. Records found: any auto-disqualifying offense
    /// fails outright; anything else routes to individualized operator
    /// assessment rather than a blanket denial.
    pub fn evaluate_background_report(&self, report: &BackgroundReport) -> VerificationCheck {
        let stamp = |check: VerificationCheck| VerificationCheck {
            vendor: Some("screening".to_string()),
            vendor_ref_id: Some(report.report_id.clone()),
            ..check
        };

        if report.result == ReportResult::Clear {
            return stamp(VerificationCheck::new(
                CheckType::CriminalBackground,
                CheckStatus::Passed,
            ));
        }

        for record in &report.records {
            if self.is_auto_disqualifying(record.category, record.years_since) {
                return stamp(VerificationCheck::failed(
                    CheckType::CriminalBackground,
                    format!("Background check: {}", record.description),
                ));
            }
        }

        stamp(VerificationCheck {
            failure_reason: Some(
                "Background check requires individualized assessment".to_string(),
            ),
            ..VerificationCheck::new(
                CheckType::CriminalBackground,
                CheckStatus::RequiresManualReview,
            )
        })
    }

    fn is_auto_disqualifying(&self, category: OffenseCategory, years_since: Option<u8>) -> bool {
        match category {
            OffenseCategory::FelonyViolence
            | OffenseCategory::SexOffense
            | OffenseCategory::ActiveWarrant => true,
            OffenseCategory::FelonyFraud => years_since
                .map(|years| years <= self.policy.fraud_lookback_years)
                .unwrap_or(true),
            OffenseCategory::Other => false,
        }
    }
}

/// Fold check outcomes into the application-level verdict.
fn assemble(provider_id: ProviderId, checks: Vec<VerificationCheck>) -> VerificationResult {
    let all_passed = checks.iter().all(|check| check.status == CheckStatus::Passed);
    let blocking_failures: Vec<String> = checks
        .iter()
        .filter(|check| check.status == CheckStatus::Failed)
        .filter_map(|check| check.failure_reason.clone())
        .collect();
    let ready = checks
        .iter()
        .all(|check| matches!(check.status, CheckStatus::Passed | CheckStatus::InProgress));

    VerificationResult {
        provider_id,
        checks,
        all_passed,
        ready_for_operator_review: ready && blocking_failures.is_empty(),
        blocking_failures,
    }
}
