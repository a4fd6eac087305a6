//! Credential-expiry monitoring.
//!
//! The scheduler polls daily for credentials nearing expiry; this module
//! owns the pure escalation ladder it applies to each one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{CheckType, VerificationCheck};
use crate::matching::ProviderId;

/// Day thresholds for the reminder ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderLadder {
    /// First email reminder, days before expiry.
    pub email_days: i64,
    /// Email + SMS + in-app alert, days before expiry.
    pub multi_channel_days: i64,
    /// Email + SMS + push + operator alert, days before expiry.
    pub operator_days: i64,
    /// Days past expiry before the account is suspended.
    pub grace_days: i64,
}

impl Default for ReminderLadder {
    fn default() -> Self {
        Self {
            email_days: 30,
            multi_channel_days: 14,
            operator_days: 7,
            grace_days: 14,
        }
    }
}

/// Escalation step for a credential, most urgent tier that applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryEscalation {
    /// Email reminder.
    EmailReminder,
    /// Email + SMS + in-app alert.
    MultiChannelReminder,
    /// Email + SMS + push + operator alert.
    OperatorAlert,
    /// Expired; grace period running.
    GracePeriod,
    /// Grace period exhausted; suspend the account.
    AutoSuspend,
}

/// A credential inside the reminder window, with its escalation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringCredential {
    pub provider_id: ProviderId,
    pub check_type: CheckType,
    pub expires_at: NaiveDate,
    pub days_until_expiry: i64,
    pub escalation: ExpiryEscalation,
}

impl ReminderLadder {
    /// Escalation step for a credential expiring on `expires_at`, or `None`
    /// while it is still outside the reminder window.
    pub fn escalation(&self, expires_at: NaiveDate, today: NaiveDate) -> Option<ExpiryEscalation> {
        let days_until = (expires_at - today).num_days();

        if days_until <= -self.grace_days {
            Some(ExpiryEscalation::AutoSuspend)
        } else if days_until <= 0 {
            Some(ExpiryEscalation::GracePeriod)
        } else if days_until <= self.operator_days {
            Some(ExpiryEscalation::OperatorAlert)
        } else if days_until <= self.multi_channel_days {
            Some(ExpiryEscalation::MultiChannelReminder)
        } else if days_until <= self.email_days {
            Some(ExpiryEscalation::EmailReminder)
        } else {
            None
        }
    }

    /// Apply the ladder across materialized credential rows, keeping the
    /// ones that need attention ordered soonest-expiry first.
    pub fn expiring_credentials(
        &self,
        checks: &[(ProviderId, VerificationCheck)],
        today: NaiveDate,
    ) -> Vec<ExpiringCredential> {
        let mut due: Vec<ExpiringCredential> = checks
            .iter()
            .filter_map(|(provider_id, check)| {
                let expires_at = check.expires_at?;
                let escalation = self.escalation(expires_at, today)?;
                Some(ExpiringCredential {
                    provider_id: provider_id.clone(),
                    check_type: check.check_type,
                    expires_at,
                    days_until_expiry: (expires_at - today).num_days(),
                    escalation,
                })
            })
            .collect();
        due.sort_by_key(|credential| credential.expires_at);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::domain::CheckStatus;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date") + chrono::Duration::days(offset)
    }

    #[test]
    fn ladder_escalates_as_expiry_approaches() {
        let ladder = ReminderLadder::default();
        let today = day(0);

        assert_eq!(ladder.escalation(day(45), today), None);
        assert_eq!(
            ladder.escalation(day(30), today),
            Some(ExpiryEscalation::EmailReminder)
        );
        assert_eq!(
            ladder.escalation(day(14), today),
            Some(ExpiryEscalation::MultiChannelReminder)
        );
        assert_eq!(
            ladder.escalation(day(7), today),
            Some(ExpiryEscalation::OperatorAlert)
        );
        assert_eq!(
            ladder.escalation(day(0), today),
            Some(ExpiryEscalation::GracePeriod)
        );
        assert_eq!(
            ladder.escalation(day(-13), today),
            Some(ExpiryEscalation::GracePeriod)
        );
        assert_eq!(
            ladder.escalation(day(-14), today),
            Some(ExpiryEscalation::AutoSuspend)
        );
    }

    #[test]
    fn rows_outside_the_window_are_dropped_and_rest_sorted() {
        let ladder = ReminderLadder::default();
        let check = |expires: NaiveDate| VerificationCheck {
            expires_at: Some(expires),
            ..VerificationCheck::new(CheckType::TradeLicense, CheckStatus::Passed)
        };

        let rows = vec![
            (ProviderId("prov-far".to_string()), check(day(120))),
            (ProviderId("prov-soon".to_string()), check(day(5))),
            (ProviderId("prov-later".to_string()), check(day(25))),
            (
                ProviderId("prov-undated".to_string()),
                VerificationCheck::new(CheckType::Identity, CheckStatus::Passed),
            ),
        ];

        let due = ladder.expiring_credentials(&rows, day(0));
        let ids: Vec<&str> = due
            .iter()
            .map(|credential| credential.provider_id.0.as_str())
            .collect();
        assert_eq!(ids, vec!["prov-soon", "prov-later"]);
        assert_eq!(due[0].escalation, ExpiryEscalation::OperatorAlert);
        assert_eq!(due[1].escalation, ExpiryEscalation::EmailReminder);
        assert_eq!(due[0].days_until_expiry, 5);
    }
}
