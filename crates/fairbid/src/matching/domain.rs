use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for providers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub String);

/// Identifier wrapper for service requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub String);

/// Provider standing level. Affects both the match weight and the platform
/// fee rate. Unrecognized tiers from upstream records fall back to
/// `Standard`, which carries the same score and fee treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderTier {
    Elite,
    Preferred,
    #[serde(other)]
    Standard,
}

impl ProviderTier {
    pub const fn label(self) -> &'static str {
        match self {
            ProviderTier::Elite => "elite",
            ProviderTier::Preferred => "preferred",
            ProviderTier::Standard => "standard",
        }
    }
}

impl Default for ProviderTier {
    fn default() -> Self {
        Self::Standard
    }
}

/// A customer's open job request: what they need, where, and how far out
/// the platform should look for providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub category_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub preferred_date_start: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub preferred_date_end: Option<chrono::NaiveDate>,
    #[serde(default = "default_radius_miles")]
    pub matching_radius_miles: u32,
}

fn default_radius_miles() -> u32 {
    25
}

impl ServiceRequest {
    /// Copy of this request with the search radius widened by `miles`.
    pub fn widened(&self, miles: u32) -> Self {
        Self {
            matching_radius_miles: self.matching_radius_miles + miles,
            ..self.clone()
        }
    }
}

/// Eligible provider record as returned by the spatial collaborator:
/// already filtered to verified, active providers with open capacity in the
/// request's category and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProvider {
    pub provider_id: ProviderId,
    pub business_name: String,
    #[serde(default)]
    pub tier: ProviderTier,
    /// Composite review rating on the 1-5 scale; new providers have none.
    #[serde(default)]
    pub composite_rating: Option<f64>,
    /// Fraction of accepted jobs completed, already in [0, 1].
    #[serde(default)]
    pub completion_rate: Option<f64>,
    #[serde(default)]
    pub avg_response_minutes: Option<u32>,
    pub distance_miles: f64,
    pub available_capacity: u32,
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
}

/// A candidate augmented with its computed match score. Produced fresh for
/// every request; nothing is shared between match runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedProvider {
    pub provider_id: ProviderId,
    pub business_name: String,
    pub tier: ProviderTier,
    pub composite_rating: Option<f64>,
    pub completion_rate: Option<f64>,
    pub avg_response_minutes: Option<u32>,
    pub distance_miles: f64,
    pub available_capacity: u32,
    pub match_score: f64,
}
