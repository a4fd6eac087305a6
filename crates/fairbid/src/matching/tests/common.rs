use std::sync::Arc;

use crate::matching::config::MatchingConfig;
use crate::matching::domain::{
    CandidateProvider, ProviderId, ProviderTier, RequestId, ServiceRequest,
};
use crate::matching::service::MatchingEngine;
use crate::matching::spatial::{CandidateSource, SpatialError};

/// Fixture source standing in for the spatial store: hands back its seeded
/// candidates whenever the request radius is wide enough to "see" them.
pub(super) struct FixtureSource {
    pub(super) candidates: Vec<(u32, CandidateProvider)>,
}

impl CandidateSource for FixtureSource {
    fn find_candidates(
        &self,
        request: &ServiceRequest,
    ) -> Result<Vec<CandidateProvider>, SpatialError> {
        Ok(self
            .candidates
            .iter()
            .filter(|(min_radius, _)| request.matching_radius_miles >= *min_radius)
            .map(|(_, candidate)| candidate.clone())
            .collect())
    }
}

/// Source that always fails, for error-propagation tests.
pub(super) struct OfflineSource;

impl CandidateSource for OfflineSource {
    fn find_candidates(
        &self,
        _request: &ServiceRequest,
    ) -> Result<Vec<CandidateProvider>, SpatialError> {
        Err(SpatialError::Unavailable("index rebuilding".to_string()))
    }
}

pub(super) fn request() -> ServiceRequest {
    ServiceRequest {
        id: RequestId("req-1001".to_string()),
        category_id: "plumbing".to_string(),
        latitude: 41.5868,
        longitude: -93.6250,
        preferred_date_start: None,
        preferred_date_end: None,
        matching_radius_miles: 25,
    }
}

pub(super) fn candidate(id: &str, rating: f64, distance_miles: f64) -> CandidateProvider {
    CandidateProvider {
        provider_id: ProviderId(id.to_string()),
        business_name: format!("Business {id}"),
        tier: ProviderTier::Standard,
        composite_rating: Some(rating),
        completion_rate: Some(0.9),
        avg_response_minutes: Some(45),
        distance_miles,
        available_capacity: 1,
        last_active_at: None,
    }
}

pub(super) fn engine(
    candidates: Vec<(u32, CandidateProvider)>,
) -> MatchingEngine<FixtureSource> {
    MatchingEngine::new(
        Arc::new(FixtureSource { candidates }),
        MatchingConfig::default(),
    )
    .expect("default matching config is valid")
}
