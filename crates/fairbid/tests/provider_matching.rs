use std::collections::BTreeSet;
use std::sync::Arc;

use fairbid::matching::{
    CandidateProvider, CandidateSource, MatchingConfig, MatchingEngine, ProviderId, ProviderTier,
    RequestId, ServiceRequest, SpatialError,
};

/// Stand-in for the geo-indexed store: serves a fixed pool, honoring the
/// request radius against each candidate's distance.
struct StaticPool {
    pool: Vec<CandidateProvider>,
}

impl CandidateSource for StaticPool {
    fn find_candidates(
        &self,
        request: &ServiceRequest,
    ) -> Result<Vec<CandidateProvider>, SpatialError> {
        Ok(self
            .pool
            .iter()
            .filter(|candidate| candidate.distance_miles <= request.matching_radius_miles as f64)
            .cloned()
            .collect())
    }
}

fn provider(
    id: &str,
    tier: ProviderTier,
    rating: Option<f64>,
    minutes: Option<u32>,
    distance: f64,
) -> CandidateProvider {
    CandidateProvider {
        provider_id: ProviderId(id.to_string()),
        business_name: format!("{id} LLC"),
        tier,
        composite_rating: rating,
        completion_rate: Some(0.92),
        avg_response_minutes: minutes,
        distance_miles: distance,
        available_capacity: 3,
        last_active_at: None,
    }
}

fn request(radius: u32) -> ServiceRequest {
    ServiceRequest {
        id: RequestId("req-3377".to_string()),
        category_id: "electrical".to_string(),
        latitude: 41.6611,
        longitude: -91.5302,
        preferred_date_start: None,
        preferred_date_end: None,
        matching_radius_miles: radius,
    }
}

fn engine(pool: Vec<CandidateProvider>) -> MatchingEngine<StaticPool> {
    MatchingEngine::new(Arc::new(StaticPool { pool }), MatchingConfig::default())
        .expect("default matching config is valid")
}

#[test]
fn notification_list_prefers_stronger_providers() {
    let engine = engine(vec![
        provider("prov-new", ProviderTier::Standard, None, None, 3.0),
        provider("prov-vet", ProviderTier::Elite, Some(4.9), Some(25), 8.0),
        provider("prov-slow", ProviderTier::Standard, Some(3.0), Some(900), 5.0),
    ]);

    let matches = engine.match_providers(&request(25)).expect("pool responds");

    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].provider_id, ProviderId("prov-vet".to_string()));
    // The unproven provider's neutral fallbacks beat the slow responder.
    assert_eq!(matches[1].provider_id, ProviderId("prov-new".to_string()));
    assert!(matches[0].match_score > matches[1].match_score);
    assert!(matches[1].match_score > matches[2].match_score);
}

#[test]
fn scores_round_to_four_decimals() {
    let engine = engine(vec![provider(
        "prov-a",
        ProviderTier::Preferred,
        Some(4.3),
        Some(100),
        2.0,
    )]);

    let matches = engine.match_providers(&request(25)).expect("pool responds");
    let score = matches[0].match_score;
    assert_eq!(score, (score * 10_000.0).round() / 10_000.0);
}

#[test]
fn rematch_reaches_past_the_original_radius() {
    let engine = engine(vec![
        provider("prov-inside", ProviderTier::Standard, Some(4.1), Some(120), 10.0),
        provider("prov-fringe", ProviderTier::Elite, Some(4.8), Some(30), 32.0),
    ]);
    let request = request(25);

    let first = engine.match_providers(&request).expect("pool responds");
    assert_eq!(first.len(), 1);

    let notified: BTreeSet<ProviderId> = first
        .iter()
        .map(|matched| matched.provider_id.clone())
        .collect();
    let second = engine.rematch(&request, &notified).expect("pool responds");

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].provider_id, ProviderId("prov-fringe".to_string()));
}

#[test]
fn rematch_with_no_exclusions_still_caps_at_the_default_limit() {
    let pool: Vec<CandidateProvider> = (0..30)
        .map(|i| {
            provider(
                &format!("prov-{i:02}"),
                ProviderTier::Standard,
                Some(3.5 + 0.05 * (i % 20) as f64),
                Some(90),
                1.0 + i as f64,
            )
        })
        .collect();
    let engine = engine(pool);

    let matches = engine
        .rematch(&request(25), &BTreeSet::new())
        .expect("pool responds");
    assert_eq!(matches.len(), 10);
}

#[test]
fn candidate_records_deserialize_from_the_spatial_payload() {
    let candidate: CandidateProvider = serde_json::from_str(
        r#"{
            "provider_id": "prov-771",
            "business_name": "River City Electric",
            "tier": "preferred",
            "composite_rating": 4.7,
            "completion_rate": 0.97,
            "avg_response_minutes": 42,
            "distance_miles": 6.3,
            "available_capacity": 2
        }"#,
    )
    .expect("payload parses");

    assert_eq!(candidate.tier, ProviderTier::Preferred);
    assert_eq!(candidate.last_active_at, None);

    let sparse: CandidateProvider = serde_json::from_str(
        r#"{
            "provider_id": "prov-772",
            "business_name": "Fresh Start Handyman",
            "distance_miles": 2.1,
            "available_capacity": 1
        }"#,
    )
    .expect("sparse payload parses");
    assert_eq!(sparse.tier, ProviderTier::Standard);
    assert_eq!(sparse.composite_rating, None);
}
