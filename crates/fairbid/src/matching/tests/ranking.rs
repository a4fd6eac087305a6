use std::collections::BTreeSet;
use std::sync::Arc;

use super::common::{candidate, engine, request, OfflineSource};
use crate::config::InvalidConfig;
use crate::matching::config::MatchingConfig;
use crate::matching::domain::ProviderId;
use crate::matching::service::MatchingEngine;
use crate::matching::spatial::SpatialError;

#[test]
fn results_are_ordered_by_score_and_capped() {
    let pool: Vec<_> = (0..15)
        .map(|i| (0, candidate(&format!("prov-{i:02}"), 3.0 + 0.1 * i as f64, 5.0)))
        .collect();
    let engine = engine(pool);

    let matches = engine.match_providers(&request()).expect("source is seeded");

    assert_eq!(matches.len(), 10);
    for pair in matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
    // Highest rating wins the top slot.
    assert_eq!(matches[0].provider_id, ProviderId("prov-14".to_string()));
}

#[test]
fn fewer_candidates_than_limit_returns_them_all() {
    let engine = engine(vec![
        (0, candidate("prov-a", 4.0, 3.0)),
        (0, candidate("prov-b", 4.5, 6.0)),
    ]);

    let matches = engine.match_providers(&request()).expect("source is seeded");
    assert_eq!(matches.len(), 2);
}

#[test]
fn equal_scores_break_ties_on_distance_then_id() {
    let engine = engine(vec![
        (0, candidate("prov-far", 4.0, 9.0)),
        (0, candidate("prov-near", 4.0, 2.0)),
        (0, candidate("prov-b", 4.0, 5.0)),
        (0, candidate("prov-a", 4.0, 5.0)),
    ]);

    let matches = engine.match_providers(&request()).expect("source is seeded");
    let ids: Vec<&str> = matches
        .iter()
        .map(|matched| matched.provider_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["prov-near", "prov-a", "prov-b", "prov-far"]);
}

#[test]
fn rematch_widens_radius_and_drops_notified_providers() {
    // Two candidates are only visible once the radius grows past 25 miles.
    let engine = engine(vec![
        (0, candidate("prov-close", 4.8, 3.0)),
        (0, candidate("prov-mid", 4.2, 12.0)),
        (30, candidate("prov-edge", 4.9, 28.0)),
        (40, candidate("prov-outer", 4.6, 38.0)),
    ]);
    let request = request();

    let first = engine.match_providers(&request).expect("first pass");
    assert_eq!(first.len(), 2);

    let excluded: BTreeSet<ProviderId> =
        first.iter().map(|matched| matched.provider_id.clone()).collect();
    let second = engine.rematch(&request, &excluded).expect("second pass");

    // Radius 25 + 10 reaches prov-edge but not prov-outer; both first-pass
    // providers are excluded.
    let ids: Vec<&str> = second
        .iter()
        .map(|matched| matched.provider_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["prov-edge"]);
}

#[test]
fn rematch_never_exceeds_the_default_limit() {
    let pool: Vec<_> = (0..25)
        .map(|i| (0, candidate(&format!("prov-{i:02}"), 3.0 + 0.05 * i as f64, 5.0)))
        .collect();
    let engine = engine(pool);

    let matches = engine
        .rematch(&request(), &BTreeSet::new())
        .expect("source is seeded");
    assert_eq!(matches.len(), 10);
}

#[test]
fn source_failures_propagate_unchanged() {
    let engine = MatchingEngine::new(Arc::new(OfflineSource), MatchingConfig::default())
        .expect("default matching config is valid");

    let result = engine.match_providers(&request());
    assert!(matches!(result, Err(SpatialError::Unavailable(_))));
}

#[test]
fn zero_default_limit_is_rejected_at_construction() {
    let config = MatchingConfig {
        default_limit: 0,
        ..MatchingConfig::default()
    };
    let result = MatchingEngine::new(Arc::new(OfflineSource), config);
    assert!(matches!(result, Err(InvalidConfig::ZeroLimit { .. })));
}
