use super::common::{midpoint_snapshot, thriving_snapshot};
use crate::analytics::health::{
    ComponentWeights, HealthIndexAnalyzer, HealthInterpretation,
};
use crate::analytics::metrics::MetricSnapshot;

#[test]
fn saturated_metrics_score_a_perfect_index() {
    let analyzer = HealthIndexAnalyzer::default();
    let index = analyzer.index(&thriving_snapshot());

    assert_eq!(index.liquidity_score, 100.0);
    assert_eq!(index.quality_score, 100.0);
    assert_eq!(index.supply_score, 100.0);
    assert_eq!(index.demand_score, 100.0);
    assert_eq!(index.financial_score, 100.0);
    assert_eq!(index.overall_score, 100.0);
    assert_eq!(index.interpretation, HealthInterpretation::Thriving);
}

#[test]
fn midpoint_metrics_score_the_documented_composite() {
    let analyzer = HealthIndexAnalyzer::default();
    let index = analyzer.index(&midpoint_snapshot());

    // Every linear sub-score sits at its midpoint; utilization is in the
    // optimal band, which pulls supply up to 67.5.
    assert_eq!(index.liquidity_score, 50.0);
    assert_eq!(index.quality_score, 50.0);
    assert_eq!(index.supply_score, 67.5);
    assert_eq!(index.demand_score, 50.0);
    assert_eq!(index.financial_score, 50.0);
    assert_eq!(index.overall_score, 53.5);
    assert_eq!(index.interpretation, HealthInterpretation::Critical);
}

#[test]
fn empty_snapshot_scores_from_worst_case_defaults() {
    let analyzer = HealthIndexAnalyzer::default();
    let index = analyzer.index(&MetricSnapshot::default());

    // Coverage/fill default to zero and first-bid time to 24h, so liquidity
    // bottoms out; the zero-rate defaults keep the inverse sub-scores at 100.
    assert_eq!(index.liquidity_score, 0.0);
    assert_eq!(index.quality_score, 50.0);
    assert_eq!(index.supply_score, 37.0);
    assert_eq!(index.demand_score, 25.0);
    assert_eq!(index.financial_score, 35.0);
    assert_eq!(index.overall_score, 28.4);
    assert_eq!(index.interpretation, HealthInterpretation::Critical);
}

#[test]
fn zeroed_components_score_a_zero_index() {
    let weights = ComponentWeights::default();
    assert_eq!(weights.combine(0.0, 0.0, 0.0, 0.0, 0.0), 0.0);
}

#[test]
fn aggregation_matches_the_documented_weighted_sum() {
    let weights = ComponentWeights::default();
    let combined = weights.combine(80.0, 60.0, 40.0, 20.0, 10.0);
    let expected = 0.25 * 80.0 + 0.25 * 60.0 + 0.20 * 40.0 + 0.20 * 20.0 + 0.10 * 10.0;
    assert!((combined - expected).abs() < 1e-9);
}
