use chrono::{DateTime, Utc};

use super::config::MatchingConfig;
use super::domain::{CandidateProvider, MatchedProvider};

/// Stand-in recency sub-score until the activity feed lands.
// TODO: bucket on days since last_active_at (< 7 days -> 1.0, < 30 days ->
// 0.6, else 0.3) once the feed exposes it.
const RECENCY_PLACEHOLDER: f64 = 0.6;

/// Compute the composite match score for one candidate and attach it.
///
/// Sub-scores all live on the 0-1 scale; missing data scores the neutral
/// 0.5 so new providers are neither boosted nor buried.
pub(crate) fn score_candidate(
    candidate: CandidateProvider,
    config: &MatchingConfig,
) -> MatchedProvider {
    let rating = rating_score(candidate.composite_rating);
    let completion = candidate.completion_rate.unwrap_or(0.5);
    let response = response_time_score(candidate.avg_response_minutes);
    let tier = config.tier_scores.score(candidate.tier);
    let recency = recency_score(candidate.last_active_at);

    let weights = &config.weights;
    let composite = weights.rating * rating
        + weights.completion_rate * completion
        + weights.response_time * response
        + weights.tier * tier
        + weights.recency * recency;

    MatchedProvider {
        provider_id: candidate.provider_id,
        business_name: candidate.business_name,
        tier: candidate.tier,
        composite_rating: candidate.composite_rating,
        completion_rate: candidate.completion_rate,
        avg_response_minutes: candidate.avg_response_minutes,
        distance_miles: candidate.distance_miles,
        available_capacity: candidate.available_capacity,
        match_score: round_four(composite),
    }
}

/// Composite rating (1-5) normalized to 0-1; no reviews scores neutral.
fn rating_score(rating: Option<f64>) -> f64 {
    match rating {
        Some(value) => value / 5.0,
        None => 0.5,
    }
}

/// Providers who respond within the hour win jobs at a multiple of the
/// slower cohorts, hence the steep step.
fn response_time_score(avg_minutes: Option<u32>) -> f64 {
    match avg_minutes {
        None => 0.5,
        Some(minutes) if minutes <= 60 => 1.0,
        Some(minutes) if minutes <= 240 => 0.7,
        Some(minutes) if minutes <= 720 => 0.4,
        Some(_) => 0.2,
    }
}

fn recency_score(_last_active_at: Option<DateTime<Utc>>) -> f64 {
    RECENCY_PLACEHOLDER
}

fn round_four(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::domain::{ProviderId, ProviderTier};

    fn candidate(rating: Option<f64>, minutes: Option<u32>, tier: ProviderTier) -> CandidateProvider {
        CandidateProvider {
            provider_id: ProviderId("prov-1".to_string()),
            business_name: "Hawkeye Plumbing".to_string(),
            tier,
            composite_rating: rating,
            completion_rate: Some(0.9),
            avg_response_minutes: minutes,
            distance_miles: 4.2,
            available_capacity: 2,
            last_active_at: None,
        }
    }

    #[test]
    fn strong_elite_candidate_scores_the_documented_composite() {
        let config = MatchingConfig::default();
        let matched = score_candidate(candidate(Some(5.0), Some(30), ProviderTier::Elite), &config);
        // 0.35*1.0 + 0.25*0.9 + 0.20*1.0 + 0.15*1.0 + 0.05*0.6
        assert_eq!(matched.match_score, 0.955);
    }

    #[test]
    fn missing_signals_score_neutral() {
        let config = MatchingConfig::default();
        let mut unknown = candidate(None, None, ProviderTier::Standard);
        unknown.completion_rate = None;
        let matched = score_candidate(unknown, &config);
        // 0.35*0.5 + 0.25*0.5 + 0.20*0.5 + 0.15*0.4 + 0.05*0.6
        assert_eq!(matched.match_score, 0.49);
    }

    #[test]
    fn response_time_steps_down_with_latency() {
        assert_eq!(response_time_score(Some(60)), 1.0);
        assert_eq!(response_time_score(Some(61)), 0.7);
        assert_eq!(response_time_score(Some(240)), 0.7);
        assert_eq!(response_time_score(Some(241)), 0.4);
        assert_eq!(response_time_score(Some(720)), 0.4);
        assert_eq!(response_time_score(Some(721)), 0.2);
        assert_eq!(response_time_score(None), 0.5);
    }

    #[test]
    fn tier_ladder_orders_elite_preferred_standard() {
        let config = MatchingConfig::default();
        let elite = score_candidate(candidate(Some(4.0), Some(30), ProviderTier::Elite), &config);
        let preferred =
            score_candidate(candidate(Some(4.0), Some(30), ProviderTier::Preferred), &config);
        let standard =
            score_candidate(candidate(Some(4.0), Some(30), ProviderTier::Standard), &config);
        assert!(elite.match_score > preferred.match_score);
        assert!(preferred.match_score > standard.match_score);
    }

    #[test]
    fn unrecognized_tier_deserializes_to_standard() {
        let tier: ProviderTier = serde_json::from_str("\"platinum\"").expect("falls back");
        assert_eq!(tier, ProviderTier::Standard);
    }
}
