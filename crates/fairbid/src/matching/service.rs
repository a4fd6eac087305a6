use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use super::config::MatchingConfig;
use super::domain::{MatchedProvider, ProviderId, ServiceRequest};
use super::scoring::score_candidate;
use super::spatial::{CandidateSource, SpatialError};
use crate::config::InvalidConfig;

/// Finds and ranks providers for a service request.
///
/// Stage 1 (filtering) belongs to the injected [`CandidateSource`]; this
/// engine owns stage 2: scoring, ordering, and the notification cut. Each
/// call works on freshly built values, so concurrent match runs never
/// interact.
pub struct MatchingEngine<S> {
    source: Arc<S>,
    config: MatchingConfig,
}

impl<S> MatchingEngine<S>
where
    S: CandidateSource + 'static,
{
    pub fn new(source: Arc<S>, config: MatchingConfig) -> Result<Self, InvalidConfig> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Find and rank providers, returning at most the configured default
    /// limit, highest score first.
    pub fn match_providers(
        &self,
        request: &ServiceRequest,
    ) -> Result<Vec<MatchedProvider>, SpatialError> {
        self.match_with_limit(request, self.config.default_limit)
    }

    /// Same pipeline with an explicit result cap.
    pub fn match_with_limit(
        &self,
        request: &ServiceRequest,
        limit: usize,
    ) -> Result<Vec<MatchedProvider>, SpatialError> {
        let candidates = self.source.find_candidates(request)?;
        debug!(
            request = %request.id.0,
            candidates = candidates.len(),
            radius_miles = request.matching_radius_miles,
            "scoring match candidates"
        );

        let mut scored: Vec<MatchedProvider> = candidates
            .into_iter()
            .map(|candidate| score_candidate(candidate, &self.config))
            .collect();
        scored.sort_by(rank_order);
        scored.truncate(limit);
        Ok(scored)
    }

    /// Second pass when too few bids arrive inside the bid window: widen
    /// the radius, score a deeper pool, drop providers already notified,
    /// and cut back to the default limit.
    pub fn rematch(
        &self,
        request: &ServiceRequest,
        excluded: &BTreeSet<ProviderId>,
    ) -> Result<Vec<MatchedProvider>, SpatialError> {
        let widened = request.widened(self.config.rematch_radius_increase_miles);
        let mut matches = self.match_with_limit(&widened, self.config.rematch_limit)?;
        matches.retain(|matched| !excluded.contains(&matched.provider_id));
        matches.truncate(self.config.default_limit);
        Ok(matches)
    }
}

/// Score descending; ties break on distance ascending, then provider id, so
/// a rerun over the same pool is reproducible.
fn rank_order(a: &MatchedProvider, b: &MatchedProvider) -> Ordering {
    b.match_score
        .partial_cmp(&a.match_score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.provider_id.cmp(&b.provider_id))
}
