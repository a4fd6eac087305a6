use super::domain::{CandidateProvider, ServiceRequest};

/// Geo-indexed candidate discovery, owned by the spatial store.
///
/// Implementations return records already filtered to the request's
/// category and radius, verified and active, with open capacity. The engine
/// treats the result as ground truth and never re-filters; a source failure
/// propagates to the caller unchanged.
pub trait CandidateSource: Send + Sync {
    fn find_candidates(
        &self,
        request: &ServiceRequest,
    ) -> Result<Vec<CandidateProvider>, SpatialError>;
}

/// Failure surfaced by the spatial store.
#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    #[error("spatial index unavailable: {0}")]
    Unavailable(String),
    #[error("unknown service category: {0}")]
    UnknownCategory(String),
}
