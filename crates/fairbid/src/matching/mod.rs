//! Provider-job matching.
//!
//! The pipeline: a geo-indexed collaborator returns eligible candidates for
//! a request, each candidate gets a weighted composite match score, and the
//! ranked top N are selected for notification. Re-matching widens the radius
//! and excludes providers already notified.

pub mod config;
pub mod domain;
pub(crate) mod scoring;
pub mod service;
pub mod spatial;

#[cfg(test)]
mod tests;

pub use config::{MatchingConfig, MatchWeights, TierScores};
pub use domain::{
    CandidateProvider, MatchedProvider, ProviderId, ProviderTier, RequestId, ServiceRequest,
};
pub use service::MatchingEngine;
pub use spatial::{CandidateSource, SpatialError};
