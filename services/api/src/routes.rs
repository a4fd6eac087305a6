use crate::infra::{AppState, InMemoryCandidateSource};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;

use fairbid::analytics::{
    EarningsDistribution, FairnessAnalyzer, HealthIndex, HealthIndexAnalyzer, InterventionAction,
    InterventionPlanner, MarketHealth, MarketMetrics, MarketStatusClassifier, MetricSnapshot,
};
use fairbid::error::AppError;
use fairbid::matching::{
    CandidateProvider, MatchedProvider, MatchingConfig, MatchingEngine, ProviderId, ServiceRequest,
};

#[derive(Debug, Deserialize)]
pub(crate) struct HealthIndexRequest {
    pub(crate) metrics: MetricSnapshot,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FairnessRequest {
    pub(crate) provider_earnings_cents: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MarketAssessmentResponse {
    pub(crate) health: MarketHealth,
    pub(crate) interventions: Vec<InterventionAction>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) request: ServiceRequest,
    /// Candidate records from the spatial store; supplied inline because
    /// this service does not own the geo index.
    pub(crate) candidates: Vec<CandidateProvider>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RematchRequest {
    pub(crate) request: ServiceRequest,
    pub(crate) candidates: Vec<CandidateProvider>,
    #[serde(default)]
    pub(crate) excluded_provider_ids: Vec<ProviderId>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchResponse {
    pub(crate) matches: Vec<MatchedProvider>,
}

pub(crate) fn router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/analytics/health-index",
            axum::routing::post(health_index_endpoint),
        )
        .route(
            "/api/v1/analytics/fairness",
            axum::routing::post(fairness_endpoint),
        )
        .route(
            "/api/v1/analytics/market",
            axum::routing::post(market_endpoint),
        )
        .route("/api/v1/matching/match", axum::routing::post(match_endpoint))
        .route(
            "/api/v1/matching/rematch",
            axum::routing::post(rematch_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn health_index_endpoint(
    Json(payload): Json<HealthIndexRequest>,
) -> Result<Json<HealthIndex>, AppError> {
    let analyzer = HealthIndexAnalyzer::default();
    Ok(Json(analyzer.index(&payload.metrics)))
}

pub(crate) async fn fairness_endpoint(
    Json(payload): Json<FairnessRequest>,
) -> Result<Json<EarningsDistribution>, AppError> {
    let analyzer = FairnessAnalyzer::default();
    Ok(Json(analyzer.distribution(&payload.provider_earnings_cents)))
}

pub(crate) async fn market_endpoint(
    Json(payload): Json<MarketMetrics>,
) -> Result<Json<MarketAssessmentResponse>, AppError> {
    let classifier = MarketStatusClassifier::default();
    let planner = InterventionPlanner::default();

    let health = classifier.assess(payload);
    let interventions = planner.plan(&health);

    Ok(Json(MarketAssessmentResponse {
        health,
        interventions,
    }))
}

pub(crate) async fn match_endpoint(
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let source = Arc::new(InMemoryCandidateSource::new(payload.candidates));
    let engine = MatchingEngine::new(source, MatchingConfig::default())?;

    let matches = match payload.limit {
        Some(limit) => engine.match_with_limit(&payload.request, limit)?,
        None => engine.match_providers(&payload.request)?,
    };

    Ok(Json(MatchResponse { matches }))
}

pub(crate) async fn rematch_endpoint(
    Json(payload): Json<RematchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let source = Arc::new(InMemoryCandidateSource::new(payload.candidates));
    let engine = MatchingEngine::new(source, MatchingConfig::default())?;

    let excluded: BTreeSet<ProviderId> = payload.excluded_provider_ids.into_iter().collect();
    let matches = engine.rematch(&payload.request, &excluded)?;

    Ok(Json(MatchResponse { matches }))
}
