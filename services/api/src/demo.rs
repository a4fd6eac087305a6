use crate::infra::{InMemoryCandidateSource, InMemoryPaymentGateway};
use chrono::{DateTime, TimeZone, Utc};
use clap::Args;
use std::collections::BTreeSet;
use std::sync::Arc;

use fairbid::analytics::{
    FairnessAnalyzer, HealthIndexAnalyzer, InterventionPlanner, MarketMetrics,
    MarketStatusClassifier, MetricKey, MetricSnapshot,
};
use fairbid::error::AppError;
use fairbid::matching::{
    CandidateProvider, MatchingConfig, MatchingEngine, ProviderId, ProviderTier, RequestId,
    ServiceRequest,
};
use fairbid::payments::{EscrowService, FeeSchedule};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the matching portion of the demo.
    #[arg(long)]
    pub(crate) skip_matching: bool,
    /// Skip the escrow economics portion of the demo.
    #[arg(long)]
    pub(crate) skip_payments: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("FairBid marketplace scoring demo");

    render_network_health();
    render_fairness();
    render_markets();

    if !args.skip_matching {
        render_matching()?;
    }
    if !args.skip_payments {
        render_escrow()?;
    }

    Ok(())
}

fn sample_network() -> MetricSnapshot {
    [
        (MetricKey::BidCoverageRate, 0.82),
        (MetricKey::AvgHoursToFirstBid, 6.5),
        (MetricKey::FillRate, 0.52),
        (MetricKey::Csat, 4.5),
        (MetricKey::DisputeRate, 0.03),
        (MetricKey::NoShowRate, 0.02),
        (MetricKey::ActiveProviders, 210.0),
        (MetricKey::ProviderUtilization, 0.48),
        (MetricKey::ProviderChurnRate, 0.045),
        (MetricKey::MonthlyRequests, 560.0),
        (MetricKey::RepeatCustomerRate, 0.33),
        (MetricKey::CancellationRate, 0.08),
        (MetricKey::GmvGrowthMom, 0.06),
        (MetricKey::RevenueVsTarget, 0.88),
        (MetricKey::RefundRate, 0.035),
    ]
    .into_iter()
    .collect()
}

fn render_network_health() {
    let analyzer = HealthIndexAnalyzer::default();
    let index = analyzer.index(&sample_network());

    println!("\nNetwork health index");
    println!(
        "  overall {:>5.1}  ({})",
        index.overall_score,
        index.interpretation.label()
    );
    println!("  liquidity {:>5.1}", index.liquidity_score);
    println!("  quality   {:>5.1}", index.quality_score);
    println!("  supply    {:>5.1}", index.supply_score);
    println!("  demand    {:>5.1}", index.demand_score);
    println!("  financial {:>5.1}", index.financial_score);
}

fn render_fairness() {
    let analyzer = FairnessAnalyzer::default();
    // Weekly earnings (cents) across a small provider cohort.
    let earnings = [
        42_000_u64, 61_500, 88_000, 132_000, 149_500, 210_000, 265_000, 340_000, 495_000, 730_000,
    ];
    let distribution = analyzer.distribution(&earnings);

    println!("\nEarnings fairness");
    println!(
        "  gini {:.4}  ({})",
        distribution.gini_coefficient,
        distribution.status.label()
    );
    println!(
        "  shares: top 10% {:.1}%, middle 50% {:.1}%, bottom 40% {:.1}%",
        distribution.top_10_pct_share * 100.0,
        distribution.middle_50_pct_share * 100.0,
        distribution.bottom_40_pct_share * 100.0
    );
    if let Some(recommendation) = &distribution.recommendation {
        println!("  recommendation: {recommendation}");
    }
}

fn render_markets() {
    let classifier = MarketStatusClassifier::default();
    let planner = InterventionPlanner::default();

    let markets = vec![
        MarketMetrics {
            market: "des-moines".to_string(),
            providers_active: 86,
            weekly_requests: 310,
            bid_coverage_rate: 0.88,
            fill_rate: 0.61,
            avg_hours_to_first_bid: 4.2,
            weekly_gmv_cents: 18_400_000,
            provider_utilization: 0.54,
        },
        MarketMetrics {
            market: "cedar-rapids".to_string(),
            providers_active: 31,
            weekly_requests: 120,
            bid_coverage_rate: 0.71,
            fill_rate: 0.44,
            avg_hours_to_first_bid: 9.8,
            weekly_gmv_cents: 5_200_000,
            provider_utilization: 0.41,
        },
        MarketMetrics {
            market: "sioux-city".to_string(),
            providers_active: 11,
            weekly_requests: 45,
            bid_coverage_rate: 0.52,
            fill_rate: 0.31,
            avg_hours_to_first_bid: 19.5,
            weekly_gmv_cents: 1_100_000,
            provider_utilization: 0.24,
        },
    ];

    println!("\nMarket diagnostics");
    for metrics in markets {
        let health = classifier.assess(metrics);
        println!(
            "  {:<14} coverage {:>4.0}%, fill {:>4.0}%  -> {}",
            health.market,
            health.bid_coverage_rate * 100.0,
            health.fill_rate * 100.0,
            health.status.label()
        );
        for action in planner.plan(&health) {
            println!("    [{:?}/{:?}] {}", action.priority, action.owner, action.description);
        }
    }
}

fn active_at(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single()
}

fn fixture_candidates() -> Vec<CandidateProvider> {
    vec![
        CandidateProvider {
            provider_id: ProviderId("prov-3301".to_string()),
            business_name: "Capitol City Plumbing".to_string(),
            tier: ProviderTier::Elite,
            composite_rating: Some(4.9),
            completion_rate: Some(0.98),
            avg_response_minutes: Some(22),
            distance_miles: 6.8,
            available_capacity: 2,
            last_active_at: active_at(2025, 5, 30),
        },
        CandidateProvider {
            provider_id: ProviderId("prov-1188".to_string()),
            business_name: "Two Rivers Drain Co".to_string(),
            tier: ProviderTier::Preferred,
            composite_rating: Some(4.4),
            completion_rate: Some(0.93),
            avg_response_minutes: Some(95),
            distance_miles: 3.1,
            available_capacity: 1,
            last_active_at: active_at(2025, 5, 12),
        },
        CandidateProvider {
            provider_id: ProviderId("prov-4410".to_string()),
            business_name: "Prairie Pipe Works".to_string(),
            tier: ProviderTier::Standard,
            composite_rating: None,
            completion_rate: None,
            avg_response_minutes: None,
            distance_miles: 11.5,
            available_capacity: 4,
            last_active_at: None,
        },
        CandidateProvider {
            provider_id: ProviderId("prov-2093".to_string()),
            business_name: "Loess Hills Plumbing".to_string(),
            tier: ProviderTier::Standard,
            composite_rating: Some(3.9),
            completion_rate: Some(0.81),
            avg_response_minutes: Some(640),
            distance_miles: 31.0,
            available_capacity: 2,
            last_active_at: None,
        },
    ]
}

fn render_matching() -> Result<(), AppError> {
    let source = Arc::new(InMemoryCandidateSource::new(fixture_candidates()));
    let engine = MatchingEngine::new(source, MatchingConfig::default())?;

    let request = ServiceRequest {
        id: RequestId("req-9041".to_string()),
        category_id: "plumbing".to_string(),
        latitude: 41.5868,
        longitude: -93.6250,
        preferred_date_start: None,
        preferred_date_end: None,
        matching_radius_miles: 25,
    };

    println!("\nMatch run (radius {} miles)", request.matching_radius_miles);
    let matches = engine.match_providers(&request)?;
    for matched in &matches {
        println!(
            "  {:.4}  {:<24} {:<9} {:>5.1} mi",
            matched.match_score,
            matched.business_name,
            matched.tier.label(),
            matched.distance_miles
        );
    }

    let notified: BTreeSet<ProviderId> = matches
        .iter()
        .map(|matched| matched.provider_id.clone())
        .collect();
    let second_pass = engine.rematch(&request, &notified)?;
    println!("Rematch after widening the radius");
    if second_pass.is_empty() {
        println!("  no additional providers in range");
    }
    for matched in &second_pass {
        println!(
            "  {:.4}  {:<24} {:<9} {:>5.1} mi",
            matched.match_score,
            matched.business_name,
            matched.tier.label(),
            matched.distance_miles
        );
    }

    Ok(())
}

fn render_escrow() -> Result<(), AppError> {
    let service = EscrowService::new(
        Arc::new(InMemoryPaymentGateway::default()),
        FeeSchedule::default(),
    )?;

    let hold = service.create_escrow(
        "bid-7781",
        100_000,
        "cus_demo",
        "acct_demo",
        ProviderTier::Standard,
    )?;

    println!("\nEscrow economics for a $1,000.00 bid (standard tier)");
    println!(
        "  customer pays ${:.2}",
        hold.fees.amount_total_cents as f64 / 100.0
    );
    println!(
        "  platform retains ${:.2}",
        hold.fees.application_fee_cents as f64 / 100.0
    );
    println!(
        "  provider receives ${:.2}",
        hold.fees.provider_payout_cents as f64 / 100.0
    );

    let economics = service
        .fees()
        .economics(100_000, ProviderTier::Standard);
    println!(
        "  net platform revenue after processing ${:.2} (take rate {:.2}%)",
        economics.net_platform_revenue_cents as f64 / 100.0,
        economics.effective_take_rate * 100.0
    );

    let captured = service.capture(&hold)?;
    println!("  capture confirmed: {}", captured.status.label());

    Ok(())
}
