//! FairBid marketplace core.
//!
//! Derived quality signals for a two-sided services marketplace: the
//! composite network health index and per-market diagnostics, earnings
//! fairness measurement across providers, provider match scoring and
//! ranking, escrow fee mathematics, and verification decision logic.
//!
//! Everything in this crate is a pure computation over already-materialized
//! inputs. Spatial candidate discovery, fund movement, and verification
//! vendors are collaborator traits injected at construction; persistence,
//! scheduling, and the HTTP surface live in `services/api`.

pub mod analytics;
pub mod config;
pub mod error;
pub mod matching;
pub mod payments;
pub mod telemetry;
pub mod verification;
