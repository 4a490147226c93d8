//! Replication pipeline for an economic valuation of unpaid household labor.
//!
//! The core is a growing-annuity present-value engine ([`valuation`]) fed by
//! survey-derived parameters ([`params`], [`config`]), exercised four ways:
//! named scenarios ([`scenarios`]), one-parameter sensitivity sweeps
//! ([`sensitivity`]), a seeded Monte Carlo simulation ([`montecarlo`]) and
//! policy counterfactuals ([`policy`]). Each component produces its own
//! output table for the reporting boundary ([`report`]).
//!
//! Reproducibility contract: one integer seed (`config::RANDOM_SEED`)
//! determines all randomized behavior; same seed and inputs, same tables.

pub mod config;
pub mod error;
pub mod montecarlo;
pub mod params;
pub mod policy;
pub mod report;
pub mod scenarios;
pub mod sensitivity;
pub mod stats;
pub mod types;
pub mod valuation;
