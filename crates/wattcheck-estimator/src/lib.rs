// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Energy and carbon estimation for answering a query via search or via an
//! AI assistant.
//!
//! This crate provides:
//! - [`ComplexityAnalyzer`]: keyword and length heuristics scoring a query 1.0-4.0
//! - [`ResponseLengthEstimator`]: expected assistant output tokens
//! - [`EnergyModel`]: per-service energy in Wh
//! - [`CarbonConverter`]: Wh to grams of CO2
//! - [`EnvironmentalContextProvider`]: time-of-day grid multiplier
//! - [`ScoreMapper`]: a 1-6 comparative score on a shared anchor
//! - [`EstimationEngine`]: all of the above composed into one [`Estimation`]
//!
//! The engine is pure and total: any string and any hour produce a result.

pub mod breakdown;
pub mod carbon;
pub mod complexity;
pub mod context;
pub mod controller;
pub mod energy;
pub mod engine;
pub mod handoff;
pub mod score;
pub mod tokens;

pub use breakdown::Breakdown;
pub use carbon::CarbonConverter;
pub use complexity::{ComplexityAnalyzer, ComplexityAssessment};
pub use context::{EnvironmentalContext, EnvironmentalContextProvider, GridPeriod};
pub use controller::{PanelState, SubmissionController, SubmissionHandler};
pub use energy::EnergyModel;
pub use engine::{EnergyEstimate, Estimation, EstimationEngine};
pub use handoff::{hand_to_assistant, search_url, HostInput};
pub use score::ScoreMapper;
pub use tokens::ResponseLengthEstimator;
