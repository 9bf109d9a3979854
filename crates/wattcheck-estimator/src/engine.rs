// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Estimation orchestration.
//!
//! Assesses complexity once, then prices each service independently:
//! tokens (assistant only) > energy > unadjusted carbon > score, with the
//! time-of-day context applied only to the displayed carbon figure.

use serde::Serialize;
use tracing::debug;
use wattcheck_config::model::WattcheckConfig;
use wattcheck_core::{HourOfDay, ServiceId};

use crate::carbon::CarbonConverter;
use crate::complexity::{ComplexityAnalyzer, ComplexityAssessment};
use crate::context::{EnvironmentalContext, EnvironmentalContextProvider};
use crate::energy::EnergyModel;
use crate::score::ScoreMapper;
use crate::tokens::{ResponseLengthEstimator, TokenEstimate};

/// Energy, carbon and score for one service answering one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyEstimate {
    pub service: ServiceId,
    pub energy_wh: f64,
    /// Carbon at the flat grid intensity. Time-invariant.
    pub carbon_grams: f64,
    /// `carbon_grams * context.multiplier`, for display only.
    pub display_carbon_grams: f64,
    /// Shared-anchor comparative score.
    pub score: u8,
    /// Always 0 for services that do not price tokens.
    pub estimated_tokens: u64,
    pub complexity: f64,
}

/// Both services' estimates plus the grid context they were made in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimation {
    pub search: EnergyEstimate,
    pub assistant: EnergyEstimate,
    pub context: EnvironmentalContext,
}

impl Estimation {
    pub fn get(&self, service: ServiceId) -> &EnergyEstimate {
        match service {
            ServiceId::Search => &self.search,
            ServiceId::Assistant => &self.assistant,
        }
    }
}

/// Intermediate signals behind an [`Estimation`], for explanations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationTrace {
    pub complexity: ComplexityAssessment,
    pub tokens: TokenEstimate,
}

/// Turns a query and an hour into an [`Estimation`].
///
/// Holds only immutable parameters; `estimate` is a pure function of its
/// arguments and can be called from any number of places.
#[derive(Debug, Clone)]
pub struct EstimationEngine {
    analyzer: ComplexityAnalyzer,
    length_estimator: ResponseLengthEstimator,
    search: EnergyModel,
    assistant: EnergyModel,
    carbon: CarbonConverter,
    context: EnvironmentalContextProvider,
    scorer: ScoreMapper,
}

impl EstimationEngine {
    /// Build an engine from a (validated) configuration.
    pub fn new(config: &WattcheckConfig) -> Self {
        Self {
            analyzer: ComplexityAnalyzer::new(),
            length_estimator: ResponseLengthEstimator::new(
                config.assistant.tokens_per_query_reference,
            ),
            search: EnergyModel::search(&config.search),
            assistant: EnergyModel::assistant(&config.assistant),
            carbon: CarbonConverter::from_config(&config.grid),
            context: EnvironmentalContextProvider::new(&config.grid),
            scorer: ScoreMapper::from_config(config),
        }
    }

    /// Estimate both services for `query` at `hour`.
    pub fn estimate(&self, query: &str, hour: HourOfDay) -> Estimation {
        self.estimate_traced(query, hour).0
    }

    /// Like [`estimate`](Self::estimate), also returning the signals behind it.
    pub fn estimate_traced(&self, query: &str, hour: HourOfDay) -> (Estimation, EstimationTrace) {
        let complexity = self.analyzer.assess(query);
        let tokens = self.length_estimator.estimate(query, complexity.value);
        let context = self.context.context_for(hour);

        debug!(
            complexity = complexity.value,
            words = complexity.word_count,
            families = ?complexity.matched_families,
            tokens = tokens.tokens,
            %hour,
            period = context.label,
            "query assessed"
        );

        let search = self.price(&self.search, complexity.value, 0, &context);
        let assistant = self.price(&self.assistant, complexity.value, tokens.tokens, &context);

        (
            Estimation {
                search,
                assistant,
                context,
            },
            EstimationTrace { complexity, tokens },
        )
    }

    fn price(
        &self,
        model: &EnergyModel,
        complexity: f64,
        tokens: u64,
        context: &EnvironmentalContext,
    ) -> EnergyEstimate {
        let estimated_tokens = if model.uses_tokens() { tokens } else { 0 };
        let energy_wh = model.energy_wh(complexity, estimated_tokens);
        let carbon_grams = self.carbon.carbon_grams(energy_wh);
        // Scored from energy alone; the hour never reaches the score.
        let score = self.scorer.score(energy_wh);

        debug!(
            service = %model.service(),
            energy_wh,
            carbon_grams,
            score,
            "service priced"
        );

        EnergyEstimate {
            service: model.service(),
            energy_wh,
            carbon_grams,
            display_carbon_grams: CarbonConverter::display_carbon_grams(carbon_grams, context),
            score,
            estimated_tokens,
            complexity,
        }
    }

    pub fn search_model(&self) -> &EnergyModel {
        &self.search
    }

    pub fn assistant_model(&self) -> &EnergyModel {
        &self.assistant
    }

    pub fn carbon(&self) -> &CarbonConverter {
        &self.carbon
    }

    pub fn scorer(&self) -> &ScoreMapper {
        &self.scorer
    }
}

impl Default for EstimationEngine {
    fn default() -> Self {
        Self::new(&WattcheckConfig::default())
    }
}
