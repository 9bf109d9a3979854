// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step-by-step explanation of an estimation.
//!
//! Every number here is read back from the engine's own result. In
//! particular the final score shown for each service is the shared-anchor
//! score from [`EnergyEstimate::score`]; nothing is re-normalized against a
//! service's own baseline.

use std::fmt;

use serde::Serialize;
use wattcheck_core::{HourOfDay, ServiceId};

use crate::complexity::KEYWORD_FAMILIES;
use crate::context::EnvironmentalContext;
use crate::energy::EnergyModel;
use crate::engine::{EnergyEstimate, Estimation, EstimationEngine, EstimationTrace};

/// One keyword family's contribution to complexity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyContribution {
    pub family: &'static str,
    pub weight: f64,
}

/// How one service's numbers were derived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceBreakdown {
    pub service: ServiceId,
    /// The energy formula with this query's inputs substituted.
    pub formula: String,
    pub energy_wh: f64,
    pub carbon_grams: f64,
    pub display_carbon_grams: f64,
    /// Position on the scale before ceiling and clamping.
    pub raw_score: f64,
    pub score: u8,
}

/// Side-by-side comparison of the two services.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// How many searches' worth of energy the assistant answer costs.
    pub energy_ratio: f64,
    /// `assistant.score - search.score`.
    pub score_difference: i16,
    /// Displayed carbon avoided by searching instead.
    pub display_carbon_saved_grams: f64,
}

/// Full explanation of an estimation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub word_count: usize,
    pub length_bonus: f64,
    pub families: Vec<FamilyContribution>,
    pub raw_complexity: f64,
    pub complexity: f64,
    /// The raw sum exceeded the maximum complexity.
    pub capped: bool,
    pub token_base: f64,
    pub token_adjustments: Vec<(&'static str, f64)>,
    pub estimated_tokens: u64,
    pub intensity_g_per_kwh: f64,
    pub anchor_wh: f64,
    pub context: EnvironmentalContext,
    pub search: ServiceBreakdown,
    pub assistant: ServiceBreakdown,
    pub comparison: Comparison,
}

impl Breakdown {
    /// Estimate `query` at `hour` and explain the result.
    pub fn explain(engine: &EstimationEngine, query: &str, hour: HourOfDay) -> (Estimation, Self) {
        let (estimation, trace) = engine.estimate_traced(query, hour);
        let breakdown = Self::from_parts(engine, &estimation, &trace);
        (estimation, breakdown)
    }

    /// Explain an estimation produced by `engine` with the given trace.
    pub fn from_parts(
        engine: &EstimationEngine,
        estimation: &Estimation,
        trace: &EstimationTrace,
    ) -> Self {
        let families = trace
            .complexity
            .matched_families
            .iter()
            .filter_map(|name| {
                KEYWORD_FAMILIES
                    .iter()
                    .find(|f| f.name == *name)
                    .map(|f| FamilyContribution {
                        family: f.name,
                        weight: f.weight,
                    })
            })
            .collect();

        let search = Self::service(engine, engine.search_model(), &estimation.search);
        let assistant = Self::service(engine, engine.assistant_model(), &estimation.assistant);

        let comparison = Comparison {
            energy_ratio: estimation.assistant.energy_wh / estimation.search.energy_wh,
            score_difference: i16::from(estimation.assistant.score)
                - i16::from(estimation.search.score),
            display_carbon_saved_grams: estimation.assistant.display_carbon_grams
                - estimation.search.display_carbon_grams,
        };

        Self {
            word_count: trace.complexity.word_count,
            length_bonus: trace.complexity.length_bonus,
            families,
            raw_complexity: trace.complexity.raw,
            complexity: trace.complexity.value,
            capped: trace.complexity.was_clamped(),
            token_base: trace.tokens.base,
            token_adjustments: trace.tokens.applied.clone(),
            estimated_tokens: trace.tokens.tokens,
            intensity_g_per_kwh: engine.carbon().intensity_g_per_kwh(),
            anchor_wh: engine.scorer().anchor_wh(),
            context: estimation.context.clone(),
            search,
            assistant,
            comparison,
        }
    }

    fn service(
        engine: &EstimationEngine,
        model: &EnergyModel,
        estimate: &EnergyEstimate,
    ) -> ServiceBreakdown {
        let formula = match *model {
            EnergyModel::Search { base_energy_wh } => format!(
                "{base_energy_wh} Wh x max(1, {} x 0.5)",
                estimate.complexity
            ),
            EnergyModel::Assistant {
                base_energy_wh,
                energy_per_token_wh,
            } => format!(
                "{base_energy_wh} Wh + {} tokens x {energy_per_token_wh} Wh",
                estimate.estimated_tokens
            ),
        };

        ServiceBreakdown {
            service: estimate.service,
            formula,
            energy_wh: estimate.energy_wh,
            carbon_grams: estimate.carbon_grams,
            display_carbon_grams: estimate.display_carbon_grams,
            raw_score: engine.scorer().raw_score(estimate.energy_wh),
            score: estimate.score,
        }
    }
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Complexity")?;
        writeln!(f, "  base                       1.0")?;
        if self.length_bonus > 0.0 {
            writeln!(
                f,
                "  length ({} words)          +{}",
                self.word_count, self.length_bonus
            )?;
        }
        for c in &self.families {
            writeln!(f, "  {:<26} +{}", c.family, c.weight)?;
        }
        if self.capped {
            writeln!(f, "  capped from {} to {}", self.raw_complexity, self.complexity)?;
        }
        writeln!(f, "  = {:.1}", self.complexity)?;

        writeln!(f, "Response length")?;
        writeln!(f, "  base                       {:.0} tokens", self.token_base)?;
        for (name, factor) in &self.token_adjustments {
            writeln!(f, "  {name:<26} x{factor}")?;
        }
        writeln!(f, "  = {} tokens", self.estimated_tokens)?;

        for s in [&self.search, &self.assistant] {
            writeln!(f, "{} ({})", s.service, s.formula)?;
            writeln!(f, "  energy                     {:.4} Wh", s.energy_wh)?;
            writeln!(
                f,
                "  carbon                     {:.4} g CO2 at {} g/kWh",
                s.carbon_grams, self.intensity_g_per_kwh
            )?;
            writeln!(
                f,
                "  displayed carbon           {:.4} g CO2 (x{} {})",
                s.display_carbon_grams, self.context.multiplier, self.context.label
            )?;
            writeln!(
                f,
                "  score                      ceil({:.3}) vs {} Wh anchor = {}",
                s.raw_score, self.anchor_wh, s.score
            )?;
        }

        writeln!(f, "Comparison")?;
        writeln!(
            f,
            "  assistant uses {:.1}x the energy of search",
            self.comparison.energy_ratio
        )?;
        write!(
            f,
            "  score difference {:+}, {:.4} g CO2 saved by searching",
            self.comparison.score_difference, self.comparison.display_carbon_saved_grams
        )
    }
}
