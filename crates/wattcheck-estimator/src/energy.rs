// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-service energy models.
//!
//! Search energy scales with complexity and never drops below one plain
//! search:
//!
//! ```text
//! energy_wh = base_energy_wh * max(1, complexity * 0.5)
//! ```
//!
//! Assistant energy is a fixed overhead plus a per-token generation cost:
//!
//! ```text
//! energy_wh = base_energy_wh + tokens * energy_per_token_wh
//! ```

use serde::Serialize;
use wattcheck_config::model::{AssistantConfig, SearchConfig};
use wattcheck_core::ServiceId;

/// Complexity-to-load factor for the search service.
const SEARCH_COMPLEXITY_FACTOR: f64 = 0.5;

/// Energy model for one service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "service", rename_all = "lowercase")]
pub enum EnergyModel {
    Search { base_energy_wh: f64 },
    Assistant {
        base_energy_wh: f64,
        energy_per_token_wh: f64,
    },
}

impl EnergyModel {
    pub fn search(config: &SearchConfig) -> Self {
        EnergyModel::Search {
            base_energy_wh: config.base_energy_wh,
        }
    }

    pub fn assistant(config: &AssistantConfig) -> Self {
        EnergyModel::Assistant {
            base_energy_wh: config.base_energy_wh,
            energy_per_token_wh: config.energy_per_token_wh,
        }
    }

    /// Which service this model prices.
    pub fn service(&self) -> ServiceId {
        match self {
            EnergyModel::Search { .. } => ServiceId::Search,
            EnergyModel::Assistant { .. } => ServiceId::Assistant,
        }
    }

    /// Whether the model consumes a token estimate.
    pub fn uses_tokens(&self) -> bool {
        matches!(self, EnergyModel::Assistant { .. })
    }

    /// Fixed per-query energy before any scaling.
    pub fn base_energy_wh(&self) -> f64 {
        match *self {
            EnergyModel::Search { base_energy_wh }
            | EnergyModel::Assistant { base_energy_wh, .. } => base_energy_wh,
        }
    }

    /// Energy in Wh for a query. The search model ignores `tokens`; the
    /// assistant model ignores `complexity`.
    pub fn energy_wh(&self, complexity: f64, tokens: u64) -> f64 {
        match *self {
            EnergyModel::Search { base_energy_wh } => {
                base_energy_wh * (complexity * SEARCH_COMPLEXITY_FACTOR).max(1.0)
            }
            EnergyModel::Assistant {
                base_energy_wh,
                energy_per_token_wh,
            } => base_energy_wh + tokens as f64 * energy_per_token_wh,
        }
    }
}
