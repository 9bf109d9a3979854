// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Wattcheck estimator.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Every default equals the fixed constant the
//! estimator was calibrated with, so an empty file reproduces the reference
//! numbers exactly.

use serde::{Deserialize, Serialize};

/// Top-level Wattcheck configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WattcheckConfig {
    /// Energy model for the conventional search service.
    #[serde(default)]
    pub search: SearchConfig,

    /// Energy model for the AI assistant service.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Grid carbon intensity and time-of-day adjustment.
    #[serde(default)]
    pub grid: GridConfig,

    /// Comparative score scale.
    #[serde(default)]
    pub score: ScoreConfig,

    /// Outbound actions taken on a result.
    #[serde(default)]
    pub handoff: HandoffConfig,

    /// Terminal output and logging.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Search service energy model: `base_energy_wh * max(1, complexity * 0.5)`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Energy of a single plain search, in Wh. Also the shared score anchor.
    #[serde(default = "default_search_base_energy_wh")]
    pub base_energy_wh: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_energy_wh: default_search_base_energy_wh(),
        }
    }
}

fn default_search_base_energy_wh() -> f64 {
    0.04
}

/// Assistant service energy model: `base_energy_wh + tokens * energy_per_token_wh`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// Fixed per-request overhead in Wh.
    #[serde(default = "default_assistant_base_energy_wh")]
    pub base_energy_wh: f64,

    /// Marginal energy per generated token in Wh.
    #[serde(default = "default_energy_per_token_wh")]
    pub energy_per_token_wh: f64,

    /// Tokens generated for a query of complexity 1.0 before keyword adjustments.
    #[serde(default = "default_tokens_per_query_reference")]
    pub tokens_per_query_reference: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_energy_wh: default_assistant_base_energy_wh(),
            energy_per_token_wh: default_energy_per_token_wh(),
            tokens_per_query_reference: default_tokens_per_query_reference(),
        }
    }
}

fn default_assistant_base_energy_wh() -> f64 {
    0.5
}

fn default_energy_per_token_wh() -> f64 {
    0.004
}

fn default_tokens_per_query_reference() -> u32 {
    500
}

/// Grid carbon intensity and the time-of-day windows that adjust it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Grams of CO2 emitted per kWh drawn from the grid.
    #[serde(default = "default_intensity_g_per_kwh")]
    pub intensity_g_per_kwh: f64,

    /// Multiplier for hours outside both windows.
    #[serde(default = "default_multiplier")]
    pub default_multiplier: f64,

    /// Hours when solar generation is abundant.
    #[serde(default = "default_solar_peak")]
    pub solar_peak: HourWindow,

    /// Evening hours of peak demand.
    #[serde(default = "default_peak_demand")]
    pub peak_demand: HourWindow,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            intensity_g_per_kwh: default_intensity_g_per_kwh(),
            default_multiplier: default_multiplier(),
            solar_peak: default_solar_peak(),
            peak_demand: default_peak_demand(),
        }
    }
}

fn default_intensity_g_per_kwh() -> f64 {
    367.0
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_solar_peak() -> HourWindow {
    HourWindow {
        start_hour: 10,
        end_hour: 16,
        multiplier: 0.8,
    }
}

fn default_peak_demand() -> HourWindow {
    HourWindow {
        start_hour: 18,
        end_hour: 22,
        multiplier: 1.3,
    }
}

/// An inclusive range of hours with its carbon multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HourWindow {
    /// First hour of the window (inclusive).
    pub start_hour: i64,
    /// Last hour of the window (inclusive).
    pub end_hour: i64,
    /// Multiplier applied to displayed carbon during the window.
    pub multiplier: f64,
}

impl HourWindow {
    /// Whether `hour` falls inside the window, both bounds inclusive.
    pub fn contains(&self, hour: i64) -> bool {
        (self.start_hour..=self.end_hour).contains(&hour)
    }

    /// Whether two windows share at least one hour.
    pub fn overlaps(&self, other: &HourWindow) -> bool {
        self.start_hour <= other.end_hour && other.start_hour <= self.end_hour
    }
}

/// The bounded comparative score scale.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreConfig {
    /// Lowest score (a query costing no more than one plain search).
    #[serde(default = "default_score_min")]
    pub min: u8,

    /// Highest score.
    #[serde(default = "default_score_max")]
    pub max: u8,

    /// Score points per decade of energy above the anchor.
    #[serde(default = "default_log_scale")]
    pub log_scale: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            min: default_score_min(),
            max: default_score_max(),
            log_scale: default_log_scale(),
        }
    }
}

fn default_score_min() -> u8 {
    1
}

fn default_score_max() -> u8 {
    6
}

fn default_log_scale() -> f64 {
    2.0
}

/// Outbound action configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HandoffConfig {
    /// Search page URL; the percent-encoded query is appended verbatim.
    #[serde(default = "default_search_url")]
    pub search_url: String,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
        }
    }
}

fn default_search_url() -> String {
    "https://www.google.com/search?q=".to_string()
}

/// Terminal output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Use ANSI colors when stdout is a terminal.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            color: default_color(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_color() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = WattcheckConfig::default();
        assert_eq!(config.search.base_energy_wh, 0.04);
        assert_eq!(config.assistant.base_energy_wh, 0.5);
        assert_eq!(config.assistant.energy_per_token_wh, 0.004);
        assert_eq!(config.assistant.tokens_per_query_reference, 500);
        assert_eq!(config.grid.intensity_g_per_kwh, 367.0);
        assert_eq!(config.grid.solar_peak.multiplier, 0.8);
        assert_eq!(config.grid.peak_demand.multiplier, 1.3);
        assert_eq!(config.grid.default_multiplier, 1.0);
        assert_eq!((config.score.min, config.score.max), (1, 6));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let w = default_solar_peak();
        assert!(!w.contains(9));
        assert!(w.contains(10));
        assert!(w.contains(16));
        assert!(!w.contains(17));
    }

    #[test]
    fn default_windows_do_not_overlap() {
        assert!(!default_solar_peak().overlaps(&default_peak_demand()));
        let shifted = HourWindow {
            start_hour: 16,
            end_hour: 19,
            multiplier: 1.0,
        };
        assert!(shifted.overlaps(&default_solar_peak()));
        assert!(shifted.overlaps(&default_peak_demand()));
    }
}
