// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! The estimator is total only while its constants are sane: the score
//! anchor must be positive for the logarithm to be defined, and the two hour
//! windows must partition the clock without overlapping.

use crate::diagnostic::ConfigError;
use crate::model::{HourWindow, WattcheckConfig};

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure rather than stopping at the first one.
pub fn validate_config(config: &WattcheckConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    require_positive(&mut errors, "search.base_energy_wh", config.search.base_energy_wh);
    require_positive(&mut errors, "assistant.base_energy_wh", config.assistant.base_energy_wh);
    require_non_negative(
        &mut errors,
        "assistant.energy_per_token_wh",
        config.assistant.energy_per_token_wh,
    );
    require_non_negative(&mut errors, "grid.intensity_g_per_kwh", config.grid.intensity_g_per_kwh);
    require_non_negative(&mut errors, "grid.default_multiplier", config.grid.default_multiplier);

    validate_window(&mut errors, "grid.solar_peak", &config.grid.solar_peak);
    validate_window(&mut errors, "grid.peak_demand", &config.grid.peak_demand);

    if config.grid.solar_peak.overlaps(&config.grid.peak_demand) {
        errors.push(ConfigError::validation(format!(
            "grid.solar_peak ({}-{}) and grid.peak_demand ({}-{}) must not overlap",
            config.grid.solar_peak.start_hour,
            config.grid.solar_peak.end_hour,
            config.grid.peak_demand.start_hour,
            config.grid.peak_demand.end_hour,
        )));
    }

    if config.score.min < 1 {
        errors.push(ConfigError::validation("score.min must be at least 1"));
    }
    if config.score.min > config.score.max {
        errors.push(ConfigError::validation(format!(
            "score.min ({}) must not exceed score.max ({})",
            config.score.min, config.score.max
        )));
    }
    require_positive(&mut errors, "score.log_scale", config.score.log_scale);

    if config.handoff.search_url.trim().is_empty() {
        errors.push(ConfigError::validation("handoff.search_url must not be empty"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn require_positive(errors: &mut Vec<ConfigError>, key: &str, value: f64) {
    if !(value.is_finite() && value > 0.0) {
        errors.push(ConfigError::validation(format!(
            "{key} must be a positive number, got {value}"
        )));
    }
}

fn require_non_negative(errors: &mut Vec<ConfigError>, key: &str, value: f64) {
    if !(value.is_finite() && value >= 0.0) {
        errors.push(ConfigError::validation(format!(
            "{key} must be non-negative, got {value}"
        )));
    }
}

fn validate_window(errors: &mut Vec<ConfigError>, key: &str, window: &HourWindow) {
    for (name, hour) in [("start_hour", window.start_hour), ("end_hour", window.end_hour)] {
        if !(0..=23).contains(&hour) {
            errors.push(ConfigError::validation(format!(
                "{key}.{name} must be between 0 and 23, got {hour}"
            )));
        }
    }
    if window.start_hour > window.end_hour {
        errors.push(ConfigError::validation(format!(
            "{key}.start_hour ({}) must not be after {key}.end_hour ({})",
            window.start_hour, window.end_hour
        )));
    }
    require_non_negative(errors, &format!("{key}.multiplier"), window.multiplier);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &WattcheckConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&WattcheckConfig::default()).is_ok());
    }

    #[test]
    fn zero_search_baseline_fails_validation() {
        let mut config = WattcheckConfig::default();
        config.search.base_energy_wh = 0.0;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("search.base_energy_wh")));
    }

    #[test]
    fn nan_energy_fails_validation() {
        let mut config = WattcheckConfig::default();
        config.assistant.energy_per_token_wh = f64::NAN;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("energy_per_token_wh")));
    }

    #[test]
    fn overlapping_windows_fail_validation() {
        let mut config = WattcheckConfig::default();
        config.grid.peak_demand.start_hour = 15;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("must not overlap")));
    }

    #[test]
    fn out_of_clock_window_fails_validation() {
        let mut config = WattcheckConfig::default();
        config.grid.peak_demand.end_hour = 24;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("grid.peak_demand.end_hour")));
    }

    #[test]
    fn inverted_window_fails_validation() {
        let mut config = WattcheckConfig::default();
        config.grid.solar_peak.start_hour = 16;
        config.grid.solar_peak.end_hour = 10;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("must not be after")));
    }

    #[test]
    fn inverted_score_scale_fails_validation() {
        let mut config = WattcheckConfig::default();
        config.score.min = 7;
        let msgs = messages(&config);
        assert!(msgs.iter().any(|m| m.contains("score.min (7)")));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = WattcheckConfig::default();
        config.search.base_energy_wh = -1.0;
        config.grid.intensity_g_per_kwh = -1.0;
        config.handoff.search_url = "  ".to_string();
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }
}
