// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comparative score mapping.
//!
//! ```text
//! score = clamp(ceil(1 + log10(energy_wh / anchor_wh) * log_scale), min, max)
//! ```
//!
//! Both services are scored against the same anchor, the search service's
//! base energy, so their scores sit on one shared scale.

use wattcheck_config::model::{ScoreConfig, WattcheckConfig};

/// Maps energy onto the bounded comparative scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreMapper {
    anchor_wh: f64,
    log_scale: f64,
    min: u8,
    max: u8,
}

impl ScoreMapper {
    pub fn new(anchor_wh: f64, config: &ScoreConfig) -> Self {
        Self {
            anchor_wh,
            log_scale: config.log_scale,
            min: config.min,
            max: config.max,
        }
    }

    /// Scorer anchored on the configured search baseline.
    pub fn from_config(config: &WattcheckConfig) -> Self {
        Self::new(config.search.base_energy_wh, &config.score)
    }

    pub fn anchor_wh(&self) -> f64 {
        self.anchor_wh
    }

    /// Unclamped, unrounded position on the scale.
    pub fn raw_score(&self, energy_wh: f64) -> f64 {
        1.0 + (energy_wh / self.anchor_wh).log10() * self.log_scale
    }

    /// Integer score in `[min, max]`. Zero energy scores the minimum.
    pub fn score(&self, energy_wh: f64) -> u8 {
        let raw = self.raw_score(energy_wh).ceil();
        // log10(0) is -inf; NaN only comes from a non-positive anchor.
        if raw.is_nan() {
            return self.min;
        }
        raw.min(f64::from(self.max)).max(f64::from(self.min)) as u8
    }
}

impl Default for ScoreMapper {
    fn default() -> Self {
        Self::from_config(&WattcheckConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn anchor_energy_scores_one() {
        assert_eq!(ScoreMapper::default().score(0.04), 1);
    }

    #[test]
    fn reference_assistant_query_scores_five() {
        // ceil(1 + log10(62.5) * 2) = ceil(4.59)
        assert_eq!(ScoreMapper::default().score(2.5), 5);
    }

    #[test]
    fn heavy_query_is_clamped_to_six() {
        // ceil(1 + log10(312.5) * 2) = ceil(5.99)
        assert_eq!(ScoreMapper::default().score(12.5), 6);
        assert_eq!(ScoreMapper::default().score(1_000.0), 6);
    }

    #[test]
    fn tiny_and_zero_energy_clamp_to_one() {
        let s = ScoreMapper::default();
        assert_eq!(s.score(0.001), 1);
        assert_eq!(s.score(0.0), 1);
    }

    #[test]
    fn slightly_above_anchor_rounds_up() {
        // 0.05 / 0.04 = 1.25 -> 1 + 0.19 -> 2
        assert_eq!(ScoreMapper::default().score(0.05), 2);
    }

    proptest! {
        #[test]
        fn score_is_bounded(e in 0.0f64..1e6) {
            let s = ScoreMapper::default().score(e);
            prop_assert!((1..=6).contains(&s));
        }

        #[test]
        fn score_is_monotonic(a in 0.0f64..1e4, b in 0.0f64..1e4) {
            let s = ScoreMapper::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(s.score(lo) <= s.score(hi));
        }
    }
}
