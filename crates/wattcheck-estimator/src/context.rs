// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-of-day grid context.
//!
//! Partitions the clock into a solar-peak window, a peak-demand window and
//! everything else. Any hour that is not inside a window, including hours
//! that are not on the clock at all, lands in the standard bucket.

use serde::Serialize;
use wattcheck_config::model::{GridConfig, HourWindow};
use wattcheck_core::HourOfDay;

/// The grid period an hour falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPeriod {
    SolarPeak,
    PeakDemand,
    Standard,
}

impl GridPeriod {
    pub fn label(self) -> &'static str {
        match self {
            GridPeriod::SolarPeak => "Lower (Solar Peak)",
            GridPeriod::PeakDemand => "Higher (Peak Demand)",
            GridPeriod::Standard => "Medium",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GridPeriod::SolarPeak => "solar energy is more available now",
            GridPeriod::PeakDemand => "peak energy demand period",
            GridPeriod::Standard => "standard grid mix",
        }
    }
}

/// Grid conditions at the hour a query was made.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalContext {
    pub period: GridPeriod,
    pub label: &'static str,
    /// Factor applied to displayed (never scored) carbon.
    pub multiplier: f64,
    pub description: &'static str,
}

/// Derives an [`EnvironmentalContext`] from the hour of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentalContextProvider {
    solar_peak: HourWindow,
    peak_demand: HourWindow,
    default_multiplier: f64,
}

impl EnvironmentalContextProvider {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            solar_peak: config.solar_peak,
            peak_demand: config.peak_demand,
            default_multiplier: config.default_multiplier,
        }
    }

    /// Grid period for `hour`.
    pub fn period_for(&self, hour: HourOfDay) -> GridPeriod {
        if !hour.is_valid() {
            GridPeriod::Standard
        } else if self.solar_peak.contains(hour.0) {
            GridPeriod::SolarPeak
        } else if self.peak_demand.contains(hour.0) {
            GridPeriod::PeakDemand
        } else {
            GridPeriod::Standard
        }
    }

    /// Full context for `hour`. Recomputed on every call.
    pub fn context_for(&self, hour: HourOfDay) -> EnvironmentalContext {
        let period = self.period_for(hour);
        let multiplier = match period {
            GridPeriod::SolarPeak => self.solar_peak.multiplier,
            GridPeriod::PeakDemand => self.peak_demand.multiplier,
            GridPeriod::Standard => self.default_multiplier,
        };
        EnvironmentalContext {
            period,
            label: period.label(),
            multiplier,
            description: period.description(),
        }
    }
}

impl Default for EnvironmentalContextProvider {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(hour: i64) -> EnvironmentalContext {
        EnvironmentalContextProvider::default().context_for(HourOfDay(hour))
    }

    #[test]
    fn solar_peak_window() {
        for h in 10..=16 {
            let c = ctx(h);
            assert_eq!(c.period, GridPeriod::SolarPeak, "hour {h}");
            assert_eq!(c.label, "Lower (Solar Peak)");
            assert_eq!(c.multiplier, 0.8);
            assert_eq!(c.description, "solar energy is more available now");
        }
    }

    #[test]
    fn peak_demand_window() {
        for h in 18..=22 {
            let c = ctx(h);
            assert_eq!(c.period, GridPeriod::PeakDemand, "hour {h}");
            assert_eq!(c.label, "Higher (Peak Demand)");
            assert_eq!(c.multiplier, 1.3);
        }
    }

    #[test]
    fn remaining_hours_are_medium() {
        for h in (0..=9).chain([17, 23]) {
            let c = ctx(h);
            assert_eq!(c.period, GridPeriod::Standard, "hour {h}");
            assert_eq!(c.label, "Medium");
            assert_eq!(c.multiplier, 1.0);
            assert_eq!(c.description, "standard grid mix");
        }
    }

    #[test]
    fn window_edges() {
        assert_eq!(ctx(16).period, GridPeriod::SolarPeak);
        assert_eq!(ctx(17).period, GridPeriod::Standard);
        assert_eq!(ctx(22).period, GridPeriod::PeakDemand);
        assert_eq!(ctx(23).period, GridPeriod::Standard);
    }

    #[test]
    fn off_clock_hours_are_medium() {
        assert_eq!(ctx(-1).period, GridPeriod::Standard);
        assert_eq!(ctx(24).period, GridPeriod::Standard);
        assert_eq!(ctx(i64::MAX).multiplier, 1.0);
    }

    proptest! {
        #[test]
        fn multiplier_is_one_of_three(hour in any::<i64>()) {
            let m = ctx(hour).multiplier;
            prop_assert!(m == 0.8 || m == 1.3 || m == 1.0);
        }
    }
}
