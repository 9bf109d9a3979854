// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Energy to carbon conversion.
//!
//! Two figures come out of here. The unadjusted one uses the flat grid
//! intensity and is what scoring sees. The displayed one additionally
//! applies the time-of-day multiplier and is never fed back into a score.

use wattcheck_config::model::GridConfig;

use crate::context::EnvironmentalContext;

/// Converts Wh to grams of CO2 at a fixed grid intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarbonConverter {
    intensity_g_per_kwh: f64,
}

impl CarbonConverter {
    pub fn new(intensity_g_per_kwh: f64) -> Self {
        Self {
            intensity_g_per_kwh,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.intensity_g_per_kwh)
    }

    pub fn intensity_g_per_kwh(&self) -> f64 {
        self.intensity_g_per_kwh
    }

    /// Grams of CO2 for `energy_wh`, with no time-of-day adjustment.
    pub fn carbon_grams(&self, energy_wh: f64) -> f64 {
        (energy_wh / 1000.0) * self.intensity_g_per_kwh
    }

    /// The display figure: unadjusted carbon scaled by the context multiplier.
    pub fn display_carbon_grams(unadjusted_grams: f64, context: &EnvironmentalContext) -> f64 {
        unadjusted_grams * context.multiplier
    }
}

impl Default for CarbonConverter {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EnvironmentalContextProvider;
    use wattcheck_core::HourOfDay;

    #[test]
    fn converts_with_reference_intensity() {
        let c = CarbonConverter::default();
        assert!((c.carbon_grams(2.5) - 0.9175).abs() < 1e-12);
        assert!((c.carbon_grams(0.04) - 0.01468).abs() < 1e-12);
        assert_eq!(c.carbon_grams(0.0), 0.0);
    }

    #[test]
    fn display_figure_applies_multiplier() {
        let provider = EnvironmentalContextProvider::default();
        let peak = provider.context_for(HourOfDay(20));
        let solar = provider.context_for(HourOfDay(12));
        assert!((CarbonConverter::display_carbon_grams(1.0, &peak) - 1.3).abs() < 1e-12);
        assert!((CarbonConverter::display_carbon_grams(1.0, &solar) - 0.8).abs() < 1e-12);
    }
}
