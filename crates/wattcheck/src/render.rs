// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering of estimation results.

use std::io::Write;

use colored::Colorize;
use wattcheck_core::ServiceId;
use wattcheck_estimator::{EnergyEstimate, Estimation, GridPeriod};

/// Write both services' results and the grid context.
pub fn write_estimation(
    w: &mut dyn Write,
    estimation: &Estimation,
    score_max: u8,
    use_color: bool,
) -> std::io::Result<()> {
    for service in [ServiceId::Search, ServiceId::Assistant] {
        let estimate = estimation.get(service);
        writeln!(w, "{}", service_line(estimate, score_max, use_color))?;
    }

    let ctx = &estimation.context;
    let label = if use_color {
        match ctx.period {
            GridPeriod::SolarPeak => ctx.label.green().to_string(),
            GridPeriod::PeakDemand => ctx.label.red().to_string(),
            GridPeriod::Standard => ctx.label.to_string(),
        }
    } else {
        ctx.label.to_string()
    };
    writeln!(
        w,
        "  {:<10} {label} (x{}): {}",
        "grid", ctx.multiplier, ctx.description
    )
}

fn service_line(estimate: &EnergyEstimate, score_max: u8, use_color: bool) -> String {
    let filled = usize::from(estimate.score);
    let empty = usize::from(score_max).saturating_sub(filled);
    let bar = format!("[{}{}]", "#".repeat(filled), ".".repeat(empty));
    let bar = if use_color {
        let third = f64::from(score_max) / 3.0;
        let score = f64::from(estimate.score);
        if score <= third {
            bar.green().to_string()
        } else if score <= 2.0 * third {
            bar.yellow().to_string()
        } else {
            bar.red().to_string()
        }
    } else {
        bar
    };

    let mut line = format!(
        "  {:<10} {bar} {}/{score_max}  {:>9.4} Wh  {:>8.4} g CO2",
        estimate.service.to_string(),
        estimate.score,
        estimate.energy_wh,
        estimate.display_carbon_grams,
    );
    if estimate.estimated_tokens > 0 {
        line.push_str(&format!("  ~{} tokens", estimate.estimated_tokens));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use wattcheck_core::HourOfDay;
    use wattcheck_estimator::EstimationEngine;

    fn render(query: &str, hour: i64) -> String {
        let e = EstimationEngine::default().estimate(query, HourOfDay(hour));
        let mut out = Vec::new();
        write_estimation(&mut out, &e, 6, false).expect("write to vec");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn plain_rendering_of_greeting() {
        let expected = "  search     [#.....] 1/6     0.0400 Wh    0.0147 g CO2\n\
                        \x20 assistant  [#####.] 5/6     2.5000 Wh    0.9175 g CO2  ~500 tokens\n\
                        \x20 grid       Medium (x1): standard grid mix\n";
        assert_eq!(render("hi", 9), expected);
    }

    #[test]
    fn displayed_carbon_reflects_hour() {
        let text = render("hi", 13);
        assert!(text.contains("0.7340 g CO2"), "{text}");
        assert!(text.contains("Lower (Solar Peak) (x0.8)"), "{text}");
        assert!(render("hi", 20).contains("Higher (Peak Demand) (x1.3)"));
    }

    #[test]
    fn plain_rendering_has_no_escape_codes() {
        assert!(!render("write code", 13).contains('\x1b'));
    }
}
