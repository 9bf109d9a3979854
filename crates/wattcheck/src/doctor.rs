// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `wattcheck doctor` command implementation.
//!
//! Reports whether the loaded configuration still produces meaningful,
//! comparable scores and whether outbound actions can run on this machine.

use std::path::Path;

use colored::Colorize;
use wattcheck_config::model::{HourWindow, WattcheckConfig};
use wattcheck_core::{local_hour, WattcheckError};
use wattcheck_estimator::{EnergyModel, EnvironmentalContextProvider, ScoreMapper};

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &'static str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name,
            status,
            message: message.into(),
        }
    }
}

/// Run the `wattcheck doctor` command.
pub fn run_doctor(
    config: &WattcheckConfig,
    config_path: Option<&Path>,
    use_color: bool,
) -> Result<(), WattcheckError> {
    let results = vec![
        check_config(config_path),
        check_calibration(config),
        check_score_range(config),
        check_grid_windows(config),
        check_opener(std::env::var_os("PATH").as_deref()),
    ];

    println!();
    println!("  wattcheck doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        let tag = match result.status {
            CheckStatus::Pass => status_tag("[OK]  ", "✓", use_color, |s| s.green()),
            CheckStatus::Warn => {
                warn_count += 1;
                status_tag("[WARN]", "!", use_color, |s| s.yellow())
            }
            CheckStatus::Fail => {
                fail_count += 1;
                status_tag("[FAIL]", "✗", use_color, |s| s.red())
            }
        };
        println!("    {tag} {:<14} {}", result.name, result.message);
    }

    println!("  {}", "-".repeat(50));
    println!(
        "  {} checks, {warn_count} warnings, {fail_count} failures",
        results.len()
    );
    println!();

    if fail_count > 0 {
        return Err(WattcheckError::Config(format!("{fail_count} doctor check(s) failed")));
    }
    Ok(())
}

fn status_tag(
    plain: &str,
    symbol: &str,
    use_color: bool,
    paint: impl Fn(&str) -> colored::ColoredString,
) -> String {
    if use_color {
        paint(symbol).to_string()
    } else {
        plain.to_string()
    }
}

/// Check configuration loads without errors.
fn check_config(config_path: Option<&Path>) -> CheckResult {
    let (loaded, source) = match config_path {
        Some(p) => (
            wattcheck_config::load_and_validate_path(p),
            p.display().to_string(),
        ),
        None => (
            wattcheck_config::load_and_validate(),
            "defaults + XDG files + WATTCHECK_* env".to_string(),
        ),
    };
    match loaded {
        Ok(_) => CheckResult::new("config", CheckStatus::Pass, format!("valid ({source})")),
        Err(errors) => CheckResult::new(
            "config",
            CheckStatus::Fail,
            format!("{} error(s) in {source}", errors.len()),
        ),
    }
}

fn check_calibration(config: &WattcheckConfig) -> CheckResult {
    let reference = WattcheckConfig::default();
    let changed: Vec<&str> = [
        ("search", config.search != reference.search),
        ("assistant", config.assistant != reference.assistant),
        ("grid", config.grid != reference.grid),
        ("score", config.score != reference.score),
    ]
    .into_iter()
    .filter_map(|(name, differs)| differs.then_some(name))
    .collect();

    if changed.is_empty() {
        CheckResult::new("calibration", CheckStatus::Pass, "reference constants")
    } else {
        CheckResult::new(
            "calibration",
            CheckStatus::Warn,
            format!(
                "custom [{}]; scores are not comparable with default installs",
                changed.join(", ")
            ),
        )
    }
}

fn check_score_range(config: &WattcheckConfig) -> CheckResult {
    let scorer = ScoreMapper::from_config(config);
    let assistant = EnergyModel::assistant(&config.assistant);
    let floor = scorer.score(assistant.base_energy_wh());
    let reference = scorer.score(
        assistant.energy_wh(1.0, u64::from(config.assistant.tokens_per_query_reference)),
    );

    if floor >= config.score.max {
        CheckResult::new(
            "score range",
            CheckStatus::Warn,
            format!("assistant overhead alone scores {floor}; the scale is saturated"),
        )
    } else {
        CheckResult::new(
            "score range",
            CheckStatus::Pass,
            format!(
                "search anchor {} Wh = {}, plain assistant answer = {reference}",
                scorer.anchor_wh(),
                config.score.min
            ),
        )
    }
}

fn check_grid_windows(config: &WattcheckConfig) -> CheckResult {
    let describe = |w: &HourWindow| format!("{}-{} x{}", w.start_hour, w.end_hour, w.multiplier);
    let now = local_hour();
    let context = EnvironmentalContextProvider::new(&config.grid).context_for(now);
    CheckResult::new(
        "grid",
        CheckStatus::Pass,
        format!(
            "solar {}, peak {}, else x{}; now {now} is {}",
            describe(&config.grid.solar_peak),
            describe(&config.grid.peak_demand),
            config.grid.default_multiplier,
            context.label
        ),
    )
}

fn check_opener(path_var: Option<&std::ffi::OsStr>) -> CheckResult {
    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(target_os = "windows") {
        &["explorer.exe"]
    } else {
        &["xdg-open"]
    };

    let found = path_var.is_some_and(|paths| {
        std::env::split_paths(paths)
            .any(|dir| candidates.iter().any(|c| dir.join(c).is_file()))
    });

    if found {
        CheckResult::new("opener", CheckStatus::Pass, candidates.join(", "))
    } else {
        CheckResult::new(
            "opener",
            CheckStatus::Warn,
            format!("{} not on PATH; --open-search will only print the url", candidates.join(", ")),
        )
    }
}
