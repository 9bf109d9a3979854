// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./wattcheck.toml` > `~/.config/wattcheck/wattcheck.toml`
//! > `/etc/wattcheck/wattcheck.toml` with environment variable overrides via
//! the `WATTCHECK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::WattcheckConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/wattcheck/wattcheck.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "wattcheck.toml";

/// Section prefixes recognized in `WATTCHECK_*` variable names, longest first
/// so `grid_solar_peak_` wins over `grid_`.
const ENV_SECTIONS: &[(&str, &str)] = &[
    ("grid_solar_peak_", "grid.solar_peak."),
    ("grid_peak_demand_", "grid.peak_demand."),
    ("search_", "search."),
    ("assistant_", "assistant."),
    ("grid_", "grid."),
    ("score_", "score."),
    ("handoff_", "handoff."),
    ("output_", "output."),
];

/// Path of the per-user configuration file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("wattcheck").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/wattcheck/wattcheck.toml` (system-wide)
/// 3. `~/.config/wattcheck/wattcheck.toml` (user XDG config)
/// 4. `./wattcheck.toml` (local directory)
/// 5. `WATTCHECK_*` environment variables
pub fn load_config() -> Result<WattcheckConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
pub fn load_config_from_str(toml_content: &str) -> Result<WattcheckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WattcheckConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<WattcheckConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(WattcheckConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the layered Figment without extracting it.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(WattcheckConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Map a lowercased, prefix-stripped env var name to a dotted config key.
///
/// Uses an explicit section table rather than `Env::split("_")` because key
/// names themselves contain underscores: `WATTCHECK_ASSISTANT_ENERGY_PER_TOKEN_WH`
/// must become `assistant.energy_per_token_wh`.
pub fn env_key_to_path(key: &str) -> String {
    for (prefix, section) in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(prefix) {
            return format!("{section}{rest}");
        }
    }
    key.to_string()
}

fn env_provider() -> Env {
    Env::prefixed("WATTCHECK_").map(|key| env_key_to_path(key.as_str()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(env_key_to_path("search_base_energy_wh"), "search.base_energy_wh");
        assert_eq!(
            env_key_to_path("assistant_energy_per_token_wh"),
            "assistant.energy_per_token_wh"
        );
        assert_eq!(env_key_to_path("grid_intensity_g_per_kwh"), "grid.intensity_g_per_kwh");
        assert_eq!(env_key_to_path("output_log_level"), "output.log_level");
    }

    #[test]
    fn nested_window_keys_take_precedence_over_grid() {
        assert_eq!(
            env_key_to_path("grid_solar_peak_start_hour"),
            "grid.solar_peak.start_hour"
        );
        assert_eq!(
            env_key_to_path("grid_peak_demand_multiplier"),
            "grid.peak_demand.multiplier"
        );
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(env_key_to_path("bogus"), "bogus");
    }

    #[test]
    fn env_overrides_with_jail() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WATTCHECK_GRID_INTENSITY_G_PER_KWH", "400.0");
            jail.set_env("WATTCHECK_GRID_PEAK_DEMAND_MULTIPLIER", "1.5");
            let config: WattcheckConfig = Figment::new()
                .merge(Serialized::defaults(WattcheckConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.grid.intensity_g_per_kwh, 400.0);
            assert_eq!(config.grid.peak_demand.multiplier, 1.5);
            assert_eq!(config.grid.peak_demand.start_hour, 18);
            Ok(())
        });
    }
}
