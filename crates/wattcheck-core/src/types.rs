// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Wattcheck workspace.

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::WattcheckError;

/// Identifies which service answered (or would answer) a query.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ServiceId {
    /// A conventional web search engine.
    Search,
    /// A generative AI assistant.
    Assistant,
}

/// An hour of the local day.
///
/// Kept signed so callers can pass through whatever their clock or CLI gave
/// them; values outside 0-23 are absorbed downstream rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourOfDay(pub i64);

impl HourOfDay {
    /// Whether the hour lies on the 24-hour clock.
    pub fn is_valid(self) -> bool {
        (0..24).contains(&self.0)
    }

    /// Strict constructor for user-facing inputs.
    pub fn checked(hour: i64) -> Result<Self, WattcheckError> {
        let h = Self(hour);
        if h.is_valid() {
            Ok(h)
        } else {
            Err(WattcheckError::InvalidHour { hour })
        }
    }
}

impl std::fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// The current local hour of the machine's clock.
pub fn local_hour() -> HourOfDay {
    HourOfDay(i64::from(chrono::Local::now().hour()))
}
