// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Wattcheck energy estimator.
//!
//! This crate provides the error type and the small identifier types shared
//! by the configuration, estimator and CLI crates.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WattcheckError;
pub use types::{local_hour, HourOfDay, ServiceId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wattcheck_error_has_all_variants() {
        let _config = WattcheckError::Config("test".into());
        let _io = WattcheckError::Io {
            source: std::io::Error::other("test"),
        };
        let _handoff = WattcheckError::Handoff {
            message: "test".into(),
            source: None,
        };
        let _hour = WattcheckError::InvalidHour { hour: 24 };
        let _internal = WattcheckError::Internal("test".into());
    }

    #[test]
    fn service_id_has_two_variants() {
        use std::str::FromStr;
        use strum::IntoEnumIterator;

        let variants: Vec<ServiceId> = ServiceId::iter().collect();
        assert_eq!(variants, vec![ServiceId::Search, ServiceId::Assistant]);

        for variant in &variants {
            let s = variant.to_string();
            let parsed = ServiceId::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn service_id_serializes_lowercase() {
        let json = serde_json::to_string(&ServiceId::Assistant).expect("should serialize");
        assert_eq!(json, "\"assistant\"");
    }
}
