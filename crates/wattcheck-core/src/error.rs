// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Wattcheck estimator.
//!
//! The estimation engine itself never fails; these errors belong to the
//! layers around it (configuration, terminal I/O, outbound handoff).

use thiserror::Error;

/// The primary error type used across the Wattcheck workspace.
#[derive(Debug, Error)]
pub enum WattcheckError {
    /// Configuration errors (invalid TOML, out-of-range constants).
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or filesystem I/O failure.
    #[error("i/o error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// An outbound action (opening a search page, sending to the assistant) failed.
    #[error("handoff error: {message}")]
    Handoff {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An hour supplied at the command line was outside 0-23.
    #[error("hour must be between 0 and 23, got {hour}")]
    InvalidHour { hour: i64 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
