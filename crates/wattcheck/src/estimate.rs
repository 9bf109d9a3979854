// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `wattcheck estimate` command implementation.
//!
//! Estimates one query and optionally hands it off: `--open-search` opens
//! the search page, `--send` writes the query to stdout for an assistant
//! CLI reading from a pipe. With `--send` the results go to stderr so stdout
//! carries nothing but the query.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use tracing::warn;
use wattcheck_config::WattcheckConfig;
use wattcheck_core::{local_hour, HourOfDay, WattcheckError};
use wattcheck_estimator::{
    hand_to_assistant, search_url, Breakdown, Estimation, EstimationEngine, HostInput,
};

use crate::render;

/// Arguments for `wattcheck estimate`.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// The query text. Multiple words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Hour of day (0-23) to estimate at. Defaults to the local hour.
    #[arg(long, allow_negative_numbers = true)]
    pub hour: Option<i64>,

    /// Print machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Include the step-by-step breakdown.
    #[arg(long)]
    pub details: bool,

    /// Open the search page for the query.
    #[arg(long)]
    pub open_search: bool,

    /// Write the query to stdout for an assistant reading from a pipe.
    #[arg(long)]
    pub send: bool,
}

#[derive(Serialize)]
struct DetailedOutput<'a> {
    #[serde(flatten)]
    estimation: &'a Estimation,
    breakdown: &'a Breakdown,
}

/// A [`HostInput`] backed by any writer: the text verbatim, then a newline.
pub struct WriterInput<W: Write> {
    writer: W,
}

impl<W: Write> WriterInput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> HostInput for WriterInput<W> {
    fn set_text(&mut self, text: &str) -> std::io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    fn confirm(&mut self) -> std::io::Result<()> {
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Resolve `--hour`, falling back to the local clock.
pub fn resolve_hour(hour: Option<i64>) -> Result<HourOfDay, WattcheckError> {
    hour.map(HourOfDay::checked).unwrap_or_else(|| Ok(local_hour()))
}

/// Run the `wattcheck estimate` command.
pub fn run_estimate(
    config: &WattcheckConfig,
    args: &EstimateArgs,
    use_color: bool,
) -> Result<(), WattcheckError> {
    let query = args.query.join(" ");
    let hour = resolve_hour(args.hour)?;
    let engine = EstimationEngine::new(config);

    let (estimation, breakdown) = if args.details {
        let (e, b) = Breakdown::explain(&engine, &query, hour);
        (e, Some(b))
    } else {
        (engine.estimate(&query, hour), None)
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut report: Box<dyn Write> = if args.send {
        Box::new(stderr.lock())
    } else {
        Box::new(stdout.lock())
    };

    if args.json {
        let json = match &breakdown {
            Some(b) => serde_json::to_string_pretty(&DetailedOutput {
                estimation: &estimation,
                breakdown: b,
            }),
            None => serde_json::to_string_pretty(&estimation),
        }
        .map_err(|e| WattcheckError::Internal(format!("failed to serialize estimate: {e}")))?;
        writeln!(report, "{json}")?;
    } else {
        render::write_estimation(&mut report, &estimation, config.score.max, use_color)?;
        if let Some(b) = &breakdown {
            writeln!(report)?;
            writeln!(report, "{b}")?;
        }
    }

    if args.open_search {
        let url = search_url(&config.handoff.search_url, &query);
        writeln!(report, "{url}")?;
        if let Err(e) = open_in_browser(&url) {
            warn!(error = %e, "could not open browser; open the url above manually");
        }
    }
    drop(report);

    if args.send {
        let mut input = WriterInput::new(stdout.lock());
        hand_to_assistant(Some(&mut input), &query)?;
    }

    Ok(())
}

/// Open `url` with the platform's default handler.
fn open_in_browser(url: &str) -> Result<(), WattcheckError> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    std::process::Command::new(opener)
        .arg(url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| WattcheckError::Handoff {
            message: format!("failed to launch {opener}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_hour_is_validated() {
        assert_eq!(resolve_hour(Some(13)).unwrap(), HourOfDay(13));
        assert!(matches!(
            resolve_hour(Some(24)),
            Err(WattcheckError::InvalidHour { hour: 24 })
        ));
    }

    #[test]
    fn missing_hour_uses_clock() {
        assert!(resolve_hour(None).unwrap().is_valid());
    }

    #[test]
    fn writer_input_writes_literal_query_then_newline() {
        let mut buf = Vec::new();
        {
            let mut input = WriterInput::new(&mut buf);
            assert!(hand_to_assistant(Some(&mut input), "what's 2+2?").unwrap());
        }
        assert_eq!(buf, b"what's 2+2?\n");
    }

    #[test]
    fn detailed_json_flattens_estimation() {
        let engine = EstimationEngine::default();
        let (e, b) = Breakdown::explain(&engine, "hi", HourOfDay(9));
        let json = serde_json::to_value(DetailedOutput {
            estimation: &e,
            breakdown: &b,
        })
        .unwrap();
        assert_eq!(json["assistant"]["score"], 5);
        assert_eq!(json["breakdown"]["estimated_tokens"], 500);
    }
}
