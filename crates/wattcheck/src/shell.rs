// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `wattcheck shell` command implementation.
//!
//! A readline REPL: every line is a query, estimated once. Lines starting
//! with `:` are shell commands.

use std::io::Write;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use wattcheck_config::WattcheckConfig;
use wattcheck_core::{local_hour, HourOfDay, WattcheckError};
use wattcheck_estimator::{
    search_url, Breakdown, Estimation, EstimationEngine, PanelState, SubmissionController,
    SubmissionHandler,
};

use crate::render;

const HELP: &str = "\
  :details        toggle the step-by-step breakdown
  :hour <H|now>   estimate at hour H (0-23), or follow the clock
  :search         print the search url for the last query
  :help           show this help
  :quit           leave the shell";

/// Estimates submissions, explaining them when the details panel is open.
struct ShellHandler {
    engine: EstimationEngine,
    panel: PanelState,
}

impl SubmissionHandler for ShellHandler {
    type Output = (Estimation, Option<Breakdown>);

    fn on_submit(&mut self, query: &str, hour: HourOfDay) -> Self::Output {
        if self.panel.is_expanded() {
            let (estimation, breakdown) = Breakdown::explain(&self.engine, query, hour);
            (estimation, Some(breakdown))
        } else {
            (self.engine.estimate(query, hour), None)
        }
    }
}

/// A parsed shell input line.
#[derive(Debug, PartialEq)]
enum ShellInput<'a> {
    Query(&'a str),
    ToggleDetails,
    SetHour(Option<HourOfDay>),
    Search,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

fn parse_line(line: &str) -> ShellInput<'_> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return if trimmed.is_empty() {
            ShellInput::Empty
        } else {
            ShellInput::Query(line)
        };
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("details"), None) => ShellInput::ToggleDetails,
        (Some("search"), None) => ShellInput::Search,
        (Some("help"), None) => ShellInput::Help,
        (Some("quit" | "q" | "exit"), None) => ShellInput::Quit,
        (Some("hour"), Some("now")) => ShellInput::SetHour(None),
        (Some("hour"), Some(h)) => match h.parse::<i64>().map(HourOfDay::checked) {
            Ok(Ok(hour)) => ShellInput::SetHour(Some(hour)),
            _ => ShellInput::Invalid(format!("not an hour of day: {h}")),
        },
        _ => ShellInput::Invalid(format!("unknown command `:{command}`, try :help")),
    }
}

/// Runs the `wattcheck shell` REPL.
pub fn run_shell(config: &WattcheckConfig, use_color: bool) -> Result<(), WattcheckError> {
    let mut editor = DefaultEditor::new()
        .map_err(|e| WattcheckError::Internal(format!("failed to start line editor: {e}")))?;

    let mut controller = SubmissionController::new(ShellHandler {
        engine: EstimationEngine::new(config),
        panel: PanelState::default(),
    });
    controller.ensure_bound();

    let mut fixed_hour: Option<HourOfDay> = None;
    let mut last_query: Option<String> = None;
    let mut out = std::io::stdout().lock();

    writeln!(out, "wattcheck shell - type a query, or :help")?;
    let prompt = if use_color {
        "wattcheck> ".cyan().bold().to_string()
    } else {
        "wattcheck> ".to_string()
    };

    loop {
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(WattcheckError::Internal(format!("readline failed: {e}"))),
        };

        match parse_line(&line) {
            ShellInput::Empty => continue,
            ShellInput::Quit => break,
            ShellInput::Help => {
                writeln!(out, "{HELP}")?;
                let details = controller.handler().panel.is_expanded();
                writeln!(out, "details are {}", if details { "on" } else { "off" })?;
            }
            ShellInput::ToggleDetails => {
                let state = controller.handler_mut().panel.toggle();
                writeln!(
                    out,
                    "details {}",
                    if state.is_expanded() { "on" } else { "off" }
                )?;
            }
            ShellInput::SetHour(hour) => {
                fixed_hour = hour;
                match hour {
                    Some(h) => writeln!(out, "estimating at {h}")?,
                    None => writeln!(out, "following the local clock")?,
                }
            }
            ShellInput::Search => match &last_query {
                Some(q) => writeln!(out, "{}", search_url(&config.handoff.search_url, q))?,
                None => writeln!(out, "no query yet")?,
            },
            ShellInput::Invalid(message) => writeln!(out, "{message}")?,
            ShellInput::Query(query) => {
                let _ = editor.add_history_entry(query);
                let hour = fixed_hour.unwrap_or_else(local_hour);
                debug!(%hour, "shell submission");
                if let Some((estimation, breakdown)) = controller.submit(query, hour) {
                    render::write_estimation(&mut out, &estimation, config.score.max, use_color)?;
                    if let Some(b) = breakdown {
                        writeln!(out, "\n{b}\n")?;
                    }
                }
                last_query = Some(query.to_string());
            }
        }
    }

    controller.unbind();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_queries() {
        assert_eq!(parse_line("how tall is everest"), ShellInput::Query("how tall is everest"));
        assert_eq!(parse_line("   "), ShellInput::Empty);
    }

    #[test]
    fn commands_parse() {
        assert_eq!(parse_line(":details"), ShellInput::ToggleDetails);
        assert_eq!(parse_line(" :quit "), ShellInput::Quit);
        assert_eq!(parse_line(":search"), ShellInput::Search);
        assert_eq!(parse_line(":hour now"), ShellInput::SetHour(None));
        assert_eq!(parse_line(":hour 7"), ShellInput::SetHour(Some(HourOfDay(7))));
    }

    #[test]
    fn bad_commands_are_reported() {
        assert!(matches!(parse_line(":hour 25"), ShellInput::Invalid(_)));
        assert!(matches!(parse_line(":hour noon"), ShellInput::Invalid(_)));
        assert!(matches!(parse_line(":frobnicate"), ShellInput::Invalid(_)));
    }

    #[test]
    fn handler_explains_only_when_expanded() {
        let mut handler = ShellHandler {
            engine: EstimationEngine::default(),
            panel: PanelState::default(),
        };
        assert!(handler.on_submit("hi", HourOfDay(9)).1.is_none());
        handler.panel.toggle();
        let (estimation, breakdown) = handler.on_submit("hi", HourOfDay(9));
        assert_eq!(breakdown.map(|b| b.assistant.score), Some(estimation.assistant.score));
    }
}
