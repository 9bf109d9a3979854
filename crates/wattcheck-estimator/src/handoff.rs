// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound actions taken once the user has picked a service.
//!
//! Searching builds a URL with the query percent-encoded as a parameter.
//! Asking the assistant writes the literal query into a host input and
//! confirms it. A missing host input is skipped, never an error.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{info, warn};

/// Characters left unescaped in a query component (RFC 3986 unreserved).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Search page URL for `query`: `base` followed by the percent-encoded query.
pub fn search_url(base: &str, query: &str) -> String {
    let url = format!("{base}{}", utf8_percent_encode(query, QUERY_COMPONENT));
    info!(url = url.as_str(), "built search url");
    url
}

/// A text input owned by the host that can receive and submit a query.
pub trait HostInput {
    /// Replace the input's contents with `text`, verbatim.
    fn set_text(&mut self, text: &str) -> std::io::Result<()>;

    /// Perform the confirming action (the equivalent of pressing Enter).
    fn confirm(&mut self) -> std::io::Result<()>;
}

/// Send `query` to the assistant through `host`.
///
/// Returns `Ok(false)` without doing anything when there is no host input.
pub fn hand_to_assistant(host: Option<&mut dyn HostInput>, query: &str) -> std::io::Result<bool> {
    let Some(host) = host else {
        warn!("no assistant input available, skipping handoff");
        return Ok(false);
    };
    host.set_text(query)?;
    host.confirm()?;
    info!(chars = query.chars().count(), "query handed to assistant");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[derive(Default)]
    struct RecordingInput {
        text: String,
        confirmations: usize,
    }

    impl HostInput for RecordingInput {
        fn set_text(&mut self, text: &str) -> std::io::Result<()> {
            self.text = text.to_string();
            Ok(())
        }

        fn confirm(&mut self) -> std::io::Result<()> {
            self.confirmations += 1;
            Ok(())
        }
    }

    #[test]
    fn search_url_encodes_query() {
        let url = search_url("https://www.google.com/search?q=", "what is 2+2 & why?");
        assert_eq!(
            url,
            "https://www.google.com/search?q=what%20is%202%2B2%20%26%20why%3F"
        );
    }

    #[test]
    fn search_url_encodes_utf8() {
        assert_eq!(search_url("s?q=", "café"), "s?q=caf%C3%A9");
        assert_eq!(search_url("s?q=", "a-b_c.d~e"), "s?q=a-b_c.d~e");
    }

    #[test]
    fn hands_literal_text_and_confirms_once() {
        let mut input = RecordingInput::default();
        let sent = hand_to_assistant(Some(&mut input), "  Keep  spacing & symbols?  ").unwrap();
        assert!(sent);
        assert_eq!(input.text, "  Keep  spacing & symbols?  ");
        assert_eq!(input.confirmations, 1);
    }

    #[test]
    #[traced_test]
    fn missing_input_is_skipped() {
        let sent = hand_to_assistant(None, "hello").unwrap();
        assert!(!sent);
        assert!(logs_contain("skipping handoff"));
    }
}
