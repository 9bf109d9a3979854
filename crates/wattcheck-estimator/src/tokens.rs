// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response length estimation.
//!
//! Predicts how many tokens an assistant would generate for a query, from
//! its complexity and a few phrasing cues that stretch or shrink answers.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A multiplicative adjustment triggered by phrasing in the query.
pub struct LengthAdjustment {
    /// Stable adjustment name, reported in breakdowns.
    pub name: &'static str,
    /// Case-insensitive pattern matched against the query.
    pub pattern: Regex,
    /// Factor applied to the running estimate on a match.
    pub factor: f64,
}

impl LengthAdjustment {
    fn new(name: &'static str, pattern: &str, factor: f64) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("length adjustment pattern is a valid regex"),
            factor,
        }
    }
}

/// Adjustments in application order; several may apply to one query.
pub static LENGTH_ADJUSTMENTS: LazyLock<Vec<LengthAdjustment>> = LazyLock::new(|| {
    vec![
        LengthAdjustment::new("code", r"(?i)\b(cod(e|ing)|program|script)", 1.5),
        LengthAdjustment::new(
            "walkthrough",
            r"(?i)\b(lists?|steps?|step-by-step|tutorials?)\b",
            1.2,
        ),
        LengthAdjustment::new("brief", r"(?i)\b(yes|no|simple|quick(ly)?)\b", 0.3),
    ]
});

/// The outcome of estimating one response length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenEstimate {
    /// Rounded token count.
    pub tokens: u64,
    /// `tokens_per_query_reference * complexity`, before adjustments.
    pub base: f64,
    /// Names and factors of the adjustments that applied, in order.
    pub applied: Vec<(&'static str, f64)>,
}

/// Converts a complexity assessment into an expected output-token count.
#[derive(Debug, Clone, Copy)]
pub struct ResponseLengthEstimator {
    tokens_per_query_reference: u32,
}

impl ResponseLengthEstimator {
    pub fn new(tokens_per_query_reference: u32) -> Self {
        Self {
            tokens_per_query_reference,
        }
    }

    /// Rounded token estimate for `query` at the given complexity.
    pub fn estimate_tokens(&self, query: &str, complexity: f64) -> u64 {
        self.estimate(query, complexity).tokens
    }

    /// Token estimate with the adjustments that produced it.
    pub fn estimate(&self, query: &str, complexity: f64) -> TokenEstimate {
        let base = f64::from(self.tokens_per_query_reference) * complexity;
        let mut tokens = base;
        let mut applied = Vec::new();
        for adjustment in LENGTH_ADJUSTMENTS.iter() {
            if adjustment.pattern.is_match(query) {
                tokens *= adjustment.factor;
                applied.push((adjustment.name, adjustment.factor));
            }
        }

        TokenEstimate {
            // Negative or NaN products cannot arise from a validated config;
            // the cast saturates them to zero regardless.
            tokens: tokens.round().max(0.0) as u64,
            base,
            applied,
        }
    }
}

impl Default for ResponseLengthEstimator {
    fn default() -> Self {
        Self::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_query_uses_reference() {
        let e = ResponseLengthEstimator::default();
        assert_eq!(e.estimate_tokens("hi", 1.0), 500);
        assert_eq!(e.estimate_tokens("tell me about owls", 2.5), 1250);
    }

    #[test]
    fn code_terms_stretch_response() {
        let e = ResponseLengthEstimator::default();
        let est = e.estimate("write a detailed comprehensive analysis of code performance", 4.0);
        assert_eq!(est.tokens, 3000);
        assert_eq!(est.applied, vec![("code", 1.5)]);
    }

    #[test]
    fn walkthrough_terms_stretch_response() {
        let e = ResponseLengthEstimator::default();
        assert_eq!(e.estimate_tokens("give me the steps", 1.0), 600);
        assert_eq!(e.estimate_tokens("a tutorial on knots", 1.0), 600);
    }

    #[test]
    fn brief_terms_shrink_response() {
        let e = ResponseLengthEstimator::default();
        assert_eq!(e.estimate_tokens("yes or no: is it raining", 1.0), 150);
        assert_eq!(e.estimate_tokens("quick question", 1.0), 150);
        // "no" must be its own word.
        assert_eq!(e.estimate_tokens("i know nothing", 1.0), 500);
    }

    #[test]
    fn adjustments_compound_in_order() {
        let e = ResponseLengthEstimator::default();
        let est = e.estimate("simple script steps", 1.0);
        // 500 * 1.5 * 1.2 * 0.3 = 270
        assert_eq!(est.tokens, 270);
        assert_eq!(
            est.applied.iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            vec!["code", "walkthrough", "brief"]
        );
    }

    #[test]
    fn result_is_rounded_to_nearest() {
        let e = ResponseLengthEstimator::new(333);
        // 333 * 1.5 = 499.5 -> 500
        assert_eq!(e.estimate_tokens("hello", 1.5), 500);
        // 333 * 0.3 = 99.9 -> 100
        assert_eq!(e.estimate_tokens("quick", 1.0), 100);
    }

    proptest! {
        #[test]
        fn tokens_grow_with_complexity(query in "[a-z ]{0,60}", a in 1.0f64..4.0, b in 1.0f64..4.0) {
            let e = ResponseLengthEstimator::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(e.estimate_tokens(&query, lo) <= e.estimate_tokens(&query, hi));
        }
    }
}
