// SPDX-FileCopyrightText: 2026 Wattcheck Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query complexity assessment.
//!
//! Scores how computationally demanding a query is likely to be on a
//! 1.0-4.0 scale from its length and a table of weighted keyword families.
//! No model call, no network, no state.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Complexity of a query with no length bonus and no keyword match.
pub const MIN_COMPLEXITY: f64 = 1.0;

/// Upper clamp for the assessment.
pub const MAX_COMPLEXITY: f64 = 4.0;

/// Word counts above these thresholds add cumulative bonuses.
const LENGTH_BONUSES: &[(usize, f64)] = &[(50, 0.5), (100, 1.0)];

/// A named group of keywords that raises the assessment by a fixed weight.
pub struct KeywordFamily {
    /// Stable family name, reported in breakdowns.
    pub name: &'static str,
    /// Case-insensitive pattern matched anywhere in the query.
    pub pattern: Regex,
    /// Amount added to the assessment when the pattern matches.
    pub weight: f64,
}

impl KeywordFamily {
    fn new(name: &'static str, pattern: &str, weight: f64) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("keyword family pattern is a valid regex"),
            weight,
        }
    }

    /// Whether the family matches `query`.
    pub fn matches(&self, query: &str) -> bool {
        self.pattern.is_match(query)
    }
}

/// Keyword families, all additive and independent of each other.
pub static KEYWORD_FAMILIES: LazyLock<Vec<KeywordFamily>> = LazyLock::new(|| {
    vec![
        KeywordFamily::new(
            "code",
            r"(?i)\b(cod(e|ing)|program|script|function|debug|fix|algorithm)",
            1.5,
        ),
        KeywordFamily::new(
            "creative",
            r"(?i)\b(writ(e|ing|ten)|create|stor(y|ies)|poem|essay|draft|design)",
            1.0,
        ),
        KeywordFamily::new(
            "analytical",
            r"(?i)\b(analy[sz]|explain|compar(e|ison)|summar|break ?down|research)",
            0.5,
        ),
        KeywordFamily::new(
            "depth",
            r"(?i)\b(complex|detailed|comprehensive|thorough|in[- ]depth)",
            0.5,
        ),
    ]
});

/// The outcome of assessing one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityAssessment {
    /// Clamped assessment in `[MIN_COMPLEXITY, MAX_COMPLEXITY]`.
    pub value: f64,
    /// Sum before clamping.
    pub raw: f64,
    /// Whitespace-separated words; an empty query counts as one.
    pub word_count: usize,
    /// Bonus contributed by query length.
    pub length_bonus: f64,
    /// Names of the keyword families that matched, in table order.
    pub matched_families: Vec<&'static str>,
}

impl ComplexityAssessment {
    /// Whether the sum was cut down to the maximum.
    pub fn was_clamped(&self) -> bool {
        self.raw > self.value
    }
}

/// Stateless complexity analyzer over [`KEYWORD_FAMILIES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexityAnalyzer;

impl ComplexityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Clamped complexity of `query`.
    pub fn analyze(&self, query: &str) -> f64 {
        self.assess(query).value
    }

    /// Full assessment of `query`, including which signals fired.
    pub fn assess(&self, query: &str) -> ComplexityAssessment {
        // Splitting an empty string still yields one (empty) word.
        let word_count = query.split_whitespace().count().max(1);
        let length_bonus = Self::length_bonus(word_count);

        let mut raw = MIN_COMPLEXITY + length_bonus;
        let mut matched_families = Vec::new();
        for family in KEYWORD_FAMILIES.iter() {
            if family.matches(query) {
                raw += family.weight;
                matched_families.push(family.name);
            }
        }

        ComplexityAssessment {
            value: raw.min(MAX_COMPLEXITY),
            raw,
            word_count,
            length_bonus,
            matched_families,
        }
    }

    fn length_bonus(word_count: usize) -> f64 {
        LENGTH_BONUSES
            .iter()
            .filter(|(threshold, _)| word_count > *threshold)
            .map(|(_, bonus)| bonus)
            .sum()
    }
}
