//! Analytics report types

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::taxonomy::FailureCategory;

/// Recognised shapes in the failure history
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPattern {
    /// Several network failures close together
    RapidNetworkFailures,
    /// Many failures in the session
    ErrorBursts,
    /// The user keeps hitting validation rules
    RepeatingValidationErrors,
}

impl ErrorPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPattern::RapidNetworkFailures => "rapidNetworkFailures",
            ErrorPattern::ErrorBursts => "errorBursts",
            ErrorPattern::RepeatingValidationErrors => "repeatingValidationErrors",
        }
    }
}

impl fmt::Display for ErrorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of the most recent slice of history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "direction", content = "category", rename_all = "camelCase")]
pub enum Trend {
    /// Too few observations to say anything
    InsufficientData,
    /// No category is gaining ground
    Stable,
    /// This category is occurring more often than before
    Increasing(FailureCategory),
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::InsufficientData => write!(f, "insufficient data"),
            Trend::Stable => write!(f, "stable"),
            Trend::Increasing(category) => write!(f, "{} increasing", category),
        }
    }
}

/// Snapshot of the analytics history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub total_errors: usize,
    pub most_common_category: Option<FailureCategory>,
    pub counts_by_category: BTreeMap<FailureCategory, usize>,
    pub patterns: BTreeSet<ErrorPattern>,
    pub trend: Trend,
    /// One-line summary for logs and debug screens
    pub debug_description: String,
}

impl AnalyticsReport {
    pub fn has_pattern(&self, pattern: ErrorPattern) -> bool {
        self.patterns.contains(&pattern)
    }

    pub(super) fn describe(
        total: usize,
        most_common: Option<(FailureCategory, usize)>,
        patterns: &BTreeSet<ErrorPattern>,
        trend: Trend,
    ) -> String {
        let Some((category, count)) = most_common else {
            return "No errors observed".to_string();
        };
        let mut text = format!(
            "{} errors observed; most common: {} ({})",
            total, category, count
        );
        if !patterns.is_empty() {
            let names: Vec<_> = patterns.iter().map(ErrorPattern::as_str).collect();
            text.push_str(&format!("; patterns: {}", names.join(", ")));
        }
        text.push_str(&format!("; trend: {}", trend));
        text
    }
}
