//! Observation history and report computation

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::report::{AnalyticsReport, ErrorPattern, Trend};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::record::ErrorRecord;
use crate::taxonomy::FailureCategory;

/// Pattern and trend thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Width of the sliding window for rapid network failures
    pub window_secs: u64,
    /// Network failures within one window that count as rapid
    pub rapid_network_threshold: usize,
    /// Total observations that count as a burst
    pub burst_threshold: usize,
    /// Validation failures that count as repeating
    pub repeating_validation_threshold: usize,
    /// Most recent observations compared against the rest for the trend
    pub trend_slice: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            rapid_network_threshold: 3,
            burst_threshold: 5,
            repeating_validation_threshold: 3,
            trend_slice: 5,
        }
    }
}

impl AnalyticsConfig {
    pub fn window(&self) -> Duration {
        i64::try_from(self.window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

/// One failure seen by the analytics engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub category: FailureCategory,
    pub timestamp: DateTime<Utc>,
}

/// Accumulates observations for the session and reports on them
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    config: AnalyticsConfig,

    /// Insertion order
    history: Mutex<Vec<Observation>>,

    metrics: Option<Arc<MetricsRegistry>>,
}

impl AnalyticsEngine {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            config,
            history: Mutex::new(Vec::new()),
            metrics: None,
        }
    }

    pub fn with_metrics(config: AnalyticsConfig, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            metrics: Some(metrics),
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Append an observation
    pub fn observe(&self, category: FailureCategory, timestamp: DateTime<Utc>) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Observation { category, timestamp });
        if let Some(metrics) = self.metrics.as_deref() {
            metrics.increment_observations();
        }
    }

    pub fn observe_record(&self, record: &ErrorRecord) {
        self.observe(record.category(), record.timestamp());
    }

    /// Snapshot of the history in insertion order
    pub fn history(&self) -> Vec<Observation> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Compute a report over the full history
    pub fn report(&self) -> AnalyticsReport {
        let history = self.history();

        let counts = count_by_category(history.iter());
        let most_common = most_common(&history, &counts);
        let patterns = self.detect_patterns(&history, &counts);
        let trend = self.trend(&history);
        let debug_description =
            AnalyticsReport::describe(history.len(), most_common, &patterns, trend);

        let total = history.len().to_string();
        let top = most_common.map_or("none", |(c, _)| c.as_str());
        log_event_with_fields(
            Event::AnalyticsReport,
            &[("most_common", top), ("total", &total)],
        );

        AnalyticsReport {
            total_errors: history.len(),
            most_common_category: most_common.map(|(c, _)| c),
            counts_by_category: counts,
            patterns,
            trend,
            debug_description,
        }
    }

    fn detect_patterns(
        &self,
        history: &[Observation],
        counts: &BTreeMap<FailureCategory, usize>,
    ) -> BTreeSet<ErrorPattern> {
        let mut patterns = BTreeSet::new();

        let mut network: Vec<_> = history
            .iter()
            .filter(|o| o.category == FailureCategory::NetworkFailure)
            .map(|o| o.timestamp)
            .collect();
        network.sort();
        if has_cluster(&network, self.config.rapid_network_threshold, self.config.window()) {
            patterns.insert(ErrorPattern::RapidNetworkFailures);
        }

        if history.len() >= self.config.burst_threshold {
            patterns.insert(ErrorPattern::ErrorBursts);
        }

        let validation: usize = counts
            .iter()
            .filter(|(c, _)| c.is_validation())
            .map(|(_, n)| n)
            .sum();
        if validation >= self.config.repeating_validation_threshold {
            patterns.insert(ErrorPattern::RepeatingValidationErrors);
        }

        patterns
    }

    /// Compare the newest `trend_slice` observations against the rest.
    ///
    /// The slice's leading category is reported as increasing when it
    /// holds a majority of the slice, or when its share of the slice is
    /// above its share of the earlier history.
    fn trend(&self, history: &[Observation]) -> Trend {
        if history.len() < 2 {
            return Trend::InsufficientData;
        }

        let mut ordered = history.to_vec();
        ordered.sort_by_key(|o| o.timestamp);

        let slice_len = self.config.trend_slice.clamp(1, ordered.len());
        let (prior, recent) = ordered.split_at(ordered.len() - slice_len);

        let recent_counts = count_by_category(recent.iter());
        let Some((leader, count)) = most_common(recent, &recent_counts) else {
            return Trend::Stable;
        };

        if count * 2 > recent.len() {
            return Trend::Increasing(leader);
        }
        if prior.is_empty() || count < 2 {
            return Trend::Stable;
        }

        let prior_count = prior.iter().filter(|o| o.category == leader).count();
        let recent_share = count as f64 / recent.len() as f64;
        let prior_share = prior_count as f64 / prior.len() as f64;
        if recent_share > prior_share {
            Trend::Increasing(leader)
        } else {
            Trend::Stable
        }
    }
}

fn count_by_category<'a>(
    observations: impl Iterator<Item = &'a Observation>,
) -> BTreeMap<FailureCategory, usize> {
    let mut counts = BTreeMap::new();
    for o in observations {
        *counts.entry(o.category).or_insert(0) += 1;
    }
    counts
}

/// Highest count; ties go to the category observed first
fn most_common(
    observations: &[Observation],
    counts: &BTreeMap<FailureCategory, usize>,
) -> Option<(FailureCategory, usize)> {
    let mut best: Option<(FailureCategory, usize)> = None;
    let mut seen = BTreeSet::new();
    for o in observations {
        if !seen.insert(o.category) {
            continue;
        }
        let count = counts.get(&o.category).copied().unwrap_or(0);
        if best.map_or(true, |(_, n)| count > n) {
            best = Some((o.category, count));
        }
    }
    best
}

/// Whether `threshold` sorted instants fit inside one `window`
fn has_cluster(sorted: &[DateTime<Utc>], threshold: usize, window: Duration) -> bool {
    if threshold == 0 {
        return true;
    }
    sorted
        .windows(threshold)
        .any(|w| w[threshold - 1].signed_duration_since(w[0]) <= window)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
        base + Duration::seconds(secs)
    }

    #[test]
    fn test_empty_report() {
        let report = AnalyticsEngine::default().report();
        assert_eq!(report.total_errors, 0);
        assert_eq!(report.most_common_category, None);
        assert!(report.patterns.is_empty());
        assert_eq!(report.trend, Trend::InsufficientData);
        assert_eq!(report.debug_description, "No errors observed");
    }

    #[test]
    fn test_rapid_network_failures_within_window() {
        let engine = AnalyticsEngine::default();
        let base = Utc::now();
        engine.observe(FailureCategory::NetworkFailure, at(base, 0));
        engine.observe(FailureCategory::NetworkFailure, at(base, 20));
        engine.observe(FailureCategory::NetworkFailure, at(base, 45));

        let report = engine.report();
        assert!(report.has_pattern(ErrorPattern::RapidNetworkFailures));
        assert!(!report.has_pattern(ErrorPattern::ErrorBursts));
    }

    #[test]
    fn test_spread_out_network_failures_not_rapid() {
        let engine = AnalyticsEngine::default();
        let base = Utc::now();
        for i in 0..3 {
            engine.observe(FailureCategory::NetworkFailure, at(base, i * 120));
        }
        assert!(!engine.report().has_pattern(ErrorPattern::RapidNetworkFailures));
    }

    #[test]
    fn test_timeouts_are_not_network_failures() {
        let engine = AnalyticsEngine::default();
        let base = Utc::now();
        for i in 0..3 {
            engine.observe(FailureCategory::Timeout, at(base, i));
        }
        engine.observe(FailureCategory::NetworkFailure, at(base, 3));
        engine.observe(FailureCategory::ServerError, at(base, 4));
        assert!(!engine.report().has_pattern(ErrorPattern::RapidNetworkFailures));
    }

    #[test]
    fn test_len_survives_poisoned_lock() {
        let engine = Arc::new(AnalyticsEngine::default());
        engine.observe(FailureCategory::Other, Utc::now());

        let poisoner = Arc::clone(&engine);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.history.lock().unwrap();
            panic!("poison the history lock");
        })
        .join();

        assert_eq!(engine.len(), 1);
        assert!(!engine.is_empty());
    }

    #[test]
    fn test_burst_and_repeating_validation() {
        let engine = AnalyticsEngine::default();
        let base = Utc::now();
        engine.observe(FailureCategory::MissingField, at(base, 0));
        engine.observe(FailureCategory::InvalidRange, at(base, 1));
        engine.observe(FailureCategory::InvalidInput, at(base, 2));
        engine.observe(FailureCategory::SaveFailure, at(base, 3));
        engine.observe(FailureCategory::Other, at(base, 4));

        let report = engine.report();
        assert!(report.has_pattern(ErrorPattern::ErrorBursts));
        assert!(report.has_pattern(ErrorPattern::RepeatingValidationErrors));
    }

    #[test]
    fn test_most_common_tie_goes_to_first_seen() {
        let engine = AnalyticsEngine::default();
        let base = Utc::now();
        engine.observe(FailureCategory::Timeout, at(base, 0));
        engine.observe(FailureCategory::SaveFailure, at(base, 1));
        engine.observe(FailureCategory::SaveFailure, at(base, 2));
        engine.observe(FailureCategory::Timeout, at(base, 3));

        let report = engine.report();
        assert_eq!(report.most_common_category, Some(FailureCategory::Timeout));
        assert_eq!(report.counts_by_category[&FailureCategory::SaveFailure], 2);
        assert!(report.debug_description.contains("timeout"));
    }

    #[test]
    fn test_trend_flags_dominant_recent_category() {
        let engine = AnalyticsEngine::default();
        let base = Utc::now();
        for i in 0..6 {
            engine.observe(FailureCategory::MissingField, at(base, i));
        }
        for i in 0..4 {
            engine.observe(FailureCategory::ServerError, at(base, 100 + i));
        }
        engine.observe(FailureCategory::MissingField, at(base, 200));

        let report = engine.report();
        assert_eq!(report.most_common_category, Some(FailureCategory::MissingField));
        assert_eq!(report.trend, Trend::Increasing(FailureCategory::ServerError));
        assert!(report.debug_description.contains("serverError increasing"));
    }

    #[test]
    fn test_trend_stable_when_evenly_mixed() {
        let engine = AnalyticsEngine::new(AnalyticsConfig {
            trend_slice: 4,
            ..AnalyticsConfig::default()
        });
        let base = Utc::now();
        let cycle = [
            FailureCategory::Timeout,
            FailureCategory::SaveFailure,
            FailureCategory::MissingField,
            FailureCategory::Other,
        ];
        for i in 0..12 {
            engine.observe(cycle[i % 4], at(base, i as i64));
        }
        assert_eq!(engine.report().trend, Trend::Stable);
    }

    #[test]
    fn test_clear_and_metrics() {
        let metrics = Arc::new(MetricsRegistry::new());
        let engine = AnalyticsEngine::with_metrics(AnalyticsConfig::default(), Arc::clone(&metrics));
        engine.observe_record(&ErrorRecord::now(FailureCategory::Timeout, "slow"));
        assert_eq!(engine.len(), 1);
        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(metrics.snapshot().observations, 1);
    }
}
