//! CLI command implementations
//!
//! Each command loads the journal from disk, acts on it, and returns the
//! JSON payload that `run_command` writes to stdout. Commands that change
//! the journal persist it before returning.

use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::analytics::AnalyticsEngine;
use crate::config::EngineConfig;
use crate::disclosure::DisclosurePolicy;
use crate::journal::{ErrorJournal, RestoreSummary, JOURNAL_CAPACITY};
use crate::observability::Logger;
use crate::record::{encode_value, ErrorRecord};
use crate::recovery::RecoveryPlanner;
use crate::taxonomy::{FailureCategory, ParseCategoryError};

use super::args::{Cli, Command, JournalArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_journal_file, write_error, write_journal_file, write_response};

/// Parse arguments and run the selected command.
///
/// Log lines go to stderr so stdout carries only the response.
pub fn run() -> CliResult<()> {
    Logger::set_stderr_only(true);
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a command and write its response to stdout
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Record {
            target,
            category,
            message,
            unrecoverable,
            retry_count,
        } => record(&target, &category, &message, !unrecoverable, retry_count),
        Command::Inspect { target } => inspect(&target),
        Command::Recent {
            target,
            within_secs,
        } => recent(&target, within_secs),
        Command::Report { target } => report(&target),
        Command::Explain { category } => explain(&category),
        Command::Clear { target } => clear(&target),
    };

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Append one record and persist
pub fn record(
    target: &JournalArgs,
    category: &str,
    message: &str,
    is_recoverable: bool,
    retry_count: u32,
) -> CliResult<Value> {
    let category = parse_category(category)?;
    let (_, journal, _) = open(target)?;

    let record = ErrorRecord::new(category, message, is_recoverable, retry_count, Utc::now());
    let evicted = journal.record(record.clone());
    save(target, &journal)?;

    Ok(json!({
        "recorded": encode_value(&record),
        "evicted": evicted.as_ref().map(encode_value),
        "count": journal.len(),
    }))
}

/// Dump the whole journal
pub fn inspect(target: &JournalArgs) -> CliResult<Value> {
    let (_, journal, summary) = open(target)?;

    let by_category: serde_json::Map<String, Value> = journal
        .count_by_category()
        .into_iter()
        .map(|(category, count)| (category.as_str().to_string(), json!(count)))
        .collect();

    Ok(json!({
        "count": journal.len(),
        "capacity": JOURNAL_CAPACITY,
        "restore": summary,
        "by_category": by_category,
        "records": journal.all().iter().map(encode_value).collect::<Vec<_>>(),
    }))
}

/// Records within a window
pub fn recent(target: &JournalArgs, within_secs: Option<u64>) -> CliResult<Value> {
    let (config, journal, _) = open(target)?;

    let within = match within_secs {
        Some(secs) => i64::try_from(secs)
            .ok()
            .and_then(Duration::try_seconds)
            .ok_or_else(|| CliError::invalid_argument("within_secs is too large"))?,
        None => config.recent_window(),
    };
    let records = journal.recent(within);

    Ok(json!({
        "within_secs": within.num_seconds(),
        "count": records.len(),
        "records": records.iter().map(encode_value).collect::<Vec<_>>(),
    }))
}

/// Analytics over the journal contents
pub fn report(target: &JournalArgs) -> CliResult<Value> {
    let (config, journal, _) = open(target)?;

    let engine = AnalyticsEngine::new(config.analytics);
    for record in journal.all() {
        engine.observe_record(&record);
    }
    Ok(serde_json::to_value(engine.report())?)
}

/// Disclosure and recovery for one category
pub fn explain(category: &str) -> CliResult<Value> {
    let category = parse_category(category)?;
    Ok(json!({
        "category": category.as_str(),
        "presentation": DisclosurePolicy::presentation_for(category),
        "recovery": RecoveryPlanner::plan_for(category),
    }))
}

/// Empty the journal and persist
pub fn clear(target: &JournalArgs) -> CliResult<Value> {
    let (_, journal, _) = open(target)?;
    let removed = journal.len();
    journal.clear();
    save(target, &journal)?;
    Ok(json!({ "removed": removed }))
}

fn parse_category(s: &str) -> CliResult<FailureCategory> {
    s.parse()
        .map_err(|e: ParseCategoryError| CliError::invalid_argument(e.to_string()))
}

fn open(target: &JournalArgs) -> CliResult<(EngineConfig, ErrorJournal, RestoreSummary)> {
    let config = match &target.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.apply()?;

    let journal = ErrorJournal::new();
    let summary = journal.restore(&read_journal_file(&target.journal)?)?;
    Ok((config, journal, summary))
}

fn save(target: &JournalArgs, journal: &ErrorJournal) -> CliResult<()> {
    write_journal_file(&target.journal, &journal.serialize_all())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn target(dir: &TempDir) -> JournalArgs {
        JournalArgs {
            journal: dir.path().join("journal.json"),
            config: None,
        }
    }

    #[test]
    fn test_record_then_inspect() {
        let dir = TempDir::new().unwrap();
        let target = target(&dir);

        record(&target, "networkFailure", "offline", true, 0).unwrap();
        record(&target, "missingField", "Trip name is required", true, 0).unwrap();

        let data = inspect(&target).unwrap();
        assert_eq!(data["count"], 2);
        assert_eq!(data["capacity"], 50);
        assert_eq!(data["by_category"]["networkFailure"], 1);
        assert_eq!(data["records"][1]["message"], "Trip name is required");
    }

    #[test]
    fn test_record_rejects_unknown_category() {
        let dir = TempDir::new().unwrap();
        let err = record(&target(&dir), "gremlins", "x", true, 0).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidArgument);
        assert!(!dir.path().join("journal.json").exists());
    }

    #[test]
    fn test_corrupt_journal_reported() {
        let dir = TempDir::new().unwrap();
        let target = target(&dir);
        fs::write(&target.journal, b"[{\"category\":").unwrap();

        let err = inspect(&target).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::CorruptJournal);
    }

    #[test]
    fn test_report_and_clear() {
        let dir = TempDir::new().unwrap();
        let target = target(&dir);
        for i in 0..3 {
            record(&target, "networkFailure", &format!("attempt {}", i), true, i).unwrap();
        }

        let data = report(&target).unwrap();
        assert_eq!(data["total_errors"], 3);
        assert_eq!(data["most_common_category"], "networkFailure");
        assert!(data["patterns"]
            .as_array()
            .unwrap()
            .contains(&json!("rapidNetworkFailures")));

        assert_eq!(clear(&target).unwrap()["removed"], 3);
        assert_eq!(inspect(&target).unwrap()["count"], 0);
    }

    #[test]
    fn test_recent_uses_explicit_window() {
        let dir = TempDir::new().unwrap();
        let target = target(&dir);
        record(&target, "timeout", "slow", true, 0).unwrap();

        let data = recent(&target, Some(3600)).unwrap();
        assert_eq!(data["within_secs"], 3600);
        assert_eq!(data["count"], 1);
    }

    #[test]
    fn test_explain() {
        let data = explain("databaseCorrupted").unwrap();
        assert_eq!(data["presentation"]["level"], "alert");
        assert_eq!(data["presentation"]["dismissible"], false);
        assert_eq!(data["recovery"]["requires_user_action"], true);
        assert_eq!(data["presentation"]["actions"][0], "Contact Support");
    }
}
