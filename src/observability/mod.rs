//! Observability for the error journal
//!
//! - Structured logging (JSON lines)
//! - Lock-free counters
//! - Typed lifecycle events
//!
//! Observability is read-only and never fails the operation it observes.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        // Verifies no panic
        log_event_with_fields(Event::JournalClear, &[]);
        log_event_with_fields(Event::UndoRejected, &[("operation", "delete")]);
    }
}
