//! Observability
//!
//! - Structured logging (JSON, one line per event)
//! - Typed lifecycle events
//! - Begin/complete scopes around units of work
//!
//! Observability is read-only: it never changes control flow and a failed
//! write is ignored.
//!
//! ```ignore
//! use lrc_restore::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::JobCreated, &[("group", "14")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

#[cfg(test)]
pub(crate) use logger::capture::capture_events;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Failure events are logged at WARN; the caller decides whether the
/// failure is an error.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
