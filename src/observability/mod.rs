//! Observability for the knowledge-base client
//!
//! Structured JSON logging of client lifecycle events.
//!
//! # Usage
//!
//! ```ignore
//! use logickb::observability::{log_event_with_fields, Event, Logger};
//!
//! Logger::info("STATEMENTS_LOADED", &[("count", "3")]);
//! log_event_with_fields(Event::StatementAdded, &[("statement", "A ∧ B")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Failure events are logged at ERROR, stale-response notices at WARN,
/// everything else at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = match event {
        Event::TransportFailed => Severity::Error,
        Event::ApplicationError | Event::StaleResponseDiscarded | Event::ValidationRejected => {
            Severity::Warn
        }
        _ => Severity::Info,
    };
    Logger::log(severity, event.as_str(), fields);
}
