//! Observable client events
//!
//! Events are explicit and typed so log consumers can match on a fixed set
//! of names.

use std::fmt;

/// Observable events in the knowledge-base client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Client starting up
    ClientStart,
    /// Configuration loaded
    ConfigLoaded,

    // Statement list
    /// Statement list fetched and rendered
    StatementsLoaded,
    /// Statement accepted by the backend
    StatementAdded,
    /// Statement removed by the backend
    StatementDeleted,
    /// Statement rejected by the local validator
    ValidationRejected,
    /// View moved between EMPTY and POPULATED
    ViewStateChanged,

    // Read-only flows
    /// Inference response rendered
    InferenceComplete,
    /// Truth table response rendered
    TruthTableComplete,

    // Failures
    /// Response arrived after a newer request on the same target
    StaleResponseDiscarded,
    /// Network or decode failure
    TransportFailed,
    /// Backend answered with `success: false`
    ApplicationError,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ClientStart => "CLIENT_START",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StatementsLoaded => "STATEMENTS_LOADED",
            Event::StatementAdded => "STATEMENT_ADDED",
            Event::StatementDeleted => "STATEMENT_DELETED",
            Event::ValidationRejected => "VALIDATION_REJECTED",
            Event::ViewStateChanged => "VIEW_STATE_CHANGED",
            Event::InferenceComplete => "INFERENCE_COMPLETE",
            Event::TruthTableComplete => "TRUTH_TABLE_COMPLETE",
            Event::StaleResponseDiscarded => "STALE_RESPONSE_DISCARDED",
            Event::TransportFailed => "TRANSPORT_FAILED",
            Event::ApplicationError => "APPLICATION_ERROR",
        }
    }

    /// Returns true if this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(self, Event::TransportFailed | Event::ApplicationError)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
