//! Knowledge-base sync controller
//!
//! Owns the application state (input field, statement list, result panels,
//! message line) and drives every backend round trip. All operations take
//! `&self`, and the state lock is never held across an `.await`, so
//! overlapping operations can be in flight at once. The list and each result
//! panel only accept the response to their latest request.
//!
//! No operation returns an error: validation, transport and application
//! failures are all reported through the message line or the panel and the
//! controller stays usable.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::client::{Backend, ClientError, InferenceMethod, Statement};
use crate::editor::{self, TextField};
use crate::observability::{log_event_with_fields, Event};
use crate::render::{Panel, PanelContent};
use crate::symbols::normalize;
use crate::validator::validate;

use super::message::{MessageArea, MessageSeverity, StatusMessage};
use super::view::{KbView, ViewState};

pub const ADDED: &str = "Statement added to knowledge base.";
pub const REMOVED: &str = "Statement removed.";
pub const LIST_FAILED: &str = "Failed to load statements from server.";
pub const ADD_FAILED: &str = "Failed to add statement to server.";
pub const DELETE_FAILED: &str = "Failed to delete statement from server.";

/// How a controller operation settled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The backend accepted the request and the view was updated
    Completed,
    /// A local precondition failed; no request was sent
    Rejected,
    /// The backend or the transport reported a failure
    Failed,
    /// The response arrived after a newer request on the same target
    Discarded,
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}

#[derive(Debug, Default)]
pub(crate) struct AppState {
    pub(crate) input: TextField,
    pub(crate) query: String,
    pub(crate) method: InferenceMethod,
    pub(crate) view: KbView,
    pub(crate) inference: Panel,
    pub(crate) truth_table: Panel,
}

/// A point-in-time copy of everything the client displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub input: TextField,
    pub query: String,
    pub method: InferenceMethod,
    pub statements: Vec<Statement>,
    pub view_state: ViewState,
    pub placeholder_visible: bool,
    pub message: StatusMessage,
    pub inference: PanelContent,
    pub truth_table: PanelContent,
}

/// The single controller object for one client session
pub struct KbController {
    pub(crate) backend: Arc<dyn Backend>,
    state: Mutex<AppState>,
    pub(crate) messages: MessageArea,
}

impl KbController {
    /// Create a controller with the default 2000 ms message delay
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_message_delay(backend, super::message::DEFAULT_CLEAR_AFTER)
    }

    pub fn with_message_delay(backend: Arc<dyn Backend>, clear_after: Duration) -> Self {
        Self {
            backend,
            state: Mutex::new(AppState::default()),
            messages: MessageArea::new(clear_after),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with the state locked. Never call across an `.await`.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut AppState) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> Snapshot {
        let message = self.messages.current();
        self.with_state(|s| Snapshot {
            input: s.input.clone(),
            query: s.query.clone(),
            method: s.method,
            statements: s.view.entries().to_vec(),
            view_state: s.view.state(),
            placeholder_visible: s.view.placeholder_visible(),
            message,
            inference: s.inference.content().clone(),
            truth_table: s.truth_table.content().clone(),
        })
    }

    pub fn message(&self) -> StatusMessage {
        self.messages.current()
    }

    /// Statement at display position `index` (0-based)
    pub fn statement_at(&self, index: usize) -> Option<Statement> {
        self.with_state(|s| s.view.entries().get(index).cloned())
    }

    // ==================
    // Input
    // ==================

    /// Input-change event: store the normalized text and blank the message
    pub fn on_input(&self, raw: &str) {
        let normalized = normalize(raw);
        self.with_state(|s| s.input.set_value(normalized));
        self.messages.clear();
    }

    /// Operator-button press at the input's caret
    pub fn press_operator(&self, op: &str) {
        self.with_state(|s| editor::press_operator(&mut s.input, op));
    }

    pub fn set_caret(&self, pos: usize) {
        self.with_state(|s| s.input.set_caret(pos));
    }

    pub fn select(&self, start: usize, end: usize) {
        self.with_state(|s| s.input.select(start, end));
    }

    pub fn set_query(&self, query: &str) {
        let query = query.to_string();
        self.with_state(|s| s.query = query);
    }

    pub fn set_method(&self, method: InferenceMethod) {
        self.with_state(|s| s.method = method);
    }

    // ==================
    // List / Add / Delete
    // ==================

    /// Initial load
    pub async fn load(&self) -> Outcome {
        self.refresh().await
    }

    /// Fetch every statement and rebuild the list.
    ///
    /// On failure the previous list is left exactly as it was. A response
    /// (or failure) of a fetch that has since been superseded is dropped.
    pub async fn refresh(&self) -> Outcome {
        let ticket = self.with_state(|s| s.view.begin_refresh());

        let statements = match self.backend.list_statements().await {
            Ok(statements) => statements,
            Err(e) => {
                report_failure("list_statements", &e);
                if !self.with_state(|s| s.view.is_current(ticket)) {
                    log_event_with_fields(Event::StaleResponseDiscarded, &[("target", "statement_list")]);
                    return Outcome::Discarded;
                }
                self.messages.show(
                    e.user_message("Error loading statements: ", LIST_FAILED),
                    MessageSeverity::Error,
                );
                return Outcome::Failed;
            }
        };

        let applied = self.with_state(|s| {
            if !s.view.is_current(ticket) {
                return None;
            }
            let before = s.view.state();
            let dropped = s.view.replace_all(ticket, statements);
            Some((before, s.view.state(), s.view.len(), dropped))
        });

        match applied {
            Some((before, after, count, dropped)) => {
                log_event_with_fields(
                    Event::StatementsLoaded,
                    &[("count", &count.to_string()), ("dropped", &dropped.to_string())],
                );
                log_transition(before, after);
                Outcome::Completed
            }
            None => {
                log_event_with_fields(Event::StaleResponseDiscarded, &[("target", "statement_list")]);
                Outcome::Discarded
            }
        }
    }

    /// Submit the input as a new statement.
    ///
    /// The text is normalized, trimmed and validated first; an invalid
    /// statement never reaches the network. On success the input is
    /// cleared and the whole list is fetched again.
    pub async fn add(&self) -> Outcome {
        let statement = self.with_state(|s| normalize(s.input.value()).trim().to_string());

        let check = validate(&statement);
        if !check.ok {
            let rule = check.rule.map(|r| r.as_str()).unwrap_or_default();
            log_event_with_fields(
                Event::ValidationRejected,
                &[("rule", rule), ("statement", &statement)],
            );
            self.messages.show(check.message, MessageSeverity::Error);
            return Outcome::Rejected;
        }

        if let Err(e) = self.backend.add_statement(&statement).await {
            report_failure("add_statement", &e);
            self.messages
                .show(e.user_message("Error: ", ADD_FAILED), MessageSeverity::Error);
            return Outcome::Failed;
        }

        self.with_state(|s| s.input.clear());
        self.messages.show(ADDED, MessageSeverity::Success);
        log_event_with_fields(Event::StatementAdded, &[("statement", &statement)]);

        self.refresh().await;
        Outcome::Completed
    }

    /// Delete one statement by id and drop exactly that entry from the list
    pub async fn delete(&self, id: &str) -> Outcome {
        if let Err(e) = self.backend.delete_statement(id).await {
            report_failure("delete_statement", &e);
            self.messages.show(
                e.user_message("Error deleting statement: ", DELETE_FAILED),
                MessageSeverity::Error,
            );
            return Outcome::Failed;
        }

        let (before, after) = self.with_state(|s| {
            let before = s.view.state();
            s.view.remove(id);
            (before, s.view.state())
        });
        log_event_with_fields(Event::StatementDeleted, &[("id", id)]);
        log_transition(before, after);
        self.messages.show(REMOVED, MessageSeverity::Muted);
        Outcome::Completed
    }
}

pub(crate) fn report_failure(operation: &str, error: &ClientError) {
    let event = if error.is_transport() {
        Event::TransportFailed
    } else {
        Event::ApplicationError
    };
    log_event_with_fields(
        event,
        &[
            ("error", &error.to_string()),
            ("kind", error.kind()),
            ("operation", operation),
        ],
    );
}

fn log_transition(before: ViewState, after: ViewState) {
    if before != after {
        log_event_with_fields(
            Event::ViewStateChanged,
            &[("from", before.as_str()), ("to", after.as_str())],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::fake::FakeBackend;

    fn controller(texts: &[&str]) -> (Arc<FakeBackend>, KbController) {
        let backend = Arc::new(FakeBackend::with_statements(texts));
        let controller = KbController::new(backend.clone());
        (backend, controller)
    }

    #[tokio::test]
    async fn test_initial_load_empty_shows_placeholder() {
        let (_backend, kb) = controller(&[]);
        assert_eq!(kb.load().await, Outcome::Completed);

        let snap = kb.snapshot();
        assert_eq!(snap.view_state, ViewState::Empty);
        assert!(snap.placeholder_visible);
    }

    #[tokio::test]
    async fn test_initial_load_populated_hides_placeholder() {
        let (_backend, kb) = controller(&["A", "A → B"]);
        kb.load().await;

        let snap = kb.snapshot();
        assert_eq!(snap.statements.len(), 2);
        assert_eq!(snap.view_state, ViewState::Populated);
        assert!(!snap.placeholder_visible);
    }

    #[tokio::test]
    async fn test_add_valid_makes_one_add_call_then_refreshes() {
        let (backend, kb) = controller(&[]);
        kb.on_input("A ^ B");

        assert_eq!(kb.add().await, Outcome::Completed);
        assert_eq!(backend.calls("add"), 1);
        assert_eq!(backend.calls("list"), 1);
        assert_eq!(backend.stored_texts(), vec!["A ∧ B"]);

        let snap = kb.snapshot();
        assert_eq!(snap.input.value(), "");
        assert_eq!(snap.message.text, ADDED);
        assert_eq!(snap.message.severity, MessageSeverity::Success);
        assert_eq!(snap.statements[0].text, "A ∧ B");
        assert!(!snap.placeholder_visible);
    }

    #[tokio::test]
    async fn test_add_trims_and_normalizes_before_submit() {
        let (backend, kb) = controller(&[]);
        kb.with_state(|s| s.input.set_value("   p v q  "));
        kb.add().await;
        assert_eq!(backend.stored_texts(), vec!["p ∨ q"]);
    }

    #[tokio::test]
    async fn test_add_invalid_makes_no_network_call() {
        let (backend, kb) = controller(&[]);
        kb.on_input("A ∧");

        assert_eq!(kb.add().await, Outcome::Rejected);
        assert_eq!(backend.total_calls(), 0);

        let snap = kb.snapshot();
        assert_eq!(snap.input.value(), "A ∧");
        assert_eq!(snap.message.text, "Expression cannot end with an operator.");
        assert_eq!(snap.message.severity, MessageSeverity::Error);
    }

    #[tokio::test]
    async fn test_add_application_error_keeps_input() {
        let (backend, kb) = controller(&["A"]);
        kb.load().await;
        kb.on_input("A");

        assert_eq!(kb.add().await, Outcome::Failed);
        assert_eq!(backend.calls("list"), 1);

        let snap = kb.snapshot();
        assert_eq!(snap.input.value(), "A");
        assert_eq!(snap.message.text, "Error: Statement already exists.");
    }

    #[tokio::test]
    async fn test_add_transport_error_uses_generic_message() {
        let (backend, kb) = controller(&[]);
        backend.fail("add", ClientError::Transport("connection refused".into()));
        kb.on_input("A");

        assert_eq!(kb.add().await, Outcome::Failed);
        assert_eq!(kb.message().text, ADD_FAILED);
        assert_eq!(kb.snapshot().input.value(), "A");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_entry() {
        let (backend, kb) = controller(&["A", "B", "C"]);
        kb.load().await;
        let target = kb.statement_at(1).unwrap();

        assert_eq!(kb.delete(&target.id).await, Outcome::Completed);
        assert_eq!(backend.calls("list"), 1);

        let snap = kb.snapshot();
        let texts: Vec<_> = snap.statements.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "C"]);
        assert_eq!(snap.message, StatusMessage::new(REMOVED, MessageSeverity::Muted));
    }

    #[tokio::test]
    async fn test_delete_last_entry_shows_placeholder() {
        let (_backend, kb) = controller(&["A"]);
        kb.load().await;
        let only = kb.statement_at(0).unwrap();

        kb.delete(&only.id).await;
        let snap = kb.snapshot();
        assert_eq!(snap.view_state, ViewState::Empty);
        assert!(snap.placeholder_visible);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_entry() {
        let (backend, kb) = controller(&["A", "B"]);
        kb.load().await;
        let target = kb.statement_at(0).unwrap();
        backend.remove_directly(&target.id);

        assert_eq!(kb.delete(&target.id).await, Outcome::Failed);
        assert_eq!(kb.snapshot().statements.len(), 2);
        assert_eq!(kb.message().text, "Error deleting statement: Statement not found.");
    }

    #[tokio::test]
    async fn test_list_failure_keeps_previous_view() {
        let (backend, kb) = controller(&["A", "B"]);
        kb.load().await;

        backend.fail("list", ClientError::Decode("expected value".into()));
        assert_eq!(kb.refresh().await, Outcome::Failed);
        assert_eq!(kb.snapshot().statements.len(), 2);
        assert_eq!(kb.message().text, LIST_FAILED);

        backend.fail("list", ClientError::Application("Session expired.".into()));
        kb.refresh().await;
        assert_eq!(kb.message().text, "Error loading statements: Session expired.");

        backend.recover("list");
        assert_eq!(kb.refresh().await, Outcome::Completed);
    }

    #[tokio::test]
    async fn test_add_refresh_failure_still_completes_add() {
        let (backend, kb) = controller(&[]);
        backend.fail("list", ClientError::Transport("reset".into()));
        kb.on_input("A");

        assert_eq!(kb.add().await, Outcome::Completed);
        assert_eq!(kb.snapshot().input.value(), "");
        assert_eq!(kb.message().text, LIST_FAILED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_list_response_is_discarded() {
        let (backend, kb) = controller(&["A"]);
        backend.delay("list", &[100, 10]);

        let (first, second) = tokio::join!(kb.refresh(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            kb.refresh().await
        });
        assert_eq!(second, Outcome::Completed);
        assert_eq!(first, Outcome::Discarded);
        assert_eq!(kb.snapshot().statements.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_list_failure_is_not_shown() {
        let (backend, kb) = controller(&["A"]);
        backend.delay("list", &[100, 10]);

        let (first, second, _) = tokio::join!(
            kb.refresh(),
            async {
                tokio::time::sleep(Duration::from_millis(1)).await;
                kb.refresh().await
            },
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                backend.fail("list", ClientError::Transport("reset".into()));
            }
        );
        assert_eq!(second, Outcome::Completed);
        assert_eq!(first, Outcome::Discarded);
        assert!(kb.message().is_blank());
        assert_eq!(kb.snapshot().statements.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_during_list_fetch_stays_deleted() {
        let (backend, kb) = controller(&["A", "B"]);
        kb.load().await;
        backend.delay("list", &[100]);

        let (refreshed, deleted) = tokio::join!(kb.refresh(), async {
            tokio::time::sleep(Duration::from_millis(1)).await;
            kb.delete("id-1").await
        });
        assert_eq!(deleted, Outcome::Completed);
        assert_eq!(refreshed, Outcome::Completed);

        let snap = kb.snapshot();
        let ids: Vec<&str> = snap.statements.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["id-2"]);
        assert_eq!(backend.stored_texts(), vec!["B"]);

        // A later fetch is taken as the server reports it.
        assert_eq!(kb.refresh().await, Outcome::Completed);
        assert_eq!(kb.snapshot().statements.len(), 1);
    }

    #[tokio::test]
    async fn test_input_event_normalizes_and_clears_message() {
        let (_backend, kb) = controller(&[]);
        kb.on_input("A ∧");
        kb.add().await;
        assert!(!kb.message().is_blank());

        kb.on_input("A ^ B");
        assert_eq!(kb.snapshot().input.value(), "A ∧ B");
        assert!(kb.message().is_blank());
    }

    #[tokio::test]
    async fn test_operator_press_inserts_at_caret() {
        let (_backend, kb) = controller(&[]);
        kb.on_input("AB");
        kb.set_caret(1);
        kb.press_operator("v");

        let input = kb.snapshot().input;
        assert_eq!(input.value(), "A ∨ B");
        assert!(input.is_focused());
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_message_clears_after_two_seconds() {
        let (_backend, kb) = controller(&[]);
        kb.on_input("A");
        kb.add().await;
        assert_eq!(kb.message().text, ADDED);

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert!(kb.message().is_blank());
    }
}
