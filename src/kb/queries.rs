//! Read-only flows: inference and truth-table generation
//!
//! Both read the statement texts from the in-memory list, never from
//! rendered output, and both refuse to send anything while the list is
//! empty.

use crate::client::InferenceQuery;
use crate::observability::{log_event_with_fields, Event};
use crate::render::{inference, truth_table, InferenceView, Panel, PanelContent, TableView, Ticket};

use super::controller::{report_failure, AppState, KbController, Outcome};

impl KbController {
    /// Ask the backend whether the query follows from the current list
    pub async fn run_inference(&self) -> Outcome {
        let prepared = self.with_state(|s| {
            let statements = s.view.texts();
            if statements.is_empty() {
                s.inference
                    .show(PanelContent::Notice(inference::NEED_STATEMENTS.to_string()));
                return None;
            }
            let query = s.query.trim().to_string();
            if query.is_empty() {
                s.inference
                    .show(PanelContent::Notice(inference::NEED_QUERY.to_string()));
                return None;
            }
            let ticket = s.inference.begin(inference::RUNNING);
            Some((
                ticket,
                InferenceQuery {
                    statements,
                    query,
                    method: s.method,
                },
            ))
        });
        let Some((ticket, request)) = prepared else {
            return Outcome::Rejected;
        };

        let (content, outcome) = match self.backend.run_inference(&request).await {
            Ok(result) => {
                log_event_with_fields(
                    Event::InferenceComplete,
                    &[
                        ("derived", &result.derived.to_string()),
                        ("method", request.method.as_str()),
                        ("steps", &result.steps.len().to_string()),
                    ],
                );
                let view = InferenceView::new(result, request.method);
                (PanelContent::Inference(view), Outcome::Completed)
            }
            Err(e) => {
                report_failure("run_inference", &e);
                let message = e.user_message("Error: ", inference::TRANSPORT_FAILED);
                (PanelContent::Failed(message), Outcome::Failed)
            }
        };

        self.settle(|s| &mut s.inference, "inference", ticket, content, outcome)
    }

    /// Ask the backend for the truth table of the current list
    pub async fn generate_truth_table(&self) -> Outcome {
        let prepared = self.with_state(|s| {
            let statements = s.view.texts();
            if statements.is_empty() {
                s.truth_table
                    .show(PanelContent::Notice(truth_table::NEED_STATEMENTS.to_string()));
                return None;
            }
            Some((s.truth_table.begin(truth_table::GENERATING), statements))
        });
        let Some((ticket, statements)) = prepared else {
            return Outcome::Rejected;
        };

        let (content, outcome) = match self.backend.generate_truth_table(&statements).await {
            Ok(table) => {
                log_event_with_fields(
                    Event::TruthTableComplete,
                    &[
                        ("columns", &table.headers.len().to_string()),
                        ("rows", &table.rows.len().to_string()),
                    ],
                );
                (PanelContent::TruthTable(TableView::new(&table)), Outcome::Completed)
            }
            Err(e) => {
                report_failure("generate_truth_table", &e);
                let message = e.user_message("Error: ", truth_table::TRANSPORT_FAILED);
                (PanelContent::Failed(message), Outcome::Failed)
            }
        };

        self.settle(|s| &mut s.truth_table, "truth_table", ticket, content, outcome)
    }

    fn settle(
        &self,
        panel: impl FnOnce(&mut AppState) -> &mut Panel,
        target: &str,
        ticket: Ticket,
        content: PanelContent,
        outcome: Outcome,
    ) -> Outcome {
        let applied = self.with_state(|s| panel(s).settle(ticket, content));
        if applied {
            outcome
        } else {
            log_event_with_fields(Event::StaleResponseDiscarded, &[("target", target)]);
            Outcome::Discarded
        }
    }
}
