//! Rendered statement list
//!
//! The in-memory ordered collection of statements currently shown. It is
//! the only source for the statement texts sent with inference and
//! truth-table requests.

use std::collections::HashSet;
use std::fmt;

use crate::client::Statement;
use crate::render::{Generation, Ticket};

/// Whether the list has entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No entries; the empty-state placeholder is visible
    Empty,
    /// At least one entry; the placeholder is hidden
    Populated,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Empty => "EMPTY",
            ViewState::Populated => "POPULATED",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The statement list as rendered.
///
/// Ids are unique within the view. The EMPTY/POPULATED state is derived from
/// the entries on every read, never stored.
///
/// A fetch issued before a delete may still carry the deleted statement.
/// Each removal is remembered together with the newest fetch ticket at that
/// moment, and a fetch with a ticket no newer than that cannot bring the id
/// back.
#[derive(Debug, Default)]
pub struct KbView {
    entries: Vec<Statement>,
    refresh: Generation,
    removed: Vec<(String, Ticket)>,
}

impl KbView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Statement] {
        &self.entries
    }

    /// Statement texts in display order
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|s| s.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn state(&self) -> ViewState {
        if self.entries.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated
        }
    }

    /// The empty-state placeholder is visible iff there are no entries
    pub fn placeholder_visible(&self) -> bool {
        self.state() == ViewState::Empty
    }

    pub fn get(&self, id: &str) -> Option<&Statement> {
        self.entries.iter().find(|s| s.id == id)
    }

    /// Issue a ticket for a list fetch; only the latest fetch may land
    pub fn begin_refresh(&mut self) -> Ticket {
        self.refresh.begin()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.refresh.is_current(ticket)
    }

    /// Clear the list and rebuild it from the response to fetch `ticket`
    /// in one step.
    ///
    /// A repeated id keeps its first occurrence, and ids deleted after the
    /// fetch was issued are left out. Returns how many entries were dropped.
    pub fn replace_all(&mut self, ticket: Ticket, statements: Vec<Statement>) -> usize {
        let total = statements.len();
        let mut seen: HashSet<String> = self
            .removed
            .iter()
            .filter(|(_, deleted_at)| ticket <= *deleted_at)
            .map(|(id, _)| id.clone())
            .collect();
        self.removed.retain(|(_, deleted_at)| *deleted_at > ticket);

        self.entries.clear();
        for statement in statements {
            if seen.insert(statement.id.clone()) {
                self.entries.push(statement);
            }
        }
        total - self.entries.len()
    }

    /// Remove exactly the entry with `id`. Returns whether one was removed.
    ///
    /// The id stays suppressed for fetches already in flight.
    pub fn remove(&mut self, id: &str) -> bool {
        self.removed.push((id.to_string(), self.refresh.latest()));
        match self.entries.iter().position(|s| s.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}
