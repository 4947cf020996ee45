//! Result panels
//!
//! A panel is a render target with exactly one piece of content at a time.
//! Each panel carries a generation counter: every request bumps it, and a
//! response only lands if its ticket still matches the latest generation.

use super::html::paragraph;
use super::inference::InferenceView;
use super::truth_table::TableView;

/// What a result panel currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelContent {
    #[default]
    Blank,
    /// Guidance when a precondition is not met (muted)
    Notice(String),
    /// In-flight placeholder (muted)
    Pending(String),
    /// Error line
    Failed(String),
    Inference(InferenceView),
    TruthTable(TableView),
}

impl PanelContent {
    pub fn to_text(&self) -> String {
        match self {
            PanelContent::Blank => String::new(),
            PanelContent::Notice(text) | PanelContent::Pending(text) => format!("{}\n", text),
            PanelContent::Failed(text) => format!("{}\n", text),
            PanelContent::Inference(view) => view.to_text(),
            PanelContent::TruthTable(view) => view.to_text(),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            PanelContent::Blank => String::new(),
            PanelContent::Notice(text) | PanelContent::Pending(text) => paragraph("muted", text),
            PanelContent::Failed(text) => paragraph("message error", text),
            PanelContent::Inference(view) => view.to_html(),
            PanelContent::TruthTable(view) => view.to_html(),
        }
    }
}

/// Identifies one request issued against a render target.
///
/// Tickets from one generation counter order by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Latest-request-wins generation counter for one render target
#[derive(Debug, Default)]
pub struct Generation {
    latest: u64,
}

impl Generation {
    /// Issue a ticket for a new request, superseding all earlier ones
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Whether `ticket` belongs to the most recent request
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }

    /// The ticket of the most recent request (or a zero ticket before any)
    pub fn latest(&self) -> Ticket {
        Ticket(self.latest)
    }
}

/// A result panel with stale-response protection
#[derive(Debug, Default)]
pub struct Panel {
    content: PanelContent,
    generation: Generation,
}

impl Panel {
    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// Show content that needs no request (guidance); supersedes anything in flight
    pub fn show(&mut self, content: PanelContent) {
        self.generation.begin();
        self.content = content;
    }

    /// Start a request: show the placeholder and return its ticket
    pub fn begin(&mut self, placeholder: &str) -> Ticket {
        self.content = PanelContent::Pending(placeholder.to_string());
        self.generation.begin()
    }

    /// Land a response. Returns false, leaving the panel as is, when a newer
    /// request has been issued since `ticket`.
    pub fn settle(&mut self, ticket: Ticket, content: PanelContent) -> bool {
        if !self.generation.is_current(ticket) {
            return false;
        }
        self.content = content;
        true
    }
}
