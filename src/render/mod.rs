//! # Result Renderer
//!
//! Turns inference and truth-table responses into structured display, and
//! formats it either as terminal text or as HTML fragments.

pub mod html;
pub mod inference;
mod panel;
pub mod truth_table;

pub use inference::InferenceView;
pub use panel::{Generation, Panel, PanelContent, Ticket};
pub use truth_table::{Cell, CellStyle, TableView};
