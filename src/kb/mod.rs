//! # Knowledge Base Sync
//!
//! Keeps the rendered statement list consistent with the backend store.
//!
//! ## View state
//!
//! `EMPTY ⇄ POPULATED`, derived from the entry count after every list,
//! add and delete settles. The empty-state placeholder is visible exactly
//! in `EMPTY`.
//!
//! ## Consistency
//!
//! - List replaces the whole view at once, or leaves it untouched on failure
//! - Add never inserts optimistically; it re-fetches the list on success
//! - Delete removes exactly the entry with the deleted id

mod controller;
#[cfg(test)]
pub(crate) mod fake;
pub mod message;
mod queries;
mod view;

pub use controller::{KbController, Outcome, Snapshot};
pub use controller::{ADDED, ADD_FAILED, DELETE_FAILED, LIST_FAILED, REMOVED};
pub use message::{MessageArea, MessageSeverity, StatusMessage};
pub use view::{KbView, ViewState};
