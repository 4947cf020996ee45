//! # Editor
//!
//! The statement input field and caret-aware operator insertion. Nothing in
//! this module validates; inserted text is checked on submit.

mod field;
mod insert;

pub use field::{Selection, TextField};
pub use insert::{insert_at_cursor, operator_token, press_operator};
