//! logickb - client for a propositional-logic knowledge base
//!
//! The client keeps a local view of statements stored on a backend in sync
//! with it, validates statements before they are sent, and renders the
//! backend's inference and truth-table results.
//!
//! Layers, bottom-up:
//! - `symbols`, `validator`, `editor`: pure text handling
//! - `client`: the HTTP contract with the backend
//! - `render`: result panels
//! - `kb`: the sync controller tying them together
//! - `config`, `cli`: the terminal front end

pub mod cli;
pub mod client;
pub mod config;
pub mod editor;
pub mod kb;
pub mod observability;
pub mod render;
pub mod symbols;
pub mod validator;
