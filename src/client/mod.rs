//! # Backend Client
//!
//! The request/response contract with the knowledge-base server:
//!
//! - `GET  /api/get_statements`
//! - `POST /api/add_statement`
//! - `POST /api/delete_statement`
//! - `POST /api/run_inference`
//! - `POST /api/generate_truth_table`
//!
//! `success: false` is always a recoverable [`ClientError::Application`].

mod backend;
pub mod errors;
mod http;
pub mod types;

pub use backend::Backend;
pub use errors::{ClientError, ClientResult};
pub use http::HttpBackend;
pub use types::{InferenceMethod, InferenceQuery, InferenceResult, Statement, TruthRow, TruthTable};
