//! The backend seam
//!
//! Everything the client needs from the knowledge-base server goes through
//! this trait, so the controller can be driven by the HTTP implementation or
//! by an in-process fake.

use async_trait::async_trait;

use super::errors::ClientResult;
use super::types::{InferenceQuery, InferenceResult, Statement, TruthTable};

/// Request/response contract of the knowledge-base store
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/get_statements`
    async fn list_statements(&self) -> ClientResult<Vec<Statement>>;

    /// `POST /api/add_statement`
    async fn add_statement(&self, statement: &str) -> ClientResult<()>;

    /// `POST /api/delete_statement`
    async fn delete_statement(&self, id: &str) -> ClientResult<()>;

    /// `POST /api/run_inference`
    async fn run_inference(&self, query: &InferenceQuery) -> ClientResult<InferenceResult>;

    /// `POST /api/generate_truth_table`
    async fn generate_truth_table(&self, statements: &[String]) -> ClientResult<TruthTable>;
}
