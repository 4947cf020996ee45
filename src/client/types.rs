//! Wire types for the knowledge-base backend
//!
//! Every response carries `success`, plus `message` on failure. Payload
//! fields are optional on the wire and only required once `success` is true.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ClientError, ClientResult};

/// A stored statement. The id is server-assigned and opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub id: String,
    pub text: String,
}

impl Statement {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Inference strategy offered by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferenceMethod {
    #[default]
    TruthTable,
    ModusPonens,
    Resolution,
}

impl InferenceMethod {
    pub const ALL: [InferenceMethod; 3] = [
        InferenceMethod::TruthTable,
        InferenceMethod::ModusPonens,
        InferenceMethod::Resolution,
    ];

    /// Name sent on the wire and echoed in results
    pub fn as_str(&self) -> &'static str {
        match self {
            InferenceMethod::TruthTable => "truth-table",
            InferenceMethod::ModusPonens => "modus-ponens",
            InferenceMethod::Resolution => "resolution",
        }
    }

    /// Human-readable label for method pickers
    pub fn label(&self) -> &'static str {
        match self {
            InferenceMethod::TruthTable => "Truth Table Check",
            InferenceMethod::ModusPonens => "Modus Ponens",
            InferenceMethod::Resolution => "Resolution",
        }
    }
}

impl fmt::Display for InferenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InferenceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InferenceMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown inference method '{}' (expected truth-table, modus-ponens or resolution)",
                    s
                )
            })
    }
}

/// Body of `POST /api/run_inference`, built fresh per run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InferenceQuery {
    pub statements: Vec<String>,
    pub query: String,
    pub method: InferenceMethod,
}

/// Backend answer to an inference query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceResult {
    pub conclusion: String,
    pub derived: bool,
    #[serde(default)]
    pub steps: Vec<String>,
}

/// One truth-table row: column name → cell value (usually `"T"` or `"F"`)
pub type TruthRow = BTreeMap<String, Value>;

/// Backend-computed truth table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TruthTable {
    pub headers: Vec<String>,
    pub rows: Vec<TruthRow>,
}

// ==================
// Requests
// ==================

#[derive(Debug, Serialize)]
pub(crate) struct AddStatementRequest<'a> {
    pub statement: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteStatementRequest<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct TruthTableRequest<'a> {
    pub statements: &'a [String],
}

// ==================
// Responses
// ==================

/// The `{ success, message?, ...payload }` shape shared by every endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Envelope<T> {
    /// `success: false` becomes an application error carrying the message
    pub fn into_payload(self) -> ClientResult<T> {
        if self.success {
            Ok(self.payload)
        } else {
            Err(ClientError::Application(
                self.message.unwrap_or_else(|| "Unknown error.".to_string()),
            ))
        }
    }
}

/// Payload of add/delete responses
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {}

#[derive(Debug, Deserialize)]
pub(crate) struct StatementsPayload {
    #[serde(default)]
    pub statements: Option<Vec<Statement>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InferencePayload {
    #[serde(default)]
    pub result: Option<InferenceResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TruthTablePayload {
    #[serde(default)]
    pub headers: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Option<Vec<TruthRow>>,
}

/// Missing payload on a successful response is a malformed response
pub(crate) fn require<T>(field: Option<T>, name: &str) -> ClientResult<T> {
    field.ok_or_else(|| ClientError::Decode(format!("missing field `{}`", name)))
}
