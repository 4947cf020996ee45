//! In-process backend for controller tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use crate::client::{
    Backend, ClientError, ClientResult, InferenceQuery, InferenceResult, Statement, TruthRow,
    TruthTable,
};

#[derive(Default)]
pub(crate) struct FakeBackend {
    store: Mutex<Vec<Statement>>,
    next_id: Mutex<u64>,
    calls: Mutex<Vec<&'static str>>,
    failures: Mutex<HashMap<&'static str, ClientError>>,
    delays: Mutex<HashMap<&'static str, VecDeque<Duration>>>,
    last_inference: Mutex<Option<InferenceQuery>>,
}

impl FakeBackend {
    pub fn with_statements(texts: &[&str]) -> Self {
        let backend = Self::default();
        for text in texts {
            backend.insert(text);
        }
        backend
    }

    fn insert(&self, text: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = format!("id-{}", next);
        self.store.lock().unwrap().push(Statement::new(id.clone(), text));
        id
    }

    /// Make every later call to `operation` fail with `error`
    pub fn fail(&self, operation: &'static str, error: ClientError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failures.lock().unwrap().remove(operation);
    }

    /// Delay the next calls to `operation`, one entry per call
    pub fn delay(&self, operation: &'static str, delays: &[u64]) {
        self.delays
            .lock()
            .unwrap()
            .entry(operation)
            .or_default()
            .extend(delays.iter().map(|ms| Duration::from_millis(*ms)));
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == operation).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn stored_texts(&self) -> Vec<String> {
        self.store.lock().unwrap().iter().map(|s| s.text.clone()).collect()
    }

    pub fn last_inference(&self) -> Option<InferenceQuery> {
        self.last_inference.lock().unwrap().clone()
    }

    /// Remove a statement behind the client's back
    pub fn remove_directly(&self, id: &str) {
        self.store.lock().unwrap().retain(|s| s.id != id);
    }

    async fn enter(&self, operation: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(operation);
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(operation)
            .and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.lock().unwrap().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_statements(&self) -> ClientResult<Vec<Statement>> {
        // The store is read when the request arrives; any delay is on the reply.
        let snapshot = self.store.lock().unwrap().clone();
        self.enter("list").await?;
        Ok(snapshot)
    }

    async fn add_statement(&self, statement: &str) -> ClientResult<()> {
        self.enter("add").await?;
        if self.stored_texts().iter().any(|t| t == statement) {
            return Err(ClientError::Application("Statement already exists.".into()));
        }
        self.insert(statement);
        Ok(())
    }

    async fn delete_statement(&self, id: &str) -> ClientResult<()> {
        self.enter("delete").await?;
        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|s| s.id != id);
        if store.len() == before {
            return Err(ClientError::Application("Statement not found.".into()));
        }
        Ok(())
    }

    async fn run_inference(&self, query: &InferenceQuery) -> ClientResult<InferenceResult> {
        *self.last_inference.lock().unwrap() = Some(query.clone());
        self.enter("inference").await?;
        Ok(InferenceResult {
            conclusion: query.query.clone(),
            derived: query.statements.contains(&query.query),
            steps: vec![
                format!("Knowledge Base (KB): {}", query.statements.join(" ∧ ")),
                format!("Query (Q): {}", query.query),
            ],
        })
    }

    async fn generate_truth_table(&self, statements: &[String]) -> ClientResult<TruthTable> {
        self.enter("truth_table").await?;
        let mut headers = vec!["A".to_string()];
        headers.extend(statements.iter().cloned());
        let rows: Vec<TruthRow> = [("T", "F"), ("F", "T")]
            .iter()
            .map(|(a, value)| {
                let mut row = serde_json::Map::new();
                row.insert("A".into(), json!(a));
                for s in statements {
                    row.insert(s.clone(), json!(value));
                }
                row.into_iter().collect()
            })
            .collect();
        Ok(TruthTable { headers, rows })
    }
}
