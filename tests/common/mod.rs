//! In-process mock of the knowledge-base server
//!
//! Mirrors the server's observable contract: statements are scoped to a
//! `session` cookie, application failures come back as 4xx with a JSON
//! `success: false` body, and ids are opaque strings.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use logickb::client::HttpBackend;

const METHODS: [&str; 3] = ["truth-table", "modus-ponens", "resolution"];

#[derive(Default)]
pub struct MockState {
    sessions: Mutex<HashMap<String, Vec<(String, String)>>>,
    calls: Mutex<HashMap<&'static str, usize>>,
    delays: Mutex<HashMap<&'static str, VecDeque<u64>>>,
    broken: Mutex<bool>,
    last_body: Mutex<HashMap<&'static str, Value>>,
}

struct Session {
    id: String,
    fresh: bool,
}

impl MockState {
    async fn enter(&self, endpoint: &'static str, body: Option<&Value>) -> Result<(), Response> {
        *self.calls.lock().unwrap().entry(endpoint).or_default() += 1;
        if let Some(body) = body {
            self.last_body.lock().unwrap().insert(endpoint, body.clone());
        }
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        if *self.broken.lock().unwrap() {
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "<h1>Internal Server Error</h1>")
                .into_response());
        }
        Ok(())
    }

    fn session(&self, headers: &HeaderMap) -> Session {
        let existing = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().strip_prefix("session="))
            .map(str::to_string)
            .find(|id| self.sessions.lock().unwrap().contains_key(id));

        match existing {
            Some(id) => Session { id, fresh: false },
            None => {
                let id = Uuid::new_v4().to_string();
                self.sessions.lock().unwrap().insert(id.clone(), Vec::new());
                Session { id, fresh: true }
            }
        }
    }

    fn with_store<R>(&self, session: &Session, f: impl FnOnce(&mut Vec<(String, String)>) -> R) -> R {
        let mut sessions = self.sessions.lock().unwrap();
        f(sessions.entry(session.id.clone()).or_default())
    }
}

fn respond(session: &Session, status: StatusCode, body: Value) -> Response {
    let mut response = (status, Json(body)).into_response();
    if session.fresh {
        let cookie = format!("session={}; Path=/; HttpOnly", session.id);
        response
            .headers_mut()
            .insert(SET_COOKIE, HeaderValue::from_str(&cookie).unwrap());
    }
    response
}

fn failure(session: &Session, status: StatusCode, message: &str) -> Response {
    respond(session, status, json!({"success": false, "message": message}))
}

async fn get_statements(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(response) = state.enter("get_statements", None).await {
        return response;
    }
    let session = state.session(&headers);
    let statements: Vec<Value> = state.with_store(&session, |store| {
        store
            .iter()
            .map(|(id, text)| json!({"id": id, "text": text}))
            .collect()
    });
    respond(&session, StatusCode::OK, json!({"success": true, "statements": statements}))
}

async fn add_statement(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = state.enter("add_statement", Some(&body)).await {
        return response;
    }
    let session = state.session(&headers);
    let text = body["statement"].as_str().unwrap_or("").trim().to_string();
    if text.is_empty() {
        return failure(&session, StatusCode::BAD_REQUEST, "Statement cannot be empty.");
    }
    let added = state.with_store(&session, |store| {
        if store.iter().any(|(_, t)| *t == text) {
            return false;
        }
        store.push((Uuid::new_v4().to_string(), text.clone()));
        true
    });
    if !added {
        return failure(&session, StatusCode::BAD_REQUEST, "Statement already exists.");
    }
    respond(&session, StatusCode::OK, json!({"success": true, "message": "Statement added."}))
}

async fn delete_statement(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = state.enter("delete_statement", Some(&body)).await {
        return response;
    }
    let session = state.session(&headers);
    let id = body["id"].as_str().unwrap_or("").to_string();
    let removed = state.with_store(&session, |store| {
        let before = store.len();
        store.retain(|(sid, _)| *sid != id);
        store.len() != before
    });
    if !removed {
        return failure(&session, StatusCode::NOT_FOUND, "Statement not found.");
    }
    respond(&session, StatusCode::OK, json!({"success": true, "message": "Statement deleted."}))
}

async fn run_inference(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = state.enter("run_inference", Some(&body)).await {
        return response;
    }
    let session = state.session(&headers);
    let method = body["method"].as_str().unwrap_or("");
    if !METHODS.contains(&method) {
        return failure(&session, StatusCode::BAD_REQUEST, "Invalid inference method selected.");
    }
    let statements: Vec<String> = body["statements"]
        .as_array()
        .map(|a| a.iter().filter_map(|s| s.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    let query = body["query"].as_str().unwrap_or("").to_string();
    respond(
        &session,
        StatusCode::OK,
        json!({
            "success": true,
            "result": {
                "conclusion": query,
                "derived": statements.contains(&query),
                "steps": [
                    format!("Knowledge Base (KB): {}", statements.join(" ∧ ")),
                    format!("Query (Q): {}", query),
                    format!("Method: {}", method),
                ],
            }
        }),
    )
}

/// Variables are the distinct uppercase letters; a statement column is `T`
/// only on the all-true row.
async fn generate_truth_table(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(response) = state.enter("generate_truth_table", Some(&body)).await {
        return response;
    }
    let session = state.session(&headers);
    let statements: Vec<String> = body["statements"]
        .as_array()
        .map(|a| a.iter().filter_map(|s| s.as_str().map(str::to_string)).collect())
        .unwrap_or_default();
    let mut variables: Vec<String> = statements
        .iter()
        .flat_map(|s| s.chars())
        .filter(char::is_ascii_uppercase)
        .map(String::from)
        .collect();
    variables.sort();
    variables.dedup();

    let mut rows = Vec::new();
    for mask in 0..(1u32 << variables.len()) {
        let mut row = Map::new();
        let mut all_true = true;
        for (i, var) in variables.iter().enumerate() {
            let value = mask & (1 << (variables.len() - 1 - i)) == 0;
            all_true &= value;
            row.insert(var.clone(), json!(if value { "T" } else { "F" }));
        }
        for s in &statements {
            row.insert(s.clone(), json!(if all_true { "T" } else { "F" }));
        }
        rows.push(Value::Object(row));
    }

    let headers: Vec<String> = variables.into_iter().chain(statements).collect();
    respond(
        &session,
        StatusCode::OK,
        json!({"success": true, "headers": headers, "rows": rows}),
    )
}

/// A running mock server bound to an ephemeral localhost port
pub struct MockServer {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/get_statements", get(get_statements))
            .route("/api/add_statement", post(add_statement))
            .route("/api/delete_statement", post(delete_statement))
            .route("/api/run_inference", post(run_inference))
            .route("/api/generate_truth_table", post(generate_truth_table))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// A fresh client with its own cookie jar
    pub fn backend(&self) -> HttpBackend {
        HttpBackend::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.state.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.state.calls.lock().unwrap().values().sum()
    }

    pub fn last_body(&self, endpoint: &str) -> Option<Value> {
        self.state.last_body.lock().unwrap().get(endpoint).cloned()
    }

    pub fn session_count(&self) -> usize {
        self.state.sessions.lock().unwrap().len()
    }

    /// Delay the next calls to `endpoint`, one entry per call
    pub fn delay(&self, endpoint: &'static str, delays: &[u64]) {
        self.state
            .delays
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .extend(delays.iter().copied());
    }

    /// While broken, every endpoint answers 500 with an HTML body
    pub fn set_broken(&self, broken: bool) {
        *self.state.broken.lock().unwrap() = broken;
    }
}
