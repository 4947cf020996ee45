//! HTTP implementation of [`Backend`]

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::Backend;
use super::errors::{ClientError, ClientResult};
use super::types::{
    require, Ack, AddStatementRequest, DeleteStatementRequest, Envelope, InferencePayload,
    InferenceQuery, InferenceResult, Statement, StatementsPayload, TruthTable, TruthTablePayload,
    TruthTableRequest,
};

/// JSON-over-HTTP client for the knowledge-base server.
///
/// Keeps a cookie jar: the server scopes the statement store to the session
/// cookie, so every request from one client must carry the same cookie.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<Envelope<T>> {
        let response = self.client.get(self.url(endpoint)).send().await?;
        decode(response).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ClientResult<Envelope<T>> {
        let response = self.client.post(self.url(endpoint)).json(body).send().await?;
        decode(response).await
    }
}

/// Decode a response body regardless of status.
///
/// The server reports application failures as 4xx with a JSON
/// `success: false` body, so status alone says nothing. A body that is not
/// the expected JSON is a decode error.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<Envelope<T>> {
    let status = response.status();
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| ClientError::Decode(format!("HTTP {}: {}", status.as_u16(), e)))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_statements(&self) -> ClientResult<Vec<Statement>> {
        let payload: StatementsPayload = self.get("get_statements").await?.into_payload()?;
        require(payload.statements, "statements")
    }

    async fn add_statement(&self, statement: &str) -> ClientResult<()> {
        let _: Ack = self
            .post("add_statement", &AddStatementRequest { statement })
            .await?
            .into_payload()?;
        Ok(())
    }

    async fn delete_statement(&self, id: &str) -> ClientResult<()> {
        let _: Ack = self
            .post("delete_statement", &DeleteStatementRequest { id })
            .await?
            .into_payload()?;
        Ok(())
    }

    async fn run_inference(&self, query: &InferenceQuery) -> ClientResult<InferenceResult> {
        let payload: InferencePayload = self.post("run_inference", query).await?.into_payload()?;
        require(payload.result, "result")
    }

    async fn generate_truth_table(&self, statements: &[String]) -> ClientResult<TruthTable> {
        let payload: TruthTablePayload = self
            .post("generate_truth_table", &TruthTableRequest { statements })
            .await?
            .into_payload()?;
        Ok(TruthTable {
            headers: require(payload.headers, "headers")?,
            rows: require(payload.rows, "rows")?,
        })
    }
}
