//! HTTP layer: request construction, status mapping and JSON decoding.

use crate::config::redacted;
use crate::error::{Result, SemanticScholarError};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

const USER_AGENT: &str = concat!("semanticscholar-rs/", env!("CARGO_PKG_VERSION"));

/// Issues requests against the API and translates failures into
/// [`SemanticScholarError`]s. No request is ever retried.
#[derive(Clone)]
pub struct ApiRequester {
    http: Client,
    timeout: Duration,
    api_key: Option<String>,
}

impl fmt::Debug for ApiRequester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequester")
            .field("timeout", &self.timeout)
            .field("api_key", &redacted(&self.api_key))
            .finish_non_exhaustive()
    }
}

impl ApiRequester {
    pub fn new(timeout: Duration, api_key: Option<String>) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            timeout,
            api_key,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Applies to every request issued afterwards.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// GET `url` and decode the JSON body.
    ///
    /// `fields` is sent as a single comma-joined `fields` parameter when non-empty.
    pub async fn get_data(
        &self,
        url: &str,
        params: &[(String, String)],
        fields: &[&str],
    ) -> Result<Value> {
        tracing::debug!(url, "GET");
        let request = self.http.get(url);
        self.send(self.prepare(request, params, fields)).await
    }

    /// POST a JSON body to `url` and decode the JSON response.
    pub async fn post_data(
        &self,
        url: &str,
        params: &[(String, String)],
        fields: &[&str],
        body: &Value,
    ) -> Result<Value> {
        tracing::debug!(url, "POST");
        let request = self.http.post(url).json(body);
        self.send(self.prepare(request, params, fields)).await
    }

    fn prepare(
        &self,
        mut request: RequestBuilder,
        params: &[(String, String)],
        fields: &[&str],
    ) -> RequestBuilder {
        request = request.timeout(self.timeout).query(params);
        if !fields.is_empty() {
            request = request.query(&[("fields", fields.join(","))]);
        }
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        request
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Map the HTTP status to a result, decoding successful bodies as JSON.
async fn handle_response(response: reqwest::Response) -> Result<Value> {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    tracing::debug!(status, %url, "response");

    match status {
        200..=299 => {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| SemanticScholarError::Parse(format!("Invalid JSON from {}: {}", url, e)))
        }
        400 => {
            let message = error_message(response).await;
            tracing::warn!(%url, %message, "bad query parameters");
            Err(SemanticScholarError::BadQueryParameters(message))
        }
        404 => {
            let message = error_message(response).await;
            tracing::warn!(%url, %message, "object not found");
            Err(SemanticScholarError::ObjectNotFound(message))
        }
        _ => {
            let message = error_message(response).await;
            tracing::warn!(status, %url, %message, "request failed");
            Err(SemanticScholarError::RequestFailed { status, message })
        }
    }
}

/// The API reports failures as `{"error": "..."}`; fall back to the raw body.
async fn error_message(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    extract_error(&body)
}

fn extract_error(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.to_string())
}
